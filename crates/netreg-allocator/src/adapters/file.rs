//! # File-Backed Reservation Store
//!
//! Durable store for single-node deployments without a database server. The
//! full reservation set is kept in memory and snapshotted to disk with
//! bincode on every mutation; snapshots are written to a temp file and
//! renamed into place so a crash mid-write leaves the previous snapshot
//! intact.
//!
//! An advisory `fs2` lock (held for the store's lifetime) keeps a second
//! process from opening the same snapshot; the lock file records the holder's
//! PID for diagnostics.

use crate::domain::address_space::AddressSpace;
use crate::domain::entities::Reservation;
use crate::ports::outbound::ReservationStore;
use fs2::FileExt;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use shared_types::{OwnerId, StoreError};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One reservation as persisted: owner plus the packed `(base, size)` pair.
///
/// The prefix length is deliberately not stored; it is reconstructed from
/// `num_addresses`, which keeps the snapshot format honest about the
/// invariant that the pair alone determines the block.
#[derive(Debug, Serialize, Deserialize)]
struct StoredReservation {
    owner: Uuid,
    address_packed: u32,
    num_addresses: u64,
}

impl From<&Reservation> for StoredReservation {
    fn from(reservation: &Reservation) -> Self {
        Self {
            owner: reservation.owner.as_uuid(),
            address_packed: reservation.space.base(),
            num_addresses: reservation.space.size(),
        }
    }
}

impl StoredReservation {
    fn into_reservation(self) -> Result<Reservation, StoreError> {
        let space = AddressSpace::from_parts(self.address_packed, self.num_addresses).map_err(
            |err| StoreError::Serialization {
                message: format!("corrupt snapshot record: {err}"),
            },
        )?;
        Ok(Reservation::new(OwnerId::from_uuid(self.owner), space))
    }
}

/// File-backed reservation store.
pub struct FileBackedReservationStore {
    records: RwLock<Vec<Reservation>>,
    path: PathBuf,
    /// Keeps the advisory lock alive; released on drop.
    lock_file: File,
    lock_path: PathBuf,
}

impl FileBackedReservationStore {
    /// Open (or create) the snapshot at `path`.
    ///
    /// ## Errors
    ///
    /// - `Locked` if another process holds the snapshot's lock file
    /// - `Io` / `Serialization` if an existing snapshot cannot be read
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StoreError::io)?;
            }
        }

        let lock_path = path.with_extension("lock");
        let mut lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(StoreError::io)?;
        lock_file
            .try_lock_exclusive()
            .map_err(|_| StoreError::Locked {
                message: format!("snapshot {} is held by another process", path.display()),
            })?;
        let _ = writeln!(lock_file, "{}", std::process::id());

        let mut records = Self::load_snapshot(&path)?;
        records.sort_by_key(|reservation| reservation.space.base());

        if records.is_empty() {
            tracing::info!(path = %path.display(), "opened empty reservation snapshot");
        } else {
            tracing::info!(
                path = %path.display(),
                reservations = records.len(),
                "loaded reservation snapshot"
            );
        }

        Ok(Self {
            records: RwLock::new(records),
            path,
            lock_file,
            lock_path,
        })
    }

    fn load_snapshot(path: &Path) -> Result<Vec<Reservation>, StoreError> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::io(err)),
        };
        let stored: Vec<StoredReservation> =
            bincode::deserialize(&bytes).map_err(|err| StoreError::Serialization {
                message: err.to_string(),
            })?;
        stored
            .into_iter()
            .map(StoredReservation::into_reservation)
            .collect()
    }

    /// Write `records` to disk; the in-memory state is only swapped by the
    /// caller after this succeeds, so a failed write changes nothing.
    fn persist(&self, records: &[Reservation]) -> Result<(), StoreError> {
        let stored: Vec<StoredReservation> = records.iter().map(StoredReservation::from).collect();
        let bytes = bincode::serialize(&stored).map_err(|err| StoreError::Serialization {
            message: err.to_string(),
        })?;

        let temp_path = self.path.with_extension("tmp");
        let mut file = File::create(&temp_path).map_err(StoreError::io)?;
        file.write_all(&bytes).map_err(StoreError::io)?;
        file.sync_all().map_err(StoreError::io)?;
        std::fs::rename(&temp_path, &self.path).map_err(StoreError::io)?;
        Ok(())
    }

    fn commit<F>(&self, mutate: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Vec<Reservation>) -> Result<(), StoreError>,
    {
        let mut records = self.records.write();
        let mut next = records.clone();
        mutate(&mut next)?;
        self.persist(&next)?;
        *records = next;
        Ok(())
    }
}

impl Drop for FileBackedReservationStore {
    fn drop(&mut self) {
        let _ = self.lock_file.unlock();
        let _ = std::fs::remove_file(&self.lock_path);
    }
}

fn insertion_index(records: &[Reservation], space: &AddressSpace) -> usize {
    records.partition_point(|existing| existing.space.base() <= space.base())
}

impl ReservationStore for FileBackedReservationStore {
    fn all(&self) -> Result<Vec<Reservation>, StoreError> {
        Ok(self.records.read().clone())
    }

    fn all_overlapping(&self, space: &AddressSpace) -> Result<Vec<Reservation>, StoreError> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|existing| existing.space.overlaps(space))
            .cloned()
            .collect())
    }

    fn find(&self, space: &AddressSpace) -> Result<Option<Reservation>, StoreError> {
        Ok(self
            .records
            .read()
            .iter()
            .find(|existing| existing.space == *space)
            .cloned())
    }

    fn owned_by(&self, owner: OwnerId) -> Result<Vec<Reservation>, StoreError> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|existing| existing.owner == owner)
            .cloned()
            .collect())
    }

    fn insert(&self, reservation: Reservation) -> Result<(), StoreError> {
        self.commit(|records| {
            let index = insertion_index(records, &reservation.space);
            records.insert(index, reservation);
            Ok(())
        })
    }

    fn update(&self, previous: &AddressSpace, reservation: Reservation) -> Result<(), StoreError> {
        self.commit(|records| {
            let position = records
                .iter()
                .position(|existing| existing.space == *previous)
                .ok_or_else(|| StoreError::Inconsistent {
                    message: format!("no reservation at {previous} to update"),
                })?;
            records.remove(position);
            let index = insertion_index(records, &reservation.space);
            records.insert(index, reservation);
            Ok(())
        })
    }

    fn remove(&self, space: &AddressSpace) -> Result<(), StoreError> {
        self.commit(|records| {
            let position = records
                .iter()
                .position(|existing| existing.space == *space)
                .ok_or_else(|| StoreError::Inconsistent {
                    message: format!("no reservation at {space} to remove"),
                })?;
            records.remove(position);
            Ok(())
        })
    }
}
