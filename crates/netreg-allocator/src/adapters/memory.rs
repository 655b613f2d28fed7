//! # In-Memory Reservation Store
//!
//! The default store for unit tests and for embedding without durability.
//! Keeps the reservations in one `RwLock`ed vector sorted by base, so every
//! query is a consistent snapshot and every result is already in the order
//! the port contract demands.

use crate::domain::address_space::AddressSpace;
use crate::domain::entities::Reservation;
use crate::ports::outbound::ReservationStore;
use parking_lot::RwLock;
use shared_types::{OwnerId, StoreError};

/// In-memory reservation store.
#[derive(Debug, Default)]
pub struct InMemoryReservationStore {
    /// Sorted ascending by `space.base()`.
    records: RwLock<Vec<Reservation>>,
}

impl InMemoryReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reservations.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// True if no reservation is stored.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

fn insertion_index(records: &[Reservation], space: &AddressSpace) -> usize {
    records.partition_point(|existing| existing.space.base() <= space.base())
}

impl ReservationStore for InMemoryReservationStore {
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
        let mut records = self.records.write();
        let index = insertion_index(&records, &reservation.space);
        records.insert(index, reservation);
        Ok(())
    }

    fn update(&self, previous: &AddressSpace, reservation: Reservation) -> Result<(), StoreError> {
        let mut records = self.records.write();
        let position = records
            .iter()
            .position(|existing| existing.space == *previous)
            .ok_or_else(|| StoreError::Inconsistent {
                message: format!("no reservation at {previous} to update"),
            })?;
        records.remove(position);
        let index = insertion_index(&records, &reservation.space);
        records.insert(index, reservation);
        Ok(())
    }

    fn remove(&self, space: &AddressSpace) -> Result<(), StoreError> {
        let mut records = self.records.write();
        let position = records
            .iter()
            .position(|existing| existing.space == *space)
            .ok_or_else(|| StoreError::Inconsistent {
                message: format!("no reservation at {space} to remove"),
            })?;
        records.remove(position);
        Ok(())
    }
}
