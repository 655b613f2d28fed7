//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the reservation service.
//!
//! The store holds the persisted reservations; the allocator queries it but
//! does not own persistence. Implementations must make every query a single
//! consistent snapshot relative to concurrent mutation, and every mutation
//! atomic: fully applied, or the store unchanged.

use crate::domain::address_space::AddressSpace;
use crate::domain::entities::Reservation;
use shared_types::{OwnerId, StoreError};

/// Abstract interface to the reservation collection.
///
/// Bundled adapters: [`InMemoryReservationStore`] for tests and embedding,
/// [`FileBackedReservationStore`] for durable single-node deployments.
///
/// Ordering contract: every method returning multiple reservations yields
/// them sorted ascending by base address. The first-fit search and the
/// deterministic conflict listings both lean on this.
///
/// [`InMemoryReservationStore`]: crate::adapters::memory::InMemoryReservationStore
/// [`FileBackedReservationStore`]: crate::adapters::file::FileBackedReservationStore
pub trait ReservationStore: Send + Sync {
    /// Every reservation, ascending by base.
    fn all(&self) -> Result<Vec<Reservation>, StoreError>;

    /// Every reservation whose space overlaps `space`, ascending by base,
    /// as one consistent snapshot.
    fn all_overlapping(&self, space: &AddressSpace) -> Result<Vec<Reservation>, StoreError>;

    /// The reservation with exactly this space, if any.
    fn find(&self, space: &AddressSpace) -> Result<Option<Reservation>, StoreError>;

    /// Every reservation held by `owner`, ascending by base.
    ///
    /// This is the explicit form of the owner→reservations relationship;
    /// there is no lazy collection hanging off an account.
    fn owned_by(&self, owner: OwnerId) -> Result<Vec<Reservation>, StoreError>;

    /// Insert a new reservation.
    ///
    /// The caller (the service, under its allocation lock) has already
    /// established that no stored reservation overlaps it.
    fn insert(&self, reservation: Reservation) -> Result<(), StoreError>;

    /// Replace the reservation at `previous` with `reservation`, atomically.
    ///
    /// `previous` is expected to exist; the service looks it up under the
    /// allocation lock before calling. A missing `previous` means the locking
    /// protocol was violated and is reported as `Inconsistent`.
    fn update(&self, previous: &AddressSpace, reservation: Reservation) -> Result<(), StoreError>;

    /// Remove the reservation at `space`.
    ///
    /// Same contract as [`update`](Self::update): the space is expected to
    /// exist.
    fn remove(&self, space: &AddressSpace) -> Result<(), StoreError>;
}
