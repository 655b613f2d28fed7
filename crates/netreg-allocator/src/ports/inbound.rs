//! # Inbound Ports (Driving Ports)
//!
//! The primary API of the allocator subsystem. A request layer (HTTP, CLI,
//! tests) calls these operations and maps the typed errors to its own status
//! codes; the allocator knows nothing about transports.

use crate::adapters::api_handler::{NetworkDetailView, NetworkSummaryView};
use crate::domain::errors::AllocationError;
use shared_types::OwnerId;

/// Reservation lifecycle and query operations.
///
/// Implementations must treat every mutating operation as one atomic unit:
/// validation, overlap resolution, and the store write either all happen or
/// the call fails with no partial state left behind.
pub trait ReservationApi: Send + Sync {
    /// Reserve a block for `owner`.
    ///
    /// - `address` and `prefixlen` given: reserve exactly that block.
    /// - only `prefixlen` given: first-fit search for a free block of that
    ///   size across the policy ranges.
    /// - neither given: first-fit search for a single address (`/32`).
    ///
    /// ## Errors
    ///
    /// - `InvalidAddress`: unparseable address or prefix length
    /// - `PolicyViolation`: block not nested in any allowed range
    /// - `Conflict`: block overlaps existing reservations (listed ascending)
    /// - `AddressSpaceExhausted`: no free gap of the requested size
    fn create(
        &self,
        owner: OwnerId,
        address: Option<&str>,
        prefixlen: Option<u8>,
    ) -> Result<NetworkDetailView, AllocationError>;

    /// Detail view of one reservation.
    ///
    /// With a prefix length, the lookup is exact. Without one, the lookup
    /// finds the reservation covering `address`.
    fn get(&self, address: &str, prefixlen: Option<u8>) -> Result<NetworkDetailView, AllocationError>;

    /// Compact views of every reservation, ascending by base.
    fn list(&self) -> Result<Vec<NetworkSummaryView>, AllocationError>;

    /// Compact views of the reservations held by `owner`, ascending by base.
    fn list_owned(&self, owner: OwnerId) -> Result<Vec<NetworkSummaryView>, AllocationError>;

    /// Move or resize an existing reservation.
    ///
    /// The reservation is identified by its current `(address, prefixlen)`;
    /// unspecified new parts keep their current value. The new block is
    /// re-validated against policy and conflicts (its own previous space
    /// excluded) before the store is touched.
    ///
    /// ## Errors
    ///
    /// `NotFound`, `Forbidden` (caller is not the owner), plus everything
    /// [`create`](Self::create) can return.
    fn update(
        &self,
        identity: OwnerId,
        address: &str,
        prefixlen: u8,
        new_address: Option<&str>,
        new_prefixlen: Option<u8>,
    ) -> Result<NetworkDetailView, AllocationError>;

    /// Release a reservation.
    ///
    /// ## Errors
    ///
    /// `NotFound`, `Forbidden` (caller is not the owner).
    fn delete(&self, identity: OwnerId, address: &str, prefixlen: u8)
        -> Result<(), AllocationError>;
}
