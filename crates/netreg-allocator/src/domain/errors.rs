//! # Domain Errors
//!
//! Error types for the allocator subsystem.
//!
//! ## Design Principles
//!
//! - Each error maps to a specific rejection the request layer can act on
//! - Conflict diagnostics are deterministic: conflicting CIDRs are listed in
//!   ascending base order
//! - No panics in domain logic (use Result instead)

use shared_types::{OwnerId, StoreError};
use thiserror::Error;

/// Errors that can occur while validating, allocating, or mutating
/// reservations.
///
/// All variants are recoverable at the request-layer boundary; none are fatal
/// to the process. Addresses and CIDRs are not secrets and may appear in the
/// messages.
#[derive(Debug, Clone, Error)]
pub enum AllocationError {
    /// The address or prefix length could not be parsed.
    #[error("invalid address or prefix length: {input}")]
    InvalidAddress { input: String },

    /// The requested block is not nested in any allowed range.
    #[error("network {requested} is outside the allowed ranges: {}", .allowed.join(", "))]
    PolicyViolation {
        requested: String,
        allowed: Vec<String>,
    },

    /// The requested block overlaps existing reservations.
    ///
    /// `conflicts` holds the CIDR of every overlapping reservation, in
    /// ascending base order.
    #[error("ip address conflict: {}", .conflicts.join(","))]
    Conflict { conflicts: Vec<String> },

    /// No allowed range has a free gap of the requested size.
    #[error("no free /{prefixlen} block left in any allowed range")]
    AddressSpaceExhausted { prefixlen: u8 },

    /// A mutation was attempted by an identity that does not own the block.
    #[error("reservation is held by account {owner}")]
    Forbidden { owner: OwnerId },

    /// No reservation matches the query.
    #[error("no reservation matches {network}")]
    NotFound { network: String },

    /// The persistence adapter failed; the store is unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}
