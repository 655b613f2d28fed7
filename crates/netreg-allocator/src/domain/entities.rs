//! # Domain Entities
//!
//! The persisted reservation entity. Identity of a reservation is its
//! address space: the store is keyed by `(base, size)`, never by a surrogate
//! id.

use crate::domain::address_space::AddressSpace;
use shared_types::OwnerId;

/// One member's claim on one block of address space.
///
/// The owner is a relationship, not ownership in the Rust sense: account
/// lifetimes are managed by the accounts subsystem, and the allocator only
/// compares identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    /// The account holding this block.
    pub owner: OwnerId,
    /// The reserved block.
    pub space: AddressSpace,
}

impl Reservation {
    /// Bind a block to an owner.
    pub fn new(owner: OwnerId, space: AddressSpace) -> Self {
        Self { owner, space }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_identity_is_the_space() {
        let owner = OwnerId::generate();
        let space = AddressSpace::from_cidr("10.0.0.0", Some(24)).unwrap();
        let a = Reservation::new(owner, space);
        let b = Reservation::new(owner, space);
        assert_eq!(a, b);
    }
}
