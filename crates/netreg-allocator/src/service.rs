//! # Reservation Service
//!
//! The application service implementing [`ReservationApi`].
//!
//! ## Architecture
//!
//! This service:
//! 1. Parses and validates requested blocks (`AddressSpace` construction)
//! 2. Enforces policy nesting and overlap freedom before any write
//! 3. Runs the first-fit search when no address is requested
//! 4. Serializes every mutation behind one allocation lock
//!
//! A request moves Requested → Validated → Persisted, or drops to Rejected
//! with a typed error at the first failed step. Nothing is written before
//! Validated, and the store's atomic write contract covers the final step, so
//! a rejected request leaves no partial state.

use crate::adapters::api_handler::{NetworkDetailView, NetworkSummaryView};
use crate::domain::address_space::AddressSpace;
use crate::domain::allocator;
use crate::domain::config::{AllocatorConfig, ConfigError};
use crate::domain::entities::Reservation;
use crate::domain::errors::AllocationError;
use crate::domain::policy::PolicyRegistry;
use crate::ports::inbound::ReservationApi;
use crate::ports::outbound::ReservationStore;
use parking_lot::Mutex;
use shared_types::OwnerId;

/// The reservation lifecycle service.
///
/// Generic over the store so tests run against
/// [`InMemoryReservationStore`](crate::adapters::memory::InMemoryReservationStore)
/// and deployments against the file-backed adapter without code changes.
pub struct ReservationService<S: ReservationStore> {
    store: S,
    registry: PolicyRegistry,
    config: AllocatorConfig,
    /// Serializes "compute candidate → check overlap → write". Read-only
    /// queries never take it.
    alloc_lock: Mutex<()>,
}

impl<S: ReservationStore> ReservationService<S> {
    /// Create a service over `store`, building the policy registry from
    /// `config` once.
    pub fn new(store: S, config: AllocatorConfig) -> Result<Self, ConfigError> {
        let registry = config.registry()?;
        Ok(Self {
            store,
            registry,
            config,
            alloc_lock: Mutex::new(()),
        })
    }

    /// The policy registry this service allocates from.
    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    /// Direct access to the underlying store (read paths, embedding).
    pub fn store(&self) -> &S {
        &self.store
    }

    fn ensure_policy(&self, space: &AddressSpace) -> Result<(), AllocationError> {
        if self.registry.range_containing(space).is_none() {
            return Err(AllocationError::PolicyViolation {
                requested: space.to_string(),
                allowed: self.registry.allowed_cidrs(),
            });
        }
        Ok(())
    }

    fn ensure_no_conflict(
        &self,
        space: &AddressSpace,
        exclude: Option<&AddressSpace>,
    ) -> Result<(), AllocationError> {
        let overlapping = self.store.all_overlapping(space)?;
        let conflicts = allocator::conflict_cidrs(&overlapping, exclude);
        if !conflicts.is_empty() {
            return Err(AllocationError::Conflict { conflicts });
        }
        Ok(())
    }

    /// First-fit search across the registry ranges, in registry order.
    fn find_first_free(&self, prefixlen: u8) -> Result<AddressSpace, AllocationError> {
        if prefixlen > 32 {
            return Err(AllocationError::InvalidAddress {
                input: format!("/{prefixlen}"),
            });
        }
        let needed = 1u64 << (32 - prefixlen);
        for range in self.registry.ranges() {
            let occupied = self.store.all_overlapping(range)?;
            if let Some(base) = allocator::first_gap(range, &occupied, needed) {
                let space = AddressSpace::from_base(base, prefixlen)?;
                debug_assert!(self.registry.range_containing(&space).is_some());
                return Ok(space);
            }
        }
        Err(AllocationError::AddressSpaceExhausted { prefixlen })
    }

    /// Resolve `(address, prefixlen?)` to a stored reservation: exact match
    /// with a prefix length, covering match without one.
    fn lookup(
        &self,
        address: &str,
        prefixlen: Option<u8>,
    ) -> Result<Reservation, AllocationError> {
        match prefixlen {
            Some(prefixlen) => {
                let space = AddressSpace::from_cidr(address, Some(prefixlen))?;
                self.store
                    .find(&space)?
                    .ok_or_else(|| AllocationError::NotFound {
                        network: space.to_string(),
                    })
            }
            None => {
                let host = AddressSpace::from_cidr(address, None)?;
                self.store
                    .all_overlapping(&host)?
                    .into_iter()
                    .next()
                    .ok_or_else(|| AllocationError::NotFound {
                        network: host.to_string(),
                    })
            }
        }
    }
}

impl<S: ReservationStore> ReservationApi for ReservationService<S> {
    fn create(
        &self,
        owner: OwnerId,
        address: Option<&str>,
        prefixlen: Option<u8>,
    ) -> Result<NetworkDetailView, AllocationError> {
        let _guard = self.alloc_lock.lock();

        let space = match address {
            Some(address) => {
                let space = AddressSpace::from_cidr(address, prefixlen)?;
                self.ensure_policy(&space)?;
                self.ensure_no_conflict(&space, None)?;
                space
            }
            None => self.find_first_free(prefixlen.unwrap_or(32))?,
        };

        let reservation = Reservation::new(owner, space);
        self.store.insert(reservation.clone())?;
        tracing::info!(network = %space, owner = %owner, "reservation created");
        Ok(NetworkDetailView::from_reservation(&reservation, &self.config))
    }

    fn get(
        &self,
        address: &str,
        prefixlen: Option<u8>,
    ) -> Result<NetworkDetailView, AllocationError> {
        let reservation = self.lookup(address, prefixlen)?;
        Ok(NetworkDetailView::from_reservation(&reservation, &self.config))
    }

    fn list(&self) -> Result<Vec<NetworkSummaryView>, AllocationError> {
        Ok(self
            .store
            .all()?
            .iter()
            .map(NetworkSummaryView::from_reservation)
            .collect())
    }

    fn list_owned(&self, owner: OwnerId) -> Result<Vec<NetworkSummaryView>, AllocationError> {
        Ok(self
            .store
            .owned_by(owner)?
            .iter()
            .map(NetworkSummaryView::from_reservation)
            .collect())
    }

    fn update(
        &self,
        identity: OwnerId,
        address: &str,
        prefixlen: u8,
        new_address: Option<&str>,
        new_prefixlen: Option<u8>,
    ) -> Result<NetworkDetailView, AllocationError> {
        let _guard = self.alloc_lock.lock();

        let existing = self.lookup(address, Some(prefixlen))?;
        if existing.owner != identity {
            return Err(AllocationError::Forbidden {
                owner: existing.owner,
            });
        }

        let current_address = existing.space.network_address().to_string();
        let target_address = new_address.unwrap_or(current_address.as_str());
        let target_prefixlen = new_prefixlen.unwrap_or_else(|| existing.space.prefixlen());

        let next_space = AddressSpace::from_cidr(target_address, Some(target_prefixlen))?;
        self.ensure_policy(&next_space)?;
        self.ensure_no_conflict(&next_space, Some(&existing.space))?;

        let updated = Reservation::new(existing.owner, next_space);
        self.store.update(&existing.space, updated.clone())?;
        tracing::info!(
            from = %existing.space,
            to = %next_space,
            owner = %identity,
            "reservation updated"
        );
        Ok(NetworkDetailView::from_reservation(&updated, &self.config))
    }

    fn delete(
        &self,
        identity: OwnerId,
        address: &str,
        prefixlen: u8,
    ) -> Result<(), AllocationError> {
        let _guard = self.alloc_lock.lock();

        let existing = self.lookup(address, Some(prefixlen))?;
        if existing.owner != identity {
            return Err(AllocationError::Forbidden {
                owner: existing.owner,
            });
        }

        self.store.remove(&existing.space)?;
        tracing::info!(network = %existing.space, owner = %identity, "reservation released");
        Ok(())
    }
}
