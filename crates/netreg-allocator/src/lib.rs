//! # Address-Space Allocator (netreg-allocator)
//!
//! The allocator subsystem is the authoritative source of IPv4 reservations.
//! It validates requested blocks against the policy registry of allowed
//! private ranges, resolves overlaps against every existing reservation, and
//! finds first-fit free blocks when the caller names only a size.
//!
//! ## Allocation Protocol
//!
//! ```text
//! request (address?, prefixlen?, owner)
//!        │
//!        ▼
//! [allocation lock]──→ policy check ──→ overlap check ──→ store insert
//!        │                   │                │                 │
//!        │              PolicyViolation    Conflict          Store error
//!        ▼                                                      │
//!     released ◄────────────────────────────────────────────────┘
//! ```
//!
//! The lock is held across "compute candidate → check overlap → insert", so
//! no two persisted reservations can ever overlap. Read-only queries never
//! take it.
//!
//! ## Domain Invariants
//!
//! | # | Invariant | Description |
//! |---|-----------|-------------|
//! | 1 | Masked Base | A block's base is always its masked network address |
//! | 2 | Lossless Prefix | `(base, size)` round-trips to the prefix length |
//! | 3 | Policy Nesting | Every reservation nests in exactly one allowed range |
//! | 4 | No Overlap | No two persisted reservations share an address |
//! | 5 | Atomic Writes | A failed write leaves the store unchanged |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Pure domain logic (value types, allocator algorithms, errors)
//! - `ports/` - Port traits (inbound API, outbound store)
//! - `adapters/` - In-memory store, file-backed store, API view builders
//! - `service.rs` - Application service implementing the API
//!
//! ## Usage
//!
//! ```ignore
//! use netreg_allocator::{AllocatorConfig, InMemoryReservationStore, ReservationService};
//!
//! let config = AllocatorConfig::default();
//! let service = ReservationService::new(InMemoryReservationStore::new(), config)?;
//!
//! // First-fit: no address given, a /32 is found in the first open range
//! let view = service.create(owner, None, None)?;
//! assert_eq!(view.network, "10.0.0.0/32");
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::api_handler::{NetworkDetailView, NetworkSummaryView};
pub use adapters::file::FileBackedReservationStore;
pub use adapters::memory::InMemoryReservationStore;
pub use domain::address_space::AddressSpace;
pub use domain::config::{AllocatorConfig, ConfigError};
pub use domain::entities::Reservation;
pub use domain::errors::AllocationError;
pub use domain::policy::PolicyRegistry;
pub use ports::inbound::ReservationApi;
pub use ports::outbound::ReservationStore;
pub use service::ReservationService;
