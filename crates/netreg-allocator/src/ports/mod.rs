//! # Ports
//!
//! Port traits for the allocator subsystem: the inbound API other code calls,
//! and the outbound store interface this library requires the host to provide
//! (or to pick from the bundled adapters).

pub mod inbound;
pub mod outbound;
