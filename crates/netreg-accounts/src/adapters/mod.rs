//! # Adapters
//!
//! In-process implementations of the outbound ports.

pub mod memory;
