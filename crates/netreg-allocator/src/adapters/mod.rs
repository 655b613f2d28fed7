//! # Adapters
//!
//! Concrete implementations of the outbound ports plus the serializable view
//! builders the API hands back to request layers.

pub mod api_handler;
pub mod file;
pub mod memory;
