//! # Error Types
//!
//! Errors shared by every store adapter, whatever the backing medium.

use thiserror::Error;

/// Errors that can occur inside a persistence adapter.
///
/// Domain errors (conflicts, policy violations, authorization) never appear
/// here; adapters report only mechanical failures of the medium itself.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// I/O failure reading or writing the backing medium.
    #[error("store I/O error: {message}")]
    Io { message: String },

    /// Snapshot bytes could not be encoded or decoded.
    #[error("store serialization error: {message}")]
    Serialization { message: String },

    /// The backing medium is exclusively held by another process.
    #[error("store locked: {message}")]
    Locked { message: String },

    /// The store's contents contradict the caller's protocol (e.g. a record
    /// that must exist has vanished). Indicates a bug, not bad user input.
    #[error("store inconsistency: {message}")]
    Inconsistent { message: String },
}

impl StoreError {
    /// Wrap an `std::io::Error` as a store I/O failure.
    pub fn io(err: std::io::Error) -> Self {
        StoreError::Io {
            message: err.to_string(),
        }
    }
}
