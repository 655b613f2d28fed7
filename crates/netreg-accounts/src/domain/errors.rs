//! # Domain Errors
//!
//! Error types for the accounts subsystem. Credential failures are
//! deliberately uniform: an unknown email and a wrong password produce the
//! same `InvalidCredentials`, so the API does not leak which addresses are
//! registered.

use shared_types::{StoreError, TokenError};
use thiserror::Error;

/// Errors that can occur in account operations.
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    /// The email address is syntactically invalid.
    #[error("invalid email address")]
    InvalidEmail,

    /// Another account already holds this address.
    #[error("email already exists")]
    EmailTaken,

    /// The password is shorter than the configured minimum.
    #[error("password too short: at least {min} characters required")]
    PasswordTooShort { min: usize },

    /// Unknown email or wrong password; the two are indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The signed token failed verification (bad signature, wrong namespace,
    /// expired, malformed).
    #[error(transparent)]
    Token(#[from] TokenError),

    /// The signed token verified but its payload is not the account's
    /// current token (e.g. the token rotated since it was issued).
    #[error("token does not match")]
    TokenMismatch,

    /// No account matches the query.
    #[error("account not found")]
    NotFound,

    /// The mail sink refused the message; nothing was persisted.
    #[error("mail delivery failed: {message}")]
    Mail { message: String },

    /// The persistence adapter failed; the store is unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}
