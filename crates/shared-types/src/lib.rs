//! # Shared Types Crate
//!
//! This crate contains the value types and security primitives shared by the
//! accounts and allocator subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Identity Is Opaque**: The allocator sees owners only as `OwnerId`; it
//!   never learns emails or password material.
//! - **No Secret Leakage**: Password hashes and raw tokens never appear in
//!   `Display` output or log fields.

pub mod entities;
pub mod errors;
pub mod security;

pub use entities::{Email, OwnerId};
pub use errors::StoreError;
pub use security::{
    hash_password, random_token, sign_token, unix_now, verify_token, TokenError, TokenNamespace,
    DEFAULT_TOKEN_MAX_AGE, MAX_FUTURE_SKEW, TOKEN_LENGTH,
};
