//! # Accounts Subsystem (netreg-accounts)
//!
//! Member accounts for the registry: registration, credential checks, and
//! the signed-token flows that confirm a registration or recover a lost
//! password.
//!
//! ## Token Flows
//!
//! ```text
//! register ──→ mail(registration token) ──→ verify ──→ verified = true
//!
//! reset request ──→ mail(lost-password token) ──→ verify
//!                                                  └──→ fresh password mailed
//! ```
//!
//! An unverified account's active namespace is `registration`; a verified
//! account's is `lost_password`. Tokens from the wrong namespace never
//! verify, and every password change rotates the account's token so older
//! signed tokens die with it.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Account entity, validation rules, errors, configuration
//! - `ports/` - Inbound API plus outbound store/mail/clock traits
//! - `adapters/` - In-memory store and a recording mail sink
//! - `service.rs` - Application service implementing the API

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::memory::{InMemoryAccountStore, RecordingMailSink};
pub use domain::config::{AccountsConfig, ConfigError};
pub use domain::entities::{Account, AccountView};
pub use domain::errors::AccountError;
pub use ports::inbound::AccountApi;
pub use ports::outbound::{
    AccountStore, MailMessage, MailSink, MailSinkError, SystemTimeSource, TimeSource,
};
pub use service::AccountService;
