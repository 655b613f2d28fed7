//! # Inbound Ports (Driving Ports)
//!
//! The primary API of the accounts subsystem.

use crate::domain::entities::{Account, AccountView};
use crate::domain::errors::AccountError;
use shared_types::OwnerId;

/// Account lifecycle and credential operations.
pub trait AccountApi: Send + Sync {
    /// Register a new account and mail its registration-confirmation token.
    ///
    /// ## Errors
    ///
    /// - `InvalidEmail`: address fails syntactic validation
    /// - `PasswordTooShort`: below the configured minimum
    /// - `EmailTaken`: another account holds this address
    /// - `Mail`: the sink refused the confirmation message; nothing stored
    fn register(&self, email: &str, password: &str) -> Result<AccountView, AccountError>;

    /// Check credentials and return the matching account.
    ///
    /// ## Errors
    ///
    /// `InvalidCredentials` for unknown email and wrong password alike.
    fn authenticate(&self, email: &str, password: &str) -> Result<Account, AccountError>;

    /// Redeem a signed token in the account's current namespace.
    ///
    /// - Unverified account + registration token: marks the account verified.
    /// - Verified account + lost-password token: issues a fresh random
    ///   password and mails it.
    ///
    /// ## Errors
    ///
    /// `NotFound`, `Token` (bad signature / expired / malformed),
    /// `TokenMismatch` (payload is not the account's current token).
    fn verify(&self, email: &str, signed_token: &str) -> Result<AccountView, AccountError>;

    /// Mail a signed token for the account's current namespace.
    ///
    /// For a verified account this is the lost-password flow; for an
    /// unverified one it re-sends the registration confirmation.
    fn request_password_reset(&self, email: &str) -> Result<(), AccountError>;

    /// Change email and/or password. A password change rotates the account
    /// token, retiring all previously issued signed tokens.
    fn update(
        &self,
        id: OwnerId,
        new_email: Option<&str>,
        new_password: Option<&str>,
    ) -> Result<AccountView, AccountError>;

    /// Detail view of one account.
    fn get(&self, id: OwnerId) -> Result<AccountView, AccountError>;

    /// Remove an account. The caller is responsible for releasing the
    /// member's reservations through the allocator first; nothing cascades.
    fn delete(&self, id: OwnerId) -> Result<(), AccountError>;
}
