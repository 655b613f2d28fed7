//! # Domain Entities
//!
//! The account entity and its serializable view.

use serde::{Deserialize, Serialize};
use shared_types::{Email, OwnerId, TokenNamespace};

/// One member account.
///
/// `token` is the random per-account material signed tokens are minted over;
/// it rotates on every password change, which retires all previously issued
/// tokens at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Stable identifier; reservations reference this.
    pub id: OwnerId,
    /// Unique, syntactically valid address.
    pub email: Email,
    /// Salted SHA-256 hash, hex-encoded. Never logged, never serialized.
    pub password_hash: String,
    /// Random alphanumeric token material. Never logged, never serialized.
    pub token: String,
    /// Whether the registration token was redeemed.
    pub verified: bool,
}

impl Account {
    /// The namespace this account currently verifies tokens in.
    ///
    /// Until the registration is confirmed, only registration tokens are
    /// meaningful; afterwards, only lost-password tokens are.
    pub fn verify_namespace(&self) -> TokenNamespace {
        if self.verified {
            TokenNamespace::LostPassword
        } else {
            TokenNamespace::Registration
        }
    }
}

/// Serializable projection of an account.
///
/// Password material and the token never leave the domain; a request layer
/// composes the member's reservations next to this via
/// `ReservationApi::list_owned`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    /// Stable identifier, also the reservation owner id.
    pub id: String,
    /// The account's address.
    pub email: String,
    /// Whether the registration was confirmed.
    pub verified: bool,
}

impl AccountView {
    /// Project an account into its view.
    pub fn from_account(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email.to_string(),
            verified: account.verified,
        }
    }
}
