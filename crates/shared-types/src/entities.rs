//! # Core Shared Entities
//!
//! Identifier and value types that cross subsystem boundaries.
//!
//! ## Clusters
//!
//! - **Identity**: `OwnerId` — the opaque account identifier the allocator
//!   attaches to reservations.
//! - **Contact**: `Email` — validated at construction, immutable afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of an account.
///
/// This is the only notion of identity the allocator subsystem knows about;
/// reservations reference their owner exclusively through this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(Uuid);

impl OwnerId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID (e.g. one read back from a store snapshot).
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A syntactically validated email address.
///
/// Validation is deliberately shallow: one `@`, a non-empty local part, and a
/// domain containing at least one dot with non-empty labels. Anything deeper
/// (MX lookups, deliverability) belongs to the mail infrastructure, which is
/// outside this system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Parse and validate an email address.
    pub fn parse(raw: &str) -> Result<Self, EmailParseError> {
        let raw = raw.trim();
        let (local, domain) = raw.split_once('@').ok_or(EmailParseError)?;
        if local.is_empty() || domain.is_empty() {
            return Err(EmailParseError);
        }
        if raw.contains(char::is_whitespace) || domain.contains('@') {
            return Err(EmailParseError);
        }
        let mut labels = domain.split('.');
        let mut count = 0;
        for label in &mut labels {
            if label.is_empty() {
                return Err(EmailParseError);
            }
            count += 1;
        }
        if count < 2 {
            return Err(EmailParseError);
        }
        Ok(Self(raw.to_string()))
    }

    /// The address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The local part before the `@`, used as a display name in mail bodies.
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl TryFrom<String> for Email {
    type Error = EmailParseError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Email::parse(&raw)
    }
}

/// Error returned when an email address fails syntactic validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailParseError;

impl fmt::Display for EmailParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid email address")
    }
}

impl std::error::Error for EmailParseError {}
