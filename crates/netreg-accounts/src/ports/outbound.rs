//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the account service: persistence, mail delivery,
//! and a clock. Each has an in-process adapter for tests; production wires
//! whatever the deployment actually uses.

use crate::domain::entities::Account;
use shared_types::{unix_now, Email, OwnerId, StoreError};

/// Abstract interface to the account collection.
///
/// Email uniqueness is checked by the service before insert (under no lock;
/// the registry's account traffic is not contended the way allocations are),
/// so adapters only provide mechanical operations.
pub trait AccountStore: Send + Sync {
    /// The account with this address, if any.
    fn by_email(&self, email: &Email) -> Result<Option<Account>, StoreError>;

    /// The account with this id, if any.
    fn by_id(&self, id: OwnerId) -> Result<Option<Account>, StoreError>;

    /// Insert a new account.
    fn insert(&self, account: Account) -> Result<(), StoreError>;

    /// Replace the stored account with the same id.
    fn update(&self, account: Account) -> Result<(), StoreError>;

    /// Remove the account with this id.
    fn remove(&self, id: OwnerId) -> Result<(), StoreError>;
}

/// One outgoing mail message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    /// Recipient address.
    pub to: Email,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Abstract interface to mail delivery.
///
/// Actual delivery (SMTP, a queue, an API) is outside this system; the
/// service only composes messages and hands them over. A failed send aborts
/// the operation that triggered it before anything is persisted.
pub trait MailSink: Send + Sync {
    /// Hand a message to the delivery infrastructure.
    fn send(&self, message: MailMessage) -> Result<(), MailSinkError>;
}

/// Error from a mail sink.
#[derive(Debug, Clone, thiserror::Error)]
#[error("mail sink error: {message}")]
pub struct MailSinkError {
    /// What the sink reported.
    pub message: String,
}

/// Shared sinks work wherever owned sinks do; callers keep a handle to
/// inspect or drain what was sent.
impl<M: MailSink + ?Sized> MailSink for std::sync::Arc<M> {
    fn send(&self, message: MailMessage) -> Result<(), MailSinkError> {
        (**self).send(message)
    }
}

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Current timestamp in seconds since epoch.
    fn now(&self) -> u64;
}

/// Default time source using system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> u64 {
        unix_now()
    }
}
