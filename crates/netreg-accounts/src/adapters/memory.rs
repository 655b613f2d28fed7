//! # In-Memory Adapters
//!
//! The in-memory account store and the recording mail sink. Both are the
//! unit-test defaults; the mail sink doubles as a development adapter that
//! just logs what would have been sent.

use crate::domain::entities::Account;
use crate::ports::outbound::{AccountStore, MailMessage, MailSink, MailSinkError};
use parking_lot::RwLock;
use shared_types::{Email, OwnerId, StoreError};

/// In-memory account store.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<Vec<Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    /// True if no account is stored.
    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn by_email(&self, email: &Email) -> Result<Option<Account>, StoreError> {
        Ok(self
            .accounts
            .read()
            .iter()
            .find(|account| account.email == *email)
            .cloned())
    }

    fn by_id(&self, id: OwnerId) -> Result<Option<Account>, StoreError> {
        Ok(self
            .accounts
            .read()
            .iter()
            .find(|account| account.id == id)
            .cloned())
    }

    fn insert(&self, account: Account) -> Result<(), StoreError> {
        self.accounts.write().push(account);
        Ok(())
    }

    fn update(&self, account: Account) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write();
        let position = accounts
            .iter()
            .position(|existing| existing.id == account.id)
            .ok_or_else(|| StoreError::Inconsistent {
                message: format!("no account {} to update", account.id),
            })?;
        accounts[position] = account;
        Ok(())
    }

    fn remove(&self, id: OwnerId) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write();
        let position = accounts
            .iter()
            .position(|existing| existing.id == id)
            .ok_or_else(|| StoreError::Inconsistent {
                message: format!("no account {id} to remove"),
            })?;
        accounts.remove(position);
        Ok(())
    }
}

/// Mail sink that records every message and logs it.
///
/// Tests inspect [`sent`](Self::sent) to assert on composed messages; in
/// development the log line stands in for actual delivery.
#[derive(Debug, Default)]
pub struct RecordingMailSink {
    messages: RwLock<Vec<MailMessage>>,
    /// When set, every send fails with this message (for rollback tests).
    refuse_with: RwLock<Option<String>>,
}

impl RecordingMailSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages handed to the sink so far.
    pub fn sent(&self) -> Vec<MailMessage> {
        self.messages.read().clone()
    }

    /// Make subsequent sends fail, simulating a down mail relay.
    pub fn refuse(&self, reason: &str) {
        *self.refuse_with.write() = Some(reason.to_string());
    }
}

impl MailSink for RecordingMailSink {
    fn send(&self, message: MailMessage) -> Result<(), MailSinkError> {
        if let Some(reason) = self.refuse_with.read().clone() {
            return Err(MailSinkError { message: reason });
        }
        tracing::debug!(to = %message.to, subject = %message.subject, "mail recorded");
        self.messages.write().push(message);
        Ok(())
    }
}
