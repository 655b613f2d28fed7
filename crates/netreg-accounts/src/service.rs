//! # Account Service
//!
//! The application service implementing [`AccountApi`].
//!
//! ## Architecture
//!
//! This service:
//! 1. Validates email syntax, password length, and address uniqueness
//! 2. Hashes passwords with the process-wide salt before anything persists
//! 3. Mints and redeems HMAC-signed tokens in the account's active namespace
//! 4. Composes mail messages and hands them to the [`MailSink`] port
//!
//! Mail is sent before the store is touched: if the sink refuses a
//! registration confirmation or a new-password notice, the operation fails
//! with the store unchanged, mirroring the no-partial-state rule of the
//! allocator.

use crate::domain::config::AccountsConfig;
use crate::domain::entities::{Account, AccountView};
use crate::domain::errors::AccountError;
use crate::ports::inbound::AccountApi;
use crate::ports::outbound::{AccountStore, MailMessage, MailSink, TimeSource};
use shared_types::{hash_password, random_token, sign_token, verify_token};
use shared_types::{Email, OwnerId, TokenNamespace, TOKEN_LENGTH};

/// The account lifecycle service.
pub struct AccountService<St, M, T>
where
    St: AccountStore,
    M: MailSink,
    T: TimeSource,
{
    store: St,
    mail: M,
    time: T,
    config: AccountsConfig,
}

impl<St, M, T> AccountService<St, M, T>
where
    St: AccountStore,
    M: MailSink,
    T: TimeSource,
{
    /// Create a service over the given adapters.
    pub fn new(store: St, mail: M, time: T, config: AccountsConfig) -> Self {
        Self {
            store,
            mail,
            time,
            config,
        }
    }

    /// Direct access to the underlying store (read paths, embedding).
    pub fn store(&self) -> &St {
        &self.store
    }

    /// Dismantle the service into its adapters, e.g. to rebuild it with a
    /// different clock.
    pub fn into_parts(self) -> (St, M, T, AccountsConfig) {
        (self.store, self.mail, self.time, self.config)
    }

    fn check_password(&self, password: &str) -> Result<(), AccountError> {
        if password.chars().count() < self.config.min_password_len {
            return Err(AccountError::PasswordTooShort {
                min: self.config.min_password_len,
            });
        }
        Ok(())
    }

    /// The absolute verify URL for the account's current namespace, carrying
    /// a freshly signed token.
    fn verify_url(&self, account: &Account) -> String {
        let signed = sign_token(
            &self.config.secret,
            account.verify_namespace(),
            &account.token,
            self.time.now(),
        );
        format!(
            "https://{}/users/{}/verify/{}",
            self.config.domain, account.email, signed
        )
    }

    fn confirmation_mail(&self, account: &Account) -> MailMessage {
        let url = self.verify_url(account);
        MailMessage {
            to: account.email.clone(),
            subject: "Your confirmation is needed!".to_string(),
            body: format!(
                "Hi {name},\n\n\
                 your confirmation is needed on {domain}.\n\
                 Follow this link to continue:\n\n\
                 {url}\n",
                name = account.email.local_part(),
                domain = self.config.domain,
                url = url,
            ),
        }
    }

    fn new_password_mail(&self, account: &Account, new_password: &str) -> MailMessage {
        MailMessage {
            to: account.email.clone(),
            subject: "Your new password!".to_string(),
            body: format!(
                "Hi {name},\n\n\
                 your new password for {domain} is: {password}\n",
                name = account.email.local_part(),
                domain = self.config.domain,
                password = new_password,
            ),
        }
    }

    fn send(&self, message: MailMessage) -> Result<(), AccountError> {
        self.mail.send(message).map_err(|err| AccountError::Mail {
            message: err.message,
        })
    }
}

impl<St, M, T> AccountApi for AccountService<St, M, T>
where
    St: AccountStore,
    M: MailSink,
    T: TimeSource,
{
    fn register(&self, email: &str, password: &str) -> Result<AccountView, AccountError> {
        let email = Email::parse(email).map_err(|_| AccountError::InvalidEmail)?;
        self.check_password(password)?;
        if self.store.by_email(&email)?.is_some() {
            return Err(AccountError::EmailTaken);
        }

        let account = Account {
            id: OwnerId::generate(),
            email,
            password_hash: hash_password(&self.config.salt, password),
            token: random_token(TOKEN_LENGTH),
            verified: false,
        };

        self.send(self.confirmation_mail(&account))?;
        self.store.insert(account.clone())?;
        tracing::info!(account = %account.id, "account registered");
        Ok(AccountView::from_account(&account))
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<Account, AccountError> {
        let email = Email::parse(email).map_err(|_| AccountError::InvalidCredentials)?;
        let account = self
            .store
            .by_email(&email)?
            .ok_or(AccountError::InvalidCredentials)?;
        if hash_password(&self.config.salt, password) != account.password_hash {
            return Err(AccountError::InvalidCredentials);
        }
        Ok(account)
    }

    fn verify(&self, email: &str, signed_token: &str) -> Result<AccountView, AccountError> {
        let email = Email::parse(email).map_err(|_| AccountError::NotFound)?;
        let mut account = self.store.by_email(&email)?.ok_or(AccountError::NotFound)?;

        let namespace = account.verify_namespace();
        let payload = verify_token(
            &self.config.secret,
            namespace,
            signed_token,
            self.config.token_max_age,
            self.time.now(),
        )?;
        if payload != account.token {
            return Err(AccountError::TokenMismatch);
        }

        match namespace {
            TokenNamespace::Registration => {
                account.verified = true;
                self.store.update(account.clone())?;
                tracing::info!(account = %account.id, "registration confirmed");
            }
            TokenNamespace::LostPassword => {
                let new_password = random_token(TOKEN_LENGTH);
                account.password_hash = hash_password(&self.config.salt, &new_password);
                account.token = random_token(TOKEN_LENGTH);
                self.send(self.new_password_mail(&account, &new_password))?;
                self.store.update(account.clone())?;
                tracing::info!(account = %account.id, "password reset completed");
            }
        }
        Ok(AccountView::from_account(&account))
    }

    fn request_password_reset(&self, email: &str) -> Result<(), AccountError> {
        let email = Email::parse(email).map_err(|_| AccountError::NotFound)?;
        let account = self.store.by_email(&email)?.ok_or(AccountError::NotFound)?;
        self.send(self.confirmation_mail(&account))?;
        tracing::info!(account = %account.id, namespace = %account.verify_namespace(), "verification mail sent");
        Ok(())
    }

    fn update(
        &self,
        id: OwnerId,
        new_email: Option<&str>,
        new_password: Option<&str>,
    ) -> Result<AccountView, AccountError> {
        let mut account = self.store.by_id(id)?.ok_or(AccountError::NotFound)?;

        if let Some(raw) = new_email {
            let email = Email::parse(raw).map_err(|_| AccountError::InvalidEmail)?;
            if email != account.email && self.store.by_email(&email)?.is_some() {
                return Err(AccountError::EmailTaken);
            }
            account.email = email;
        }

        if let Some(password) = new_password {
            self.check_password(password)?;
            account.password_hash = hash_password(&self.config.salt, password);
            // Retire every signed token issued against the old credentials
            account.token = random_token(TOKEN_LENGTH);
        }

        self.store.update(account.clone())?;
        tracing::info!(account = %account.id, "account updated");
        Ok(AccountView::from_account(&account))
    }

    fn get(&self, id: OwnerId) -> Result<AccountView, AccountError> {
        let account = self.store.by_id(id)?.ok_or(AccountError::NotFound)?;
        Ok(AccountView::from_account(&account))
    }

    fn delete(&self, id: OwnerId) -> Result<(), AccountError> {
        self.store.by_id(id)?.ok_or(AccountError::NotFound)?;
        self.store.remove(id)?;
        tracing::info!(account = %id, "account deleted");
        Ok(())
    }
}
