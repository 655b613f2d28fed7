//! # Account Security Primitives
//!
//! This module provides the **single, authoritative implementation** of the
//! security helpers both subsystems rely on: salted password hashing, random
//! token material, and HMAC-SHA256 signed time-limited tokens.
//!
//! ## Security Properties
//!
//! - **HMAC-SHA256 Signatures**: Signed tokens are bound to a namespace, so a
//!   registration token can never be replayed as a lost-password token.
//! - **Time-Bounded Validity**: Tokens expire after `max_age` seconds
//!   (default 3600) and are rejected if stamped more than [`MAX_FUTURE_SKEW`]
//!   seconds ahead of the verifier's clock.
//! - **Constant-Time Comparison**: Signature checks go through
//!   `Mac::verify_slice`, never `==` on byte slices.

use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Maximum allowed clock skew for future timestamps (seconds).
pub const MAX_FUTURE_SKEW: u64 = 10;

/// Default maximum age for signed tokens (seconds).
pub const DEFAULT_TOKEN_MAX_AGE: u64 = 3600;

/// Length of the random per-account token material.
pub const TOKEN_LENGTH: usize = 32;

// =============================================================================
// PASSWORDS AND TOKEN MATERIAL
// =============================================================================

/// Hashes a password with the process-wide salt.
///
/// The digest is SHA-256 over `salt || password`, hex-encoded. The salt is
/// configuration, not per-account state; two accounts with the same password
/// and salt produce the same hash.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generates `length` characters of random alphanumeric token material.
pub fn random_token(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Returns the current Unix timestamp in seconds.
///
/// Clock-before-epoch degrades to 0 rather than panicking; verification then
/// fails closed on the age check.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// =============================================================================
// SIGNED TOKENS
// =============================================================================

/// The purpose a signed token was issued for.
///
/// Namespaces partition the signature domain: a token signed for one
/// namespace never verifies in another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenNamespace {
    /// Confirming a fresh registration.
    Registration,
    /// Recovering a lost password.
    LostPassword,
}

impl TokenNamespace {
    /// Stable string form mixed into the MAC input.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenNamespace::Registration => "registration",
            TokenNamespace::LostPassword => "lost_password",
        }
    }
}

impl fmt::Display for TokenNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by [`verify_token`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token string does not have the expected `payload.ts.mac` shape.
    #[error("malformed signed token")]
    Malformed,

    /// The MAC does not match (wrong secret, wrong namespace, or tampering).
    #[error("token signature mismatch")]
    SignatureMismatch,

    /// The token is older than the allowed window.
    #[error("token expired: {age}s old, max {max_age}s")]
    Expired { age: u64, max_age: u64 },

    /// The token claims to be issued in the future beyond the allowed skew.
    #[error("token issued {ahead}s in the future")]
    IssuedInFuture { ahead: u64 },
}

fn token_message(namespace: TokenNamespace, payload: &str, issued_at: u64) -> Vec<u8> {
    let mut message = Vec::with_capacity(namespace.as_str().len() + payload.len() + 24);
    message.extend_from_slice(namespace.as_str().as_bytes());
    message.push(b'.');
    message.extend_from_slice(payload.as_bytes());
    message.push(b'.');
    message.extend_from_slice(issued_at.to_string().as_bytes());
    message
}

/// Signs `payload` for `namespace` at `issued_at`.
///
/// The wire form is `hex(payload).issued_at.hex(mac)`: URL-safe, opaque, and
/// self-describing enough for [`verify_token`] to recover the payload.
pub fn sign_token(secret: &str, namespace: TokenNamespace, payload: &str, issued_at: u64) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(&token_message(namespace, payload, issued_at));
    let tag = mac.finalize().into_bytes();

    format!("{}.{}.{}", hex::encode(payload.as_bytes()), issued_at, hex::encode(tag))
}

/// Verifies a signed token and returns its payload.
///
/// Checks run in order: shape, signature, future skew, age. The signature is
/// checked before the timestamps so an attacker cannot distinguish "expired"
/// from "never valid" without holding the secret.
pub fn verify_token(
    secret: &str,
    namespace: TokenNamespace,
    signed: &str,
    max_age: u64,
    now: u64,
) -> Result<String, TokenError> {
    let mut parts = signed.splitn(3, '.');
    let (payload_hex, issued_at_str, tag_hex) = match (parts.next(), parts.next(), parts.next()) {
        (Some(p), Some(t), Some(m)) => (p, t, m),
        _ => return Err(TokenError::Malformed),
    };

    let payload_bytes = hex::decode(payload_hex).map_err(|_| TokenError::Malformed)?;
    let payload = String::from_utf8(payload_bytes).map_err(|_| TokenError::Malformed)?;
    let issued_at: u64 = issued_at_str.parse().map_err(|_| TokenError::Malformed)?;
    let tag = hex::decode(tag_hex).map_err(|_| TokenError::Malformed)?;

    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => return Err(TokenError::SignatureMismatch),
    };
    mac.update(&token_message(namespace, &payload, issued_at));
    if mac.verify_slice(&tag).is_err() {
        return Err(TokenError::SignatureMismatch);
    }

    if issued_at > now + MAX_FUTURE_SKEW {
        return Err(TokenError::IssuedInFuture {
            ahead: issued_at - now,
        });
    }
    let age = now.saturating_sub(issued_at);
    if age > max_age {
        return Err(TokenError::Expired { age, max_age });
    }

    Ok(payload)
}
