//! Secret-free structured logging for token events
//!
//! Subjects are logged as a short SHA-256 fingerprint so log lines stay
//! traceable without carrying usernames. Keys and token strings are never
//! passed to these helpers.

use crate::error::TokenError;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

/// Recommended minimum HMAC-SHA256 key length in bytes
pub(crate) const RECOMMENDED_KEY_LEN: usize = 32;

/// Hash an identifier for logging
pub(crate) fn fingerprint(value: &str) -> String {
    let hash = Sha256::digest(value.as_bytes());
    let hex_hash = format!("{hash:x}");
    format!("#{}", &hex_hash[..12])
}

pub(crate) fn log_token_issued(subject: &str, expiration: DateTime<Utc>, extra_claims: usize) {
    debug!(
        subject = %fingerprint(subject),
        exp = expiration.timestamp(),
        extra_claims,
        "Issued token"
    );
}

pub(crate) fn log_token_rejected(operation: &str, error: &TokenError) {
    debug!(operation, reason = error.kind(), "Token rejected");
}

pub(crate) fn log_weak_key(len: usize) {
    warn!(
        key_len = len,
        recommended = RECOMMENDED_KEY_LEN,
        "HMAC-SHA256 signing key is shorter than recommended"
    );
}
