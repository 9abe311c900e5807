//! HMAC-SHA256 signing key derived from a base64 secret

use crate::error::{TokenError, TokenResult};
use crate::logging::{RECOMMENDED_KEY_LEN, log_weak_key};
use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

type HmacSha256 = Hmac<Sha256>;

/// Length of an HMAC-SHA256 tag in bytes
pub const SIGNATURE_LEN: usize = 32;

/// Symmetric key material for HS256.
///
/// Built once at startup and shared read-only. The bytes are wiped on drop
/// and never appear in `Debug` output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningKey {
    bytes: Vec<u8>,
}

impl SigningKey {
    /// Decode a standard-alphabet base64 secret into key material.
    ///
    /// The decoded bytes are used as-is. Keys shorter than 32 bytes are
    /// accepted but logged as weak.
    ///
    /// # Errors
    /// Returns `TokenError::Configuration` if `secret` is not valid base64.
    pub fn from_base64_secret(secret: &str) -> TokenResult<Self> {
        let bytes = STANDARD
            .decode(secret.trim())
            .map_err(|e| TokenError::Configuration(format!("signing secret is not base64: {e}")))?;
        Ok(Self::from_bytes(bytes))
    }

    /// Wrap raw key bytes
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        if bytes.len() < RECOMMENDED_KEY_LEN {
            log_weak_key(bytes.len());
        }
        Self { bytes }
    }

    /// Key length in bytes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for a zero-length key
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// HMAC-SHA256 tag over `message`
    pub(crate) fn sign(&self, message: &[u8]) -> TokenResult<[u8; SIGNATURE_LEN]> {
        let mut mac = HmacSha256::new_from_slice(&self.bytes)
            .map_err(|_| TokenError::configuration("Invalid HMAC key"))?;
        mac.update(message);
        let tag = mac.finalize().into_bytes();
        let mut out = [0u8; SIGNATURE_LEN];
        out.copy_from_slice(&tag);
        Ok(out)
    }

    /// Constant-time check of `signature` against the expected tag
    pub(crate) fn verify(&self, message: &[u8], signature: &[u8]) -> TokenResult<bool> {
        let expected = self.sign(message)?;
        Ok(expected.as_slice().ct_eq(signature).into())
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("len", &self.bytes.len())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
