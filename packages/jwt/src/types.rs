//! Wire-level token types

use serde::{Deserialize, Serialize};
use std::fmt;

/// The only algorithm this crate signs with or accepts
pub const HS256: &str = "HS256";

/// JOSE header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtHeader {
    /// Signing algorithm identifier
    pub alg: String,
    /// Media type, normally "JWT"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

impl JwtHeader {
    /// Header written on every issued token: `{"alg":"HS256","typ":"JWT"}`
    #[must_use]
    pub fn hs256() -> Self {
        Self {
            alg: HS256.to_string(),
            typ: Some("JWT".to_string()),
        }
    }
}

/// Compact-serialized token: `header.payload.signature`, each base64url.
///
/// Opaque to callers; produced by the encoder and only ever read afterwards.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub(crate) fn from_compact(compact: String) -> Self {
        Self(compact)
    }

    /// Borrow the compact string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take ownership of the compact string
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Tokens are bearer credentials; keep them out of debug logs.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token(<{} bytes>)", self.0.len())
    }
}
