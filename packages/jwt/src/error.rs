//! Token error types

use thiserror::Error;

/// Token operation result type
pub type TokenResult<T> = Result<T, TokenError>;

/// Errors raised while configuring, issuing or decoding tokens.
///
/// An expired token or a subject mismatch is not an error: validation
/// reports those as `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Signing secret or other configuration value is unusable
    #[error("Invalid token configuration: {0}")]
    Configuration(String),
    /// Token is not three well-formed base64url segments with JSON inside
    #[error("Malformed token: {0}")]
    MalformedToken(String),
    /// Signature does not match the header and payload
    #[error("Invalid token signature")]
    InvalidSignature,
    /// Header declares an algorithm other than HS256
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// Claims rejected at issuance or extraction
    #[error("Invalid claims: {0}")]
    InvalidClaims(String),
    /// JSON encoding failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl TokenError {
    /// Create a configuration error
    #[inline]
    #[must_use]
    pub fn configuration(msg: &str) -> Self {
        TokenError::Configuration(msg.to_string())
    }

    /// Create a malformed token error
    #[inline]
    #[must_use]
    pub fn malformed(msg: &str) -> Self {
        TokenError::MalformedToken(msg.to_string())
    }

    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: &str) -> Self {
        TokenError::UnsupportedAlgorithm(alg.to_string())
    }

    /// Create an invalid claims error
    #[inline]
    #[must_use]
    pub fn invalid_claims(msg: &str) -> Self {
        TokenError::InvalidClaims(msg.to_string())
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: &str) -> Self {
        TokenError::Serialization(msg.to_string())
    }

    /// Short, secret-free label for log lines
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::Configuration(_) => "configuration",
            TokenError::MalformedToken(_) => "malformed_token",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::UnsupportedAlgorithm(_) => "unsupported_algorithm",
            TokenError::InvalidClaims(_) => "invalid_claims",
            TokenError::Serialization(_) => "serialization",
        }
    }
}
