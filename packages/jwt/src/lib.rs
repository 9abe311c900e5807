//! Signed, time-bounded identity tokens (HS256 JWT)
//!
//! Issuance: `ClaimSet` → `TokenEncoder` → `Token`.
//! Verification: token → `TokenDecoder` → `ClaimSet` → `TokenValidator`.
//!
//! ```
//! use jwt_credentials::{IssueOptions, TokenConfig, TokenService};
//! use serde_json::json;
//!
//! let config = TokenConfig::new("c2VjcmV0LXNlY3JldC1zZWNyZXQtc2VjcmV0LXNlY3JldA==", 3_600_000);
//! let service = TokenService::new(&config)?;
//!
//! let token = service.issue("alice", IssueOptions::new().with_claim("role", json!("admin")))?;
//! assert_eq!(service.extract_username(token.as_str())?, "alice");
//! assert!(service.is_valid(token.as_str(), "alice")?);
//! assert!(!service.is_valid(token.as_str(), "bob")?);
//! # Ok::<(), jwt_credentials::TokenError>(())
//! ```

pub mod claims;
pub mod config;
pub mod decoder;
pub mod encoder;
mod error;
pub mod extractor;
pub mod identity;
pub mod key;
mod logging;
pub mod service;
mod types;
pub mod validator;

pub use claims::ClaimSet;
pub use config::TokenConfig;
pub use decoder::TokenDecoder;
pub use encoder::TokenEncoder;
pub use error::*;
pub use extractor::{
    ClaimExtractor, ExpirationExtractor, FieldExtractor, IssuedAtExtractor, SubjectExtractor,
};
pub use identity::{Identity, UserIdentity};
pub use key::SigningKey;
pub use service::{IssueOptions, TokenService};
pub use types::*;
pub use validator::TokenValidator;
