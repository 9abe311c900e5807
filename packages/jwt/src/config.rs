//! Token configuration supplied by the host at startup

use crate::error::{TokenError, TokenResult};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// Environment variable holding the base64 signing secret
pub const SECRET_KEY_ENV: &str = "SECURITY_JWT_SECRET_KEY";
/// Environment variable holding the default lifetime in milliseconds
pub const EXPIRATION_TIME_ENV: &str = "SECURITY_JWT_EXPIRATION_TIME";

/// Signing secret and default token lifetime.
///
/// Deserializes from `{"secret-key": "...", "expiration-time": 3600000}`.
#[derive(Debug, Deserialize)]
pub struct TokenConfig {
    /// Base64 (standard alphabet) HMAC secret
    #[serde(rename = "secret-key", deserialize_with = "deserialize_secret")]
    pub secret_key: SecretString,
    /// Default lifetime in milliseconds
    #[serde(rename = "expiration-time", default = "default_expiration_ms")]
    pub expiration_ms: u64,
}

fn default_expiration_ms() -> u64 {
    3_600_000 // 1 hour
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

impl TokenConfig {
    /// Config from a secret and a lifetime in milliseconds
    #[must_use]
    pub fn new(secret_key: impl Into<String>, expiration_ms: u64) -> Self {
        Self {
            secret_key: SecretString::from(secret_key.into()),
            expiration_ms,
        }
    }

    /// Read `SECURITY_JWT_SECRET_KEY` and, optionally,
    /// `SECURITY_JWT_EXPIRATION_TIME`.
    ///
    /// # Errors
    /// Returns `TokenError::Configuration` if the secret is unset or the
    /// lifetime is not an unsigned integer.
    pub fn from_env() -> TokenResult<Self> {
        let secret = std::env::var(SECRET_KEY_ENV)
            .map_err(|_| TokenError::Configuration(format!("{SECRET_KEY_ENV} is not set")))?;

        let expiration_ms = match std::env::var(EXPIRATION_TIME_ENV) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                TokenError::Configuration(format!(
                    "{EXPIRATION_TIME_ENV} must be a whole number of milliseconds"
                ))
            })?,
            Err(_) => default_expiration_ms(),
        };

        Ok(Self::new(secret, expiration_ms))
    }

    /// Default lifetime as a duration
    #[inline]
    #[must_use]
    pub fn lifetime(&self) -> Duration {
        Duration::from_millis(self.expiration_ms)
    }

    pub(crate) fn secret(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_kebab_case_keys() {
        let config: TokenConfig = serde_json::from_str(
            r#"{"secret-key": "c2VjcmV0", "expiration-time": 900000}"#,
        )
        .expect("config parses");
        assert_eq!(config.secret(), "c2VjcmV0");
        assert_eq!(config.lifetime(), Duration::from_secs(900));
    }

    #[test]
    fn test_default_lifetime() {
        let config: TokenConfig =
            serde_json::from_str(r#"{"secret-key": "c2VjcmV0"}"#).expect("config parses");
        assert_eq!(config.lifetime(), Duration::from_secs(3600));
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = TokenConfig::new("dG9wLXNlY3JldA==", 1000);
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("dG9wLXNlY3JldA=="));
    }
}
