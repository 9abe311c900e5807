//! Process-wide token service
//!
//! Built once from `TokenConfig` at startup and shared (typically behind an
//! `Arc`) by every request handler. Holds no mutable state.

use crate::{
    claims::ClaimSet,
    config::TokenConfig,
    decoder::TokenDecoder,
    encoder::TokenEncoder,
    error::{TokenError, TokenResult},
    extractor::{ClaimExtractor, IssuedAtExtractor},
    identity::Identity,
    key::SigningKey,
    logging::log_token_issued,
    types::Token,
    validator::TokenValidator,
};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::time::Duration;

/// Per-issuance settings; defaults to no extra claims and the configured
/// lifetime
#[derive(Debug, Clone, Default)]
pub struct IssueOptions {
    extra_claims: Map<String, Value>,
    lifetime: Option<Duration>,
}

impl IssueOptions {
    /// Defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one extra claim
    #[must_use]
    pub fn with_claim(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra_claims.insert(name.into(), value);
        self
    }

    /// Replace the extra claims
    #[must_use]
    pub fn with_extra_claims(mut self, claims: Map<String, Value>) -> Self {
        self.extra_claims = claims;
        self
    }

    /// Override the configured lifetime
    #[must_use]
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = Some(lifetime);
        self
    }
}

/// Issues and checks HS256 identity tokens
#[derive(Debug)]
pub struct TokenService {
    key: SigningKey,
    default_lifetime: Duration,
}

impl TokenService {
    /// Derive the signing key from `config`.
    ///
    /// # Errors
    /// Returns `TokenError::Configuration` if the secret is not base64.
    pub fn new(config: &TokenConfig) -> TokenResult<Self> {
        let key = SigningKey::from_base64_secret(config.secret())?;
        Ok(Self::from_key(key, config.lifetime()))
    }

    /// Service over an existing key
    #[must_use]
    pub fn from_key(key: SigningKey, default_lifetime: Duration) -> Self {
        Self {
            key,
            default_lifetime,
        }
    }

    /// Lifetime applied when `IssueOptions` does not set one
    #[inline]
    #[must_use]
    pub fn default_lifetime(&self) -> Duration {
        self.default_lifetime
    }

    /// Encoder over this service's key
    #[inline]
    #[must_use]
    pub fn encoder(&self) -> TokenEncoder<'_> {
        TokenEncoder::new(&self.key)
    }

    /// Decoder over this service's key
    #[inline]
    #[must_use]
    pub fn decoder(&self) -> TokenDecoder<'_> {
        TokenDecoder::new(&self.key)
    }

    /// Validator over this service's key
    #[inline]
    #[must_use]
    pub fn validator(&self) -> TokenValidator<'_> {
        TokenValidator::new(self.decoder())
    }

    /// Issue a token for `subject`.
    ///
    /// The clock is read once; `iat` is that instant and `exp` is
    /// `iat + lifetime`. Caller claims named `sub`, `iat` or `exp` are
    /// discarded.
    ///
    /// # Errors
    /// Returns `TokenError::InvalidClaims` for an empty subject or a
    /// lifetime past the representable range.
    pub fn issue(&self, subject: &str, options: IssueOptions) -> TokenResult<Token> {
        self.issue_at(subject, options, Utc::now())
    }

    /// `issue` with the configured lifetime and no extra claims
    ///
    /// # Errors
    /// See [`TokenService::issue`].
    pub fn issue_default(&self, subject: &str) -> TokenResult<Token> {
        self.issue(subject, IssueOptions::default())
    }

    /// `issue` against an explicit issue instant
    ///
    /// # Errors
    /// See [`TokenService::issue`].
    pub fn issue_at(
        &self,
        subject: &str,
        options: IssueOptions,
        issued_at: DateTime<Utc>,
    ) -> TokenResult<Token> {
        let lifetime = options.lifetime.unwrap_or(self.default_lifetime);
        let lifetime = chrono::Duration::from_std(lifetime)
            .map_err(|_| TokenError::invalid_claims("lifetime is out of range"))?;
        let expiration = issued_at
            .checked_add_signed(lifetime)
            .ok_or_else(|| TokenError::invalid_claims("expiration is out of range"))?;

        let extra_count = options.extra_claims.len();
        let claims = ClaimSet::new(subject, issued_at, expiration)?
            .with_extra_claims(options.extra_claims);
        let token = self.encoder().encode(&claims)?;

        log_token_issued(subject, claims.expiration(), extra_count);
        Ok(token)
    }

    /// Verify `token` and return all of its claims
    ///
    /// # Errors
    /// Propagates decode errors.
    pub fn extract_all_claims(&self, token: &str) -> TokenResult<ClaimSet> {
        self.decoder().decode(token)
    }

    /// Verify `token` and apply `extractor` to its claims
    ///
    /// # Errors
    /// Propagates decode and extractor errors.
    pub fn extract_claim<E: ClaimExtractor>(
        &self,
        token: &str,
        extractor: E,
    ) -> TokenResult<E::Output> {
        self.validator().extract_claim(token, extractor)
    }

    /// Subject of a verified token
    ///
    /// # Errors
    /// Propagates decode errors.
    pub fn extract_username(&self, token: &str) -> TokenResult<String> {
        self.validator().extract_username(token)
    }

    /// Expiration of a verified token
    ///
    /// # Errors
    /// Propagates decode errors.
    pub fn extract_expiration(&self, token: &str) -> TokenResult<DateTime<Utc>> {
        self.validator().extract_expiration(token)
    }

    /// Issue time of a verified token
    ///
    /// # Errors
    /// Propagates decode errors.
    pub fn extract_issued_at(&self, token: &str) -> TokenResult<DateTime<Utc>> {
        self.extract_claim(token, IssuedAtExtractor)
    }

    /// See [`TokenValidator::is_valid`]
    ///
    /// # Errors
    /// Propagates decode errors.
    pub fn is_valid<I: Identity + ?Sized>(
        &self,
        token: &str,
        identity: &I,
    ) -> TokenResult<bool> {
        self.validator().is_valid(token, identity)
    }

    /// See [`TokenValidator::accepts`]
    #[must_use]
    pub fn accepts<I: Identity + ?Sized>(&self, token: &str, identity: &I) -> bool {
        self.validator().accepts(token, identity)
    }
}
