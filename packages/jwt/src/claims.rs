//! Claim set carried inside a token

use crate::error::{TokenError, TokenResult};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Subject claim name
pub const SUBJECT: &str = "sub";
/// Issued-at claim name
pub const ISSUED_AT: &str = "iat";
/// Expiration claim name
pub const EXPIRATION: &str = "exp";

/// Claim names owned by the issuer; caller-supplied values under these
/// names are discarded.
pub const RESERVED_CLAIMS: [&str; 3] = [SUBJECT, ISSUED_AT, EXPIRATION];

/// Decoded or to-be-encoded token payload.
///
/// Timestamps hold whole seconds, matching the `iat`/`exp` wire encoding,
/// so a claim set compares equal to itself after a round trip. Deserializing
/// goes through [`ClaimSet::new`], so a payload with an empty subject or
/// `exp < iat` is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawClaimSet")]
pub struct ClaimSet {
    #[serde(rename = "sub")]
    subject: String,
    #[serde(rename = "iat", with = "chrono::serde::ts_seconds")]
    issued_at: DateTime<Utc>,
    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    expiration: DateTime<Utc>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Wire shape of a payload before the claim checks run
#[derive(Deserialize)]
struct RawClaimSet {
    sub: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    iat: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    exp: DateTime<Utc>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<RawClaimSet> for ClaimSet {
    type Error = TokenError;

    fn try_from(raw: RawClaimSet) -> TokenResult<Self> {
        let mut claims = Self::new(raw.sub, raw.iat, raw.exp)?;
        claims.extra = raw.extra;
        Ok(claims)
    }
}

impl ClaimSet {
    /// Build a claim set with no extra claims.
    ///
    /// # Errors
    /// Returns `TokenError::InvalidClaims` if `subject` is empty or
    /// `expiration` precedes `issued_at`.
    pub fn new(
        subject: impl Into<String>,
        issued_at: DateTime<Utc>,
        expiration: DateTime<Utc>,
    ) -> TokenResult<Self> {
        let subject = subject.into();
        if subject.is_empty() {
            return Err(TokenError::invalid_claims("subject cannot be empty"));
        }

        let issued_at = issued_at.trunc_subsecs(0);
        let expiration = expiration.trunc_subsecs(0);
        if expiration < issued_at {
            return Err(TokenError::invalid_claims(
                "expiration must not precede issued-at",
            ));
        }

        Ok(Self {
            subject,
            issued_at,
            expiration,
            extra: Map::new(),
        })
    }

    /// Merge caller claims. Reserved names are dropped so `sub`, `iat` and
    /// `exp` always keep the values this claim set was built with.
    #[must_use]
    pub fn with_extra_claims(mut self, claims: Map<String, Value>) -> Self {
        for (name, value) in claims {
            self = self.with_claim(name, value);
        }
        self
    }

    /// Add one extra claim; ignored for reserved names
    #[must_use]
    pub fn with_claim(mut self, name: impl Into<String>, value: Value) -> Self {
        let name = name.into();
        if is_reserved(&name) {
            tracing::debug!(claim = %name, "Ignoring caller value for reserved claim");
        } else {
            self.extra.insert(name, value);
        }
        self
    }

    /// Identity the token was issued for
    #[inline]
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Issue time
    #[inline]
    #[must_use]
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Expiration time
    #[inline]
    #[must_use]
    pub fn expiration(&self) -> DateTime<Utc> {
        self.expiration
    }

    /// Non-reserved claims
    #[inline]
    #[must_use]
    pub fn extra_claims(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Any claim by name, reserved ones rendered as their wire JSON
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        match name {
            SUBJECT => Some(Value::String(self.subject.clone())),
            ISSUED_AT => Some(Value::from(self.issued_at.timestamp())),
            EXPIRATION => Some(Value::from(self.expiration.timestamp())),
            _ => self.extra.get(name).cloned(),
        }
    }

    /// True once `now` has reached the expiration instant
    #[inline]
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration <= now
    }
}

/// Whether `name` is one of the issuer-owned claims
#[inline]
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_CLAIMS.contains(&name)
}
