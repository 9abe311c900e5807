//! Typed claim extraction
//!
//! A token is decoded once and an extractor picks the value the caller
//! needs. Built-in extractors cover the reserved claims; `FieldExtractor`
//! deserializes any named claim, and plain closures over `&ClaimSet` work
//! too.

use crate::{
    claims::ClaimSet,
    error::{TokenError, TokenResult},
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use std::{fmt, marker::PhantomData};

/// Selects a value from a verified claim set
pub trait ClaimExtractor {
    /// Extracted value type
    type Output;

    /// Pull the value out of `claims`.
    ///
    /// # Errors
    /// Implementations return `TokenError::InvalidClaims` when the claim
    /// exists but has the wrong shape.
    fn extract(&self, claims: &ClaimSet) -> TokenResult<Self::Output>;
}

impl<F, T> ClaimExtractor for F
where
    F: Fn(&ClaimSet) -> T,
{
    type Output = T;

    #[inline]
    fn extract(&self, claims: &ClaimSet) -> TokenResult<T> {
        Ok(self(claims))
    }
}

/// Extracts the `sub` claim
#[derive(Debug, Clone, Copy, Default)]
pub struct SubjectExtractor;

impl ClaimExtractor for SubjectExtractor {
    type Output = String;

    #[inline]
    fn extract(&self, claims: &ClaimSet) -> TokenResult<String> {
        Ok(claims.subject().to_string())
    }
}

/// Extracts the `exp` claim
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpirationExtractor;

impl ClaimExtractor for ExpirationExtractor {
    type Output = DateTime<Utc>;

    #[inline]
    fn extract(&self, claims: &ClaimSet) -> TokenResult<DateTime<Utc>> {
        Ok(claims.expiration())
    }
}

/// Extracts the `iat` claim
#[derive(Debug, Clone, Copy, Default)]
pub struct IssuedAtExtractor;

impl ClaimExtractor for IssuedAtExtractor {
    type Output = DateTime<Utc>;

    #[inline]
    fn extract(&self, claims: &ClaimSet) -> TokenResult<DateTime<Utc>> {
        Ok(claims.issued_at())
    }
}

/// Deserializes a named claim into `T`; `None` when the claim is absent
pub struct FieldExtractor<T> {
    name: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> FieldExtractor<T> {
    /// Extractor for the claim called `name`
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            _marker: PhantomData,
        }
    }

    /// Claim name this extractor reads
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> fmt::Debug for FieldExtractor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldExtractor")
            .field("name", &self.name)
            .finish()
    }
}

impl<T: DeserializeOwned> ClaimExtractor for FieldExtractor<T> {
    type Output = Option<T>;

    fn extract(&self, claims: &ClaimSet) -> TokenResult<Option<T>> {
        claims
            .get(&self.name)
            .map(|value| {
                serde_json::from_value(value).map_err(|e| {
                    TokenError::InvalidClaims(format!("claim '{}': {e}", self.name))
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn claims() -> ClaimSet {
        let iat = Utc.timestamp_opt(100, 0).single().expect("valid timestamp");
        let exp = Utc.timestamp_opt(200, 0).single().expect("valid timestamp");
        ClaimSet::new("alice", iat, exp)
            .expect("valid claims")
            .with_claim("role", json!("admin"))
            .with_claim("scopes", json!(["read", "write"]))
    }

    #[test]
    fn test_reserved_extractors() {
        let claims = claims();
        assert_eq!(SubjectExtractor.extract(&claims).expect("subject"), "alice");
        assert_eq!(
            ExpirationExtractor.extract(&claims).expect("exp").timestamp(),
            200
        );
        assert_eq!(
            IssuedAtExtractor.extract(&claims).expect("iat").timestamp(),
            100
        );
    }

    #[test]
    fn test_field_extractor_typed() {
        let claims = claims();
        let scopes = FieldExtractor::<Vec<String>>::new("scopes")
            .extract(&claims)
            .expect("scopes decode");
        assert_eq!(scopes, Some(vec!["read".to_string(), "write".to_string()]));

        let exp = FieldExtractor::<i64>::new("exp")
            .extract(&claims)
            .expect("exp decodes");
        assert_eq!(exp, Some(200));
    }

    #[test]
    fn test_field_extractor_missing_and_mismatched() {
        let claims = claims();
        let missing = FieldExtractor::<String>::new("email")
            .extract(&claims)
            .expect("absent claim is not an error");
        assert_eq!(missing, None);

        let err = FieldExtractor::<u32>::new("role")
            .extract(&claims)
            .unwrap_err();
        assert!(matches!(err, TokenError::InvalidClaims(_)));
    }

    #[test]
    fn test_field_extractor_debug_names_claim() {
        let rendered = format!("{:?}", FieldExtractor::<Vec<String>>::new("scopes"));
        assert_eq!(rendered, r#"FieldExtractor { name: "scopes" }"#);
    }

    #[test]
    fn test_closure_extractor() {
        let claims = claims();
        let count = (|c: &ClaimSet| c.extra_claims().len())
            .extract(&claims)
            .expect("closure extracts");
        assert_eq!(count, 2);
    }
}
