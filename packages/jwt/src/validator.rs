//! Token usability checks for a given identity

use crate::{
    claims::ClaimSet,
    decoder::TokenDecoder,
    error::TokenResult,
    extractor::{ClaimExtractor, ExpirationExtractor, SubjectExtractor},
    identity::Identity,
    logging::log_token_rejected,
};
use chrono::{DateTime, Utc};

/// Answers "is this token usable for this identity now?"
#[derive(Debug, Clone, Copy)]
pub struct TokenValidator<'k> {
    decoder: TokenDecoder<'k>,
}

impl<'k> TokenValidator<'k> {
    /// Validator on top of `decoder`
    #[must_use]
    pub fn new(decoder: TokenDecoder<'k>) -> Self {
        Self { decoder }
    }

    /// Decode once and apply `extractor`.
    ///
    /// # Errors
    /// Propagates decode errors and any error from the extractor.
    pub fn extract_claim<E: ClaimExtractor>(
        &self,
        token: &str,
        extractor: E,
    ) -> TokenResult<E::Output> {
        let claims = self.decoder.decode(token)?;
        extractor.extract(&claims)
    }

    /// Subject of a verified token
    ///
    /// # Errors
    /// Propagates decode errors.
    pub fn extract_username(&self, token: &str) -> TokenResult<String> {
        self.extract_claim(token, SubjectExtractor)
    }

    /// Expiration of a verified token
    ///
    /// # Errors
    /// Propagates decode errors.
    pub fn extract_expiration(&self, token: &str) -> TokenResult<DateTime<Utc>> {
        self.extract_claim(token, ExpirationExtractor)
    }

    /// True when the token verifies, names `identity` and has not expired.
    ///
    /// Expired or wrong-subject tokens give `Ok(false)`.
    ///
    /// # Errors
    /// Propagates decode errors; callers must treat them as "not valid".
    pub fn is_valid<I: Identity + ?Sized>(
        &self,
        token: &str,
        identity: &I,
    ) -> TokenResult<bool> {
        self.is_valid_at(token, identity, Utc::now())
    }

    /// `is_valid` against an explicit clock reading
    ///
    /// # Errors
    /// Propagates decode errors.
    pub fn is_valid_at<I: Identity + ?Sized>(
        &self,
        token: &str,
        identity: &I,
        now: DateTime<Utc>,
    ) -> TokenResult<bool> {
        let claims = self.decoder.decode(token)?;
        Ok(claims_match(&claims, identity, now))
    }

    /// `is_valid` with decode failures folded into `false`
    #[must_use]
    pub fn accepts<I: Identity + ?Sized>(&self, token: &str, identity: &I) -> bool {
        match self.is_valid(token, identity) {
            Ok(valid) => valid,
            Err(e) => {
                log_token_rejected("accepts", &e);
                false
            }
        }
    }
}

/// Subject equals the username and `now` is strictly before expiration
#[must_use]
pub fn claims_match<I: Identity + ?Sized>(
    claims: &ClaimSet,
    identity: &I,
    now: DateTime<Utc>,
) -> bool {
    claims.subject() == identity.username() && !is_expired(claims, now)
}

/// True once `now` has reached the expiration instant
#[inline]
#[must_use]
pub fn is_expired(claims: &ClaimSet, now: DateTime<Utc>) -> bool {
    claims.is_expired_at(now)
}
