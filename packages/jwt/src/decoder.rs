//! Signature verification and claim decoding

use crate::{
    claims::ClaimSet,
    error::{TokenError, TokenResult},
    key::SigningKey,
    types::{HS256, JwtHeader},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

/// Verifies compact tokens and decodes their claims.
///
/// Decoding fails closed: nothing from the payload is returned unless the
/// header names HS256 and the signature matches. Expiration is left to the
/// caller.
#[derive(Debug, Clone, Copy)]
pub struct TokenDecoder<'k> {
    key: &'k SigningKey,
}

impl<'k> TokenDecoder<'k> {
    /// Decoder borrowing a shared key
    #[must_use]
    pub fn new(key: &'k SigningKey) -> Self {
        Self { key }
    }

    /// Verify `token` and return its claims.
    ///
    /// # Errors
    /// - `MalformedToken` if the token is not three segments, or the header
    ///   or payload is not base64url JSON of the expected shape
    /// - `UnsupportedAlgorithm` if the header names anything but HS256
    /// - `InvalidSignature` if the signature is undecodable or does not match
    pub fn decode(&self, token: &str) -> TokenResult<ClaimSet> {
        let mut parts = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::malformed("expected three dot-separated segments"));
        };

        let header_bytes = URL_SAFE_NO_PAD
            .decode(header_b64)
            .map_err(|_| TokenError::malformed("invalid header encoding"))?;
        let header: JwtHeader = serde_json::from_slice(&header_bytes)
            .map_err(|_| TokenError::malformed("invalid header JSON"))?;

        if header.alg != HS256 {
            return Err(TokenError::unsupported_algorithm(&header.alg));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::InvalidSignature)?;

        // Signing input is the encoded text exactly as received.
        let signing_input_len = header_b64.len() + 1 + claims_b64.len();
        let signing_input = &token.as_bytes()[..signing_input_len];
        if !self.key.verify(signing_input, &signature)? {
            return Err(TokenError::InvalidSignature);
        }

        // Only decode claims after signature verification succeeds
        let claims_bytes = URL_SAFE_NO_PAD
            .decode(claims_b64)
            .map_err(|_| TokenError::malformed("invalid payload encoding"))?;
        serde_json::from_slice(&claims_bytes)
            .map_err(|e| TokenError::MalformedToken(format!("invalid payload: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::TokenEncoder;
    use chrono::{TimeZone, Utc};

    fn key() -> SigningKey {
        SigningKey::from_bytes(vec![3u8; 32])
    }

    fn sign_raw(key: &SigningKey, header: &str, payload: &str) -> String {
        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(payload)
        );
        let signature = key.sign(signing_input.as_bytes()).expect("sign");
        format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(signature))
    }

    #[test]
    fn test_round_trip() {
        let key = key();
        let iat = Utc.timestamp_opt(1_000, 0).single().expect("valid timestamp");
        let exp = Utc.timestamp_opt(4_600, 0).single().expect("valid timestamp");
        let claims = ClaimSet::new("alice", iat, exp).expect("valid claims");
        let token = TokenEncoder::new(&key).encode(&claims).expect("encodes");

        let decoded = TokenDecoder::new(&key).decode(token.as_str()).expect("decodes");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_segment_count() {
        let key = key();
        let decoder = TokenDecoder::new(&key);
        for token in ["", "abc", "a.b", "a.b.c.d"] {
            assert!(
                matches!(decoder.decode(token), Err(TokenError::MalformedToken(_))),
                "{token:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_rejects_none_algorithm() {
        let key = key();
        let token = format!(
            "{}.{}.",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(r#"{"sub":"alice","iat":1,"exp":2}"#)
        );
        let err = TokenDecoder::new(&key).decode(&token).unwrap_err();
        assert_eq!(err, TokenError::UnsupportedAlgorithm("none".to_string()));
    }

    #[test]
    fn test_rejects_other_hmac_algorithms() {
        let key = key();
        let token = sign_raw(
            &key,
            r#"{"alg":"HS512","typ":"JWT"}"#,
            r#"{"sub":"alice","iat":1,"exp":2}"#,
        );
        let err = TokenDecoder::new(&key).decode(&token).unwrap_err();
        assert_eq!(err, TokenError::UnsupportedAlgorithm("HS512".to_string()));
    }

    #[test]
    fn test_header_must_be_json() {
        let key = key();
        let token = sign_raw(&key, "not json", r#"{"sub":"alice","iat":1,"exp":2}"#);
        assert!(matches!(
            TokenDecoder::new(&key).decode(&token),
            Err(TokenError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_signed_payload_missing_claims_is_malformed() {
        let key = key();
        let token = sign_raw(&key, r#"{"alg":"HS256"}"#, r#"{"sub":"alice","iat":1}"#);
        assert!(matches!(
            TokenDecoder::new(&key).decode(&token),
            Err(TokenError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_header_without_typ_decodes() {
        let key = key();
        let token = sign_raw(&key, r#"{"alg":"HS256"}"#, r#"{"sub":"alice","iat":1,"exp":2}"#);
        let claims = TokenDecoder::new(&key).decode(&token).expect("typ is optional");
        assert_eq!(claims.subject(), "alice");
        assert_eq!(claims.expiration().timestamp(), 2);
    }

    #[test]
    fn test_signed_payload_breaking_claim_rules_is_malformed() {
        let key = key();
        let decoder = TokenDecoder::new(&key);
        for payload in [
            r#"{"sub":"","iat":9999999999,"exp":9999999000}"#,
            r#"{"sub":"","iat":1,"exp":2}"#,
            r#"{"sub":"alice","iat":9999999999,"exp":9999999000}"#,
        ] {
            let token = sign_raw(&key, r#"{"alg":"HS256","typ":"JWT"}"#, payload);
            assert!(
                matches!(decoder.decode(&token), Err(TokenError::MalformedToken(_))),
                "{payload} should be malformed"
            );
        }
    }

    #[test]
    fn test_wrong_key_is_signature_error() {
        let iat = Utc.timestamp_opt(1_000, 0).single().expect("valid timestamp");
        let claims = ClaimSet::new("alice", iat, iat).expect("valid claims");
        let token = TokenEncoder::new(&key()).encode(&claims).expect("encodes");

        let other = SigningKey::from_bytes(vec![4u8; 32]);
        assert_eq!(
            TokenDecoder::new(&other).decode(token.as_str()).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn test_undecodable_signature_is_signature_error() {
        let key = key();
        let token = sign_raw(&key, r#"{"alg":"HS256"}"#, r#"{"sub":"a","iat":1,"exp":2}"#);
        let (signing_input, _) = token.rsplit_once('.').expect("three segments");
        let tampered = format!("{signing_input}.!!!");
        assert_eq!(
            TokenDecoder::new(&key).decode(&tampered).unwrap_err(),
            TokenError::InvalidSignature
        );
    }
}
