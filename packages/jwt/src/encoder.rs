//! Compact HS256 token encoding

use crate::{
    claims::ClaimSet,
    error::{TokenError, TokenResult},
    key::SigningKey,
    types::{JwtHeader, Token},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

/// Signs claim sets into compact tokens
#[derive(Debug, Clone, Copy)]
pub struct TokenEncoder<'k> {
    key: &'k SigningKey,
}

impl<'k> TokenEncoder<'k> {
    /// Encoder borrowing a shared key
    #[must_use]
    pub fn new(key: &'k SigningKey) -> Self {
        Self { key }
    }

    /// Serialize and sign `claims`.
    ///
    /// Output is `base64url(header).base64url(payload).base64url(hmac)`.
    ///
    /// # Errors
    /// Returns `TokenError::Serialization` if the claims cannot be encoded
    /// as JSON.
    pub fn encode(&self, claims: &ClaimSet) -> TokenResult<Token> {
        let header_json = serde_json::to_vec(&JwtHeader::hs256())
            .map_err(|e| TokenError::serialization(&e.to_string()))?;
        let claims_json =
            serde_json::to_vec(claims).map_err(|e| TokenError::serialization(&e.to_string()))?;

        let header_b64 = URL_SAFE_NO_PAD.encode(&header_json);
        let claims_b64 = URL_SAFE_NO_PAD.encode(&claims_json);

        let mut signing_input = String::with_capacity(header_b64.len() + 1 + claims_b64.len());
        signing_input.push_str(&header_b64);
        signing_input.push('.');
        signing_input.push_str(&claims_b64);

        let signature = self.key.sign(signing_input.as_bytes())?;
        let signature_b64 = URL_SAFE_NO_PAD.encode(signature);

        let mut compact = String::with_capacity(signing_input.len() + 1 + signature_b64.len());
        compact.push_str(&signing_input);
        compact.push('.');
        compact.push_str(&signature_b64);

        Ok(Token::from_compact(compact))
    }
}
