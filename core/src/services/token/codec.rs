//! Token codec: signing and verification of the claims payload

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Signs claims into opaque bearer strings and verifies them back.
///
/// Every decode failure - bad signature, malformed structure, elapsed
/// expiry - is collapsed into `TokenError::InvalidToken` so callers cannot
/// tell the cases apart and no signing-library error crosses this boundary.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a codec from the token service configuration
    pub fn new(config: &TokenServiceConfig) -> Self {
        let mut validation = Validation::new(config.algorithm);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            header: Header::new(config.algorithm),
            validation,
        }
    }

    /// Serializes and signs the claims payload
    ///
    /// # Returns
    /// * `Ok(String)` - The signed bearer string
    /// * `Err(DomainError)` - Signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&self.header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies signature and expiry, returning the embedded claims
    ///
    /// # Returns
    /// * `Ok(Claims)` - The decoded claims
    /// * `Err(DomainError)` - `InvalidToken` on any verification failure
    pub fn decode(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| DomainError::Token(TokenError::InvalidToken))
    }
}
