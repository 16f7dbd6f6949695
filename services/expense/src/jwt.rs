//! JWT verification for the credential verifier
//!
//! Tokens are issued by the auth service and signed with HS256 using a
//! secret shared with this service. The only claim this service relies on
//! is `id`, the user the token was issued to.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::Error,
    get_current_timestamp,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub id: Uuid,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// Signs and verifies tokens with the shared secret
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    /// Initialize a new JWT service from the shared secret
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        JwtService {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign an arbitrary set of claims
    pub fn encode_claims(&self, claims: &Claims) -> Result<String, Error> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
    }

    /// Issue a token for `user_id` that expires after `ttl`
    pub fn issue_token(&self, user_id: Uuid, ttl: Duration) -> Result<String, Error> {
        let now = get_current_timestamp();
        let claims = Claims {
            id: user_id,
            iat: now,
            exp: now + ttl.as_secs(),
        };
        self.encode_claims(&claims)
    }

    /// Validate a token's signature and expiry and return its claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, Error> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}
