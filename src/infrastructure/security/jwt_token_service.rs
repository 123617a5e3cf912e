use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::application::ports::{CredentialError, TokenService};
use crate::domain::value_objects::UserId;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // User ID
    exp: usize,  // Expiration time
    iat: usize,  // Issued at
}

/// HS256 bearer tokens whose subject is the user id
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtTokenService {
    pub fn new(secret: &[u8], ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl: Duration::seconds(i64::try_from(ttl_secs).unwrap_or(i64::MAX).min(i64::MAX / 1000)),
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: &UserId) -> Result<String, CredentialError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| CredentialError::Token("expiry out of range".to_string()))?;

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| CredentialError::Token(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<UserId, CredentialError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| CredentialError::Token(e.to_string()))?;

        data.claims
            .sub
            .parse()
            .map_err(|e: uuid::Error| CredentialError::Token(format!("bad subject: {e}")))
    }
}
