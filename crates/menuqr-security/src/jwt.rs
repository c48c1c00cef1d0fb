//! Access token decoding

use chrono::Utc;
use jsonwebtoken::errors::{Error as TokenError, ErrorKind};
use jsonwebtoken::{dangerous, decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
    #[error("Token subject is not a valid id: {0}")]
    InvalidSubject(String),
}

/// Claims carried by backend-issued access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Decodes access tokens issued by the backend auth service.
///
/// The backend signs tokens with HS256. When the secret is known the signature
/// is verified, otherwise only structure and expiry are checked and the
/// backend remains the authority on every call the token is attached to.
pub struct TokenDecoder {
    secret: Option<String>,
}

impl TokenDecoder {
    pub fn new(secret: Option<String>) -> Self {
        Self { secret }
    }

    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let Some(secret) = &self.secret else {
            return Self::decode_unverified(token);
        };

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;

        decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
            .map(|data| data.claims)
            .map_err(token_error)
    }

    fn decode_unverified(token: &str) -> Result<Claims, JwtError> {
        let claims = dangerous::insecure_decode::<Claims>(token).map_err(token_error)?.claims;
        if claims.exp <= Utc::now().timestamp() {
            return Err(JwtError::TokenExpired);
        }
        Ok(claims)
    }
}

fn token_error(e: TokenError) -> JwtError {
    match e.kind() {
        ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        _ => JwtError::ValidationError(e.to_string()),
    }
}
