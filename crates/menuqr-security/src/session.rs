//! Session context passed explicitly into every authenticated backend call.

use chrono::{DateTime, TimeZone, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::jwt::{JwtError, TokenDecoder};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Missing bearer token")]
    MissingToken,
    #[error(transparent)]
    Token(#[from] JwtError),
}

/// An authenticated owner session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub profile_id: Uuid,
    pub email: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn from_access_token(token: &str, decoder: &TokenDecoder) -> Result<Self, SessionError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SessionError::MissingToken);
        }

        let claims = decoder.decode(token)?;
        let profile_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| JwtError::InvalidSubject(claims.sub.clone()))?;
        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or_else(|| JwtError::ValidationError(format!("invalid exp: {}", claims.exp)))?;

        Ok(Self {
            access_token: token.to_string(),
            profile_id,
            email: claims.email,
            expires_at,
        })
    }

    /// Parses an `Authorization` header value of the form `Bearer <token>`.
    pub fn from_authorization_header(header: &str, decoder: &TokenDecoder) -> Result<Self, SessionError> {
        let token = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
            .ok_or(SessionError::MissingToken)?;
        Self::from_access_token(token, decoder)
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}
