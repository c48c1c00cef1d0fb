// ============================================================================
// MenuQR API - Session Extractor
// File: crates/menuqr-api/src/middleware/auth.rs
// ============================================================================

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use menuqr_security::Session;

use crate::error::ApiError;
use crate::state::AppState;

/// The caller's session, decoded from `Authorization: Bearer <token>`.
/// Handlers taking this argument answer 401 without a valid token.
pub struct AuthSession(pub Session);

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".into()))?;

        Session::from_authorization_header(header, &state.decoder)
            .map(AuthSession)
            .map_err(|e| ApiError::Unauthorized(e.to_string()))
    }
}
