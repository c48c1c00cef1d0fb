//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use menuqr_core::error::DomainError;

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Backend unavailable: {0}")]
    BadGateway(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Unauthorized => ApiError::Unauthorized("Please sign in again".into()),
            DomainError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            DomainError::NotFound(what) => ApiError::NotFound(what),
            DomainError::EmailAlreadyExists(_)
            | DomainError::Conflict(_)
            | DomainError::InvalidReorderState(_) => ApiError::Conflict(err.to_string()),
            DomainError::BackendError(msg) | DomainError::RowDecode { reason: msg, .. } => ApiError::BadGateway(msg),
            DomainError::InternalError(msg) => ApiError::InternalError(msg),
            other if other.is_validation() => ApiError::BadRequest(other.to_string()),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg)
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NOT_FOUND", msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
            }
            ApiError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (StatusCode::CONFLICT, "CONFLICT", msg)
            }
            ApiError::BadGateway(msg) => {
                tracing::error!("Backend error: {}", msg);
                (StatusCode::BAD_GATEWAY, "BACKEND_ERROR", msg)
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg)
            }
        };

        (status, Json(ApiResponse::<()>::error(code, &message))).into_response()
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;
