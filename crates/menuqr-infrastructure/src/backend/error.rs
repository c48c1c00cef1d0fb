// ============================================================================
// MenuQR Infrastructure - Backend Errors
// File: crates/menuqr-infrastructure/src/backend/error.rs
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use menuqr_core::DomainError;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    Status {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("No rows returned from {0}")]
    NoRows(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Invalid backend configuration: {0}")]
    Config(String),
}

impl BackendError {
    /// Builds a status error from a PostgREST or auth error body.
    pub fn from_body(status: u16, body: &str) -> Self {
        let parsed: Option<Value> = serde_json::from_str(body).ok();
        let field = |name: &str| -> Option<String> {
            parsed.as_ref()?.get(name).and_then(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
        };

        let code = field("error_code").or_else(|| field("code")).or_else(|| field("error"));
        let message = field("message")
            .or_else(|| field("msg"))
            .or_else(|| field("error_description"))
            .or_else(|| field("error"))
            .unwrap_or_else(|| if body.is_empty() { format!("HTTP {}", status) } else { body.to_string() });

        BackendError::Status { status, code, message }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            BackendError::Status { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

impl From<BackendError> for DomainError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::NoRows(table) => DomainError::NotFound(table),
            BackendError::Status { status, code, message } => match (status, code.as_deref()) {
                (_, Some("invalid_grant" | "invalid_credentials")) => DomainError::InvalidCredentials,
                (_, Some("user_already_exists" | "email_exists")) => DomainError::EmailAlreadyExists(message),
                (401 | 403, _) => DomainError::Unauthorized,
                (_, Some("PGRST116")) | (404, _) => DomainError::NotFound(message),
                (_, Some("23505")) | (409, _) => DomainError::Conflict(message),
                (_, Some("22P02" | "23502" | "23514" | "weak_password")) | (422, _) => {
                    DomainError::ValidationError(message)
                }
                _ => DomainError::BackendError(format!("{}: {}", status, message)),
            },
            other => DomainError::BackendError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgrest_error_body() {
        let err = BackendError::from_body(
            406,
            r#"{"code":"PGRST116","details":"The result contains 0 rows","hint":null,"message":"JSON object requested, multiple (or no) rows returned"}"#,
        );
        assert_eq!(err.code(), Some("PGRST116"));
        assert!(matches!(DomainError::from(err), DomainError::NotFound(_)));
    }

    #[test]
    fn test_auth_error_bodies() {
        let err = BackendError::from_body(400, r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#);
        assert_eq!(DomainError::from(err), DomainError::InvalidCredentials);

        let err = BackendError::from_body(422, r#"{"code":422,"error_code":"user_already_exists","msg":"User already registered"}"#);
        assert_eq!(
            DomainError::from(err),
            DomainError::EmailAlreadyExists("User already registered".into())
        );
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(DomainError::from(BackendError::from_body(401, "")), DomainError::Unauthorized);
        assert!(matches!(
            DomainError::from(BackendError::from_body(409, r#"{"code":"23505","message":"duplicate key"}"#)),
            DomainError::Conflict(_)
        ));
        assert!(matches!(
            DomainError::from(BackendError::from_body(503, "upstream down")),
            DomainError::BackendError(_)
        ));
    }
}
