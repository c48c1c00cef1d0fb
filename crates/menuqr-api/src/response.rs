//! API Response wrapper

use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    /// User-facing message when the backend could not complete the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            notice: None,
            error: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// The request was valid but the backend failed; nothing to show.
    pub fn notice(message: &str) -> Self {
        Self {
            success: false,
            data: None,
            notice: Some(message.to_string()),
            error: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn from_option(data: Option<T>, notice: &str) -> Self {
        match data {
            Some(data) => Self::success(data),
            None => Self::notice(notice),
        }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            notice: None,
            error: Some(ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
            }),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl ApiResponse<()> {
    pub fn from_flag(ok: bool, notice: &str) -> Self {
        if ok {
            Self::success(())
        } else {
            Self::notice(notice)
        }
    }
}
