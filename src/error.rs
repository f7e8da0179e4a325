//! Application error type shared by services and HTTP handlers.
//!
//! Every variant maps to a caller-visible failure of the shortcode registry.
//! Handlers return [`AppError`] directly; Axum renders it through
//! [`IntoResponse`] as a JSON body of the form:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Shortcode not found", "details": {} } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    InvalidUrl { message: String, details: Value },
    #[error("{message}")]
    InvalidShortcode { message: String, details: Value },
    #[error("{message}")]
    InvalidValidity { message: String, details: Value },
    #[error("{message}")]
    ShortcodeConflict { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Expired { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_shortcode(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidShortcode {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_validity(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidValidity {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::ShortcodeConflict {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn expired(message: impl Into<String>, details: Value) -> Self {
        Self::Expired {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidUrl { .. } => "invalid_url",
            AppError::InvalidShortcode { .. } => "invalid_shortcode",
            AppError::InvalidValidity { .. } => "invalid_validity",
            AppError::ShortcodeConflict { .. } => "shortcode_conflict",
            AppError::NotFound { .. } => "not_found",
            AppError::Expired { .. } => "expired",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl { .. }
            | AppError::InvalidShortcode { .. }
            | AppError::InvalidValidity { .. } => StatusCode::BAD_REQUEST,
            AppError::ShortcodeConflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Expired { .. } => StatusCode::GONE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::InvalidUrl { message, details }
            | AppError::InvalidShortcode { message, details }
            | AppError::InvalidValidity { message, details }
            | AppError::ShortcodeConflict { message, details }
            | AppError::NotFound { message, details }
            | AppError::Expired { message, details }
            | AppError::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

/// Maps `validator` failures onto the registry taxonomy by field name.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors.field_errors();
        let details = json!({ "fields": fields.keys().map(|k| k.to_string()).collect::<Vec<_>>() });

        if fields.contains_key("long_url") {
            AppError::invalid_url("URL is too long", details)
        } else if fields.contains_key("code") {
            AppError::invalid_shortcode("Invalid shortcode", details)
        } else if fields.contains_key("validity_minutes") {
            AppError::invalid_validity("Validity must be a positive number of minutes", details)
        } else {
            AppError::internal("Request validation failed", details)
        }
    }
}
