//! HTTP-facing error type.
//!
//! Every failure a handler can produce maps onto one [`AppError`] variant, which
//! renders as a JSON body of the form:
//!
//! ```json
//! { "error": "Rate limit exceeded", "rate_limit_reset": 12 }
//! ```
//!
//! The `error` field is always present; any object passed as `details` is merged
//! into the top level of the body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};
use validator::ValidationErrors;

use crate::infrastructure::store::StoreError;

#[derive(Debug)]
pub enum AppError {
    /// Malformed body or invalid input (400).
    Validation { message: String, details: Value },
    /// Request refused by policy, e.g. a short code already in use (403).
    Forbidden { message: String, details: Value },
    NotFound { message: String, details: Value },
    /// Quota exhausted or destination blocked (503).
    Unavailable { message: String, details: Value },
    /// Store failure or other dependency error (500).
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
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
    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
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

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message, .. }
            | Self::Forbidden { message, .. }
            | Self::NotFound { message, .. }
            | Self::Unavailable { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }

    fn into_body(self) -> Value {
        let (message, details) = match self {
            Self::Validation { message, details }
            | Self::Forbidden { message, details }
            | Self::NotFound { message, details }
            | Self::Unavailable { message, details }
            | Self::Internal { message, details } => (message, details),
        };

        let mut body = Map::new();
        if let Value::Object(extra) = details {
            body.extend(extra);
        }
        body.insert("error".to_string(), Value::String(message));

        Value::Object(body)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message(), self.status())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(self.into_body())).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        tracing::error!(error = %e, "Store call failed");
        AppError::internal("Unable to reach the store", json!({}))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(e: ValidationErrors) -> Self {
        AppError::bad_request(
            "Validation failed",
            json!({ "fields": serde_json::to_value(&e).unwrap_or_default() }),
        )
    }
}
