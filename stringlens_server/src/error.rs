use std::any::Any;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use stringlens_core::Error;
use tracing::error;

/// Error response returned by every handler.
///
/// Serializes as:
/// ```json
/// { "error": "Bad Request", "message": "...", "details": "...", "conflicts": ["..."] }
/// ```
/// where `details` and `conflicts` are only present when set.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ApiErrorBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<Vec<String>>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiErrorBody {
                error: status.canonical_reason().unwrap_or("Error").to_string(),
                message: message.into(),
                details: None,
                conflicts: None,
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Log `cause` and return a generic 500; the cause never reaches the client.
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        error!("Internal error while handling request: {cause}");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "An error occurred while processing the request",
        )
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.body.details = Some(details.into());
        self
    }

    #[must_use]
    pub fn with_conflicts(mut self, conflicts: Vec<String>) -> Self {
        self.body.conflicts = Some(conflicts);
        self
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub const fn body(&self) -> &ApiErrorBody {
        &self.body
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Convert a handler panic into a generic 500, logging the panic payload.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let cause = panic
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());
    ApiError::internal(format!("handler panicked: {cause}")).into_response()
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Duplicate(_) => Self::conflict("String already exists in the system"),
            Error::InvalidFilter { .. } => Self::bad_request(err.to_string()),
        }
    }
}
