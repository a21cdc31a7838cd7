//! Unified error taxonomy (§7) and its mapping onto HTTP responses.
//!
//! A single enum, `thiserror` for `Display`/`Error`, and small
//! classification helpers instead of scattering `match`es over variants
//! at every call site.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

// Layer 3: Internal module imports
use crate::VERSION;

/// Field-level validation failures raised by request parsers (§4.4).
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid value for field {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Top-level control-plane error. Every handler returns
/// `Result<T, AppError>`; the `IntoResponse` impl below is the single
/// place request failures are translated into the `{status, message,
/// version}` error envelope (§6, §7).
#[derive(Debug, Error)]
pub enum AppError {
    /// Actor / execution / worker / permission record absent (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Required field missing, type mismatch, invalid permission level (400).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// `x-abaco-tenant` or `x-abaco-user` missing from the request (401).
    /// Distinct from [`Self::Authorization`]: this is "who are you", not
    /// "you can't do that".
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Caller lacks required level, or tenant mismatch (403).
    #[error("authorization denied: {0}")]
    Authorization(String),

    /// Body could not be deserialized, or a stateless-actor state
    /// operation (returned as 404 — preserved source behavior, §9
    /// Open Question 1) (400/404).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Underlying worker store cannot satisfy the lookup (404).
    #[error("worker error: {0}")]
    Worker(String),

    /// Underlying permissions store cannot satisfy the lookup (404).
    #[error("permissions error: {0}")]
    Permissions(String),

    /// Store/channel I/O failure not otherwise classified (500).
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stateless-actor state mutation is deliberately returned as 404,
    /// matching the source's observed (if non-conventional) behavior
    /// rather than the more RESTful 409/400 — see §9 Open Question 1.
    pub fn stateless_actor(actor_id: &str) -> Self {
        Self::NotFound(format!(
            "actor {actor_id} is stateless; state operations are unavailable"
        ))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Authorization(_) => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::Worker(_) => StatusCode::NOT_FOUND,
            Self::Permissions(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        let body = json!({
            "status": "error",
            "message": self.to_string(),
            "version": VERSION,
        });
        (status, axum::Json(body)).into_response()
    }
}
