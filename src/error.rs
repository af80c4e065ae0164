//! Error taxonomy shared by the registry, the stores and the HTTP layer.
//!
//! Every fallible operation in the crate returns [`AppError`]. JSON endpoints
//! render it through [`IntoResponse`]; the redirect endpoint renders its own
//! plain-text bodies (see [`crate::api::handlers::redirect`]).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

/// Error body returned by JSON endpoints.
///
/// `error` is a plain message string that clients can show as is.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Bad or missing input.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// No link exists for the requested code.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The store rejected a write because the code already exists.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// The store is unreachable, timed out, or failed unexpectedly.
    ///
    /// `message` is the internal diagnostic and is never sent to clients;
    /// they only see the opaque `reference`.
    #[error("persistence failure ({reference}): {message}")]
    Persistence { message: String, reference: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
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

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    /// Builds a persistence error with a fresh correlation reference and logs
    /// the diagnostic under that reference.
    pub fn persistence(message: impl Into<String>) -> Self {
        let message = message.into();
        let reference = Uuid::new_v4().to_string();
        tracing::error!(%reference, "persistence failure: {}", message);
        Self::Persistence { message, reference }
    }

    /// Machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::Persistence { .. } => "persistence_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Correlation reference of a persistence error.
    pub fn reference(&self) -> Option<&str> {
        match self {
            AppError::Persistence { reference, .. } => Some(reference),
            _ => None,
        }
    }

    /// Converts the error into the body sent to clients, stripping internal
    /// diagnostics from persistence failures.
    pub fn to_body(&self) -> ErrorBody {
        match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details } => ErrorBody {
                error: message.clone(),
                code: self.kind(),
                details: details.clone(),
                reference: None,
            },
            AppError::Persistence { reference, .. } => ErrorBody {
                error: "Internal server error".to_string(),
                code: self.kind(),
                details: Value::Null,
                reference: Some(reference.clone()),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_body())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        AppError::persistence(format!("database error: {e}"))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());

        AppError::bad_request(message, json!({ "fields": errors }))
    }
}
