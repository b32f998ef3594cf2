//! Application error type and its HTTP mapping.
//!
//! Every fallible operation in the service, repository and handler layers
//! returns [`AppError`]. The [`IntoResponse`] impl turns it into a JSON body
//! of the form:
//!
//! ```json
//! { "message": "URL not found", "code": "not_found" }
//! ```
//!
//! `details` is only serialized when it carries information.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Serialized error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input: bad URL, bad alias, bad query parameter or body.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The requested custom alias is already taken.
    #[error("{message}")]
    DuplicateAlias { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Store-level unique constraint violation.
    ///
    /// Internal only: the service turns it into [`AppError::DuplicateAlias`]
    /// or a fresh generated code. One that escapes is answered as a 500.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn duplicate_alias(alias: &str) -> Self {
        Self::DuplicateAlias {
            message: "Custom alias is already in use. Please choose a different one.".to_string(),
            details: json!({ "customAlias": alias }),
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

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::DuplicateAlias { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Machine-readable error code included in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::DuplicateAlias { .. } => "duplicate_alias",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } | AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::DuplicateAlias { message, details }
            | AppError::NotFound { message, details } => (message.clone(), details.clone()),
            // Server-side details stay in the logs.
            AppError::Internal { message, .. } => (message.clone(), Value::Null),
            AppError::Conflict { .. } => ("Database error".to_string(), Value::Null),
        };

        ErrorBody {
            message,
            code: self.code(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let details = match &self {
                AppError::Internal { details, .. } | AppError::Conflict { details, .. } => {
                    details.to_string()
                }
                _ => String::new(),
            };
            tracing::error!(error = %self, details = %details, "Request failed");
        }

        (status, Json(self.to_body())).into_response()
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

        tracing::error!("Database error: {}", e);
        AppError::internal("Database error", Value::Null)
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        if crate::utils::db_error::is_mongo_duplicate_key(&e) {
            return AppError::conflict("Unique constraint violation", Value::Null);
        }

        tracing::error!("MongoDB error: {}", e);
        AppError::internal("Database error", Value::Null)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(msg) => format!("{field}: {msg}"),
                    None => format!("{field}: invalid value"),
                })
            })
            .collect::<Vec<_>>()
            .join("; ");

        AppError::bad_request(
            if message.is_empty() {
                "Validation failed".to_string()
            } else {
                message
            },
            serde_json::to_value(&errors).unwrap_or(Value::Null),
        )
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text(), Value::Null)
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(rejection.body_text(), Value::Null)
    }
}
