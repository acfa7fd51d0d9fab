//! Application error type and its HTTP mapping.
//!
//! Internally every failure keeps its cause (validation, connectivity, lookup,
//! authentication). At the HTTP boundary all of them collapse into the coarse
//! `{"response": "error"}` envelope; only the status code differs.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::api::dto::config::ConfigResponse;
use crate::infrastructure::database::DbError;

/// Realm announced in the Basic auth challenge.
pub const AUTH_REALM: &str = "link-keeper";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    /// The database could not be reached; the next request retries the connection.
    #[error("{message}")]
    Connection { message: String, details: Value },
    /// The server dropped a live connection mid-operation.
    #[error("{message}")]
    TransientDisconnect { message: String, details: Value },
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
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn connection(message: impl Into<String>, details: Value) -> Self {
        Self::Connection {
            message: message.into(),
            details,
        }
    }
    pub fn transient_disconnect(message: impl Into<String>, details: Value) -> Self {
        Self::TransientDisconnect {
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

    /// Stable machine-readable code, used in logs only.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Unauthorized { .. } => "unauthorized",
            AppError::Connection { .. } => "connection_error",
            AppError::TransientDisconnect { .. } => "transient_disconnect",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn details(&self) -> &Value {
        match self {
            AppError::Validation { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::Unauthorized { details, .. }
            | AppError::Connection { details, .. }
            | AppError::TransientDisconnect { details, .. }
            | AppError::Internal { details, .. } => details,
        }
    }

    /// Writes the error to the log at a level matching its severity.
    pub fn log(&self, context: &str) {
        let code = self.code();
        let details = self.details();
        match self {
            AppError::Validation { .. } | AppError::NotFound { .. } => {
                tracing::debug!(code, %details, "{context}: {self}");
            }
            AppError::Unauthorized { .. } | AppError::TransientDisconnect { .. } => {
                tracing::warn!(code, %details, "{context}: {self}");
            }
            AppError::Connection { .. } | AppError::Internal { .. } => {
                tracing::error!(code, %details, "{context}: {self}");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Connection { .. } | AppError::TransientDisconnect { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ConfigResponse::error());

        if status == StatusCode::UNAUTHORIZED {
            let challenge = format!("Basic realm=\"{AUTH_REALM}\", charset=\"UTF-8\"");
            return (status, [(header::WWW_AUTHENTICATE, challenge)], body).into_response();
        }

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let fields: Vec<&str> = field_errors.keys().map(|k| k.as_ref()).collect();
        AppError::bad_request("Invalid link fields", json!({ "fields": fields }))
    }
}

impl From<DbError> for AppError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Unavailable => AppError::connection("Database unavailable", json!({})),
            DbError::Disconnected => AppError::transient_disconnect(
                "Database connection lost",
                json!({ "retry": "next request reconnects" }),
            ),
            DbError::Timeout(after) => AppError::internal(
                "Database statement timed out",
                json!({ "timeout_ms": after.as_millis() as u64 }),
            ),
            DbError::Query(source) => {
                AppError::internal("Database error", json!({ "reason": source.to_string() }))
            }
        }
    }
}
