// Access and HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use thiserror::Error;

use crate::database::DatabaseError;

/// Why a request was refused on its way through resolve → guard → access.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("{0}")]
    Unauthenticated(String),

    #[error("No tenant is configured for domain '{0}'")]
    TenantNotFound(String),

    #[error("Module '{0}' is not enabled for this account")]
    ModuleDisabled(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    MalformedInput(String),

    #[error(transparent)]
    Backend(#[from] DatabaseError),
}

impl AccessError {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        AccessError::Unauthenticated(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        AccessError::MalformedInput(message.into())
    }
}

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    MalformedInput(String),
    BackendRejected(String),

    // 401 Unauthorized
    Unauthenticated(String),

    // 403 Forbidden
    ModuleDisabled(String),
    Forbidden(String),

    // 404 Not Found
    TenantNotFound(String),
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedInput(_) | ApiError::BackendRejected(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::ModuleDisabled(_) | ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::TenantNotFound(_) | ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::MalformedInput(msg)
            | ApiError::BackendRejected(msg)
            | ApiError::Unauthenticated(msg)
            | ApiError::ModuleDisabled(msg)
            | ApiError::Forbidden(msg)
            | ApiError::TenantNotFound(msg)
            | ApiError::NotFound(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::MalformedInput(_) => "MALFORMED_INPUT",
            ApiError::BackendRejected(_) => "BACKEND_ERROR",
            ApiError::Unauthenticated(_) => "UNAUTHENTICATED",
            ApiError::ModuleDisabled(_) => "MODULE_DISABLED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::TenantNotFound(_) => "TENANT_NOT_FOUND",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "error": self.message(),
            "code": self.error_code()
        })
    }

    pub fn malformed_input(message: impl Into<String>) -> Self {
        ApiError::MalformedInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated(msg) => ApiError::Unauthenticated(msg),
            e @ AccessError::TenantNotFound(_) => ApiError::TenantNotFound(e.to_string()),
            e @ AccessError::ModuleDisabled(_) => ApiError::ModuleDisabled(e.to_string()),
            AccessError::Forbidden(msg) => ApiError::Forbidden(msg),
            AccessError::MalformedInput(msg) => ApiError::MalformedInput(msg),
            AccessError::Backend(e) => e.into(),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ApiError::NotFound(msg),
            DatabaseError::Unconfigured => {
                tracing::error!("Data store used while unconfigured");
                ApiError::ServiceUnavailable("Data store is not configured".to_string())
            }
            DatabaseError::QueryError(msg) => {
                tracing::error!("Store rejected query: {}", msg);
                ApiError::BackendRejected(msg)
            }
            DatabaseError::Sqlx(sqlx::Error::Database(db_err)) => {
                tracing::error!("Store rejected query: {}", db_err);
                ApiError::BackendRejected(db_err.message().to_string())
            }
            DatabaseError::Sqlx(sqlx::Error::RowNotFound) => ApiError::not_found("Record not found"),
            other => {
                // Pool, I/O and configuration failures stay server-side
                tracing::error!("Unexpected store error: {}", other);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
