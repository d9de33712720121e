//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors in the declarative entity model itself, detected at startup.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("duplicate path segment: {0}")]
    DuplicatePathSegment(String),
    #[error("duplicate column '{column}' in table {table}")]
    DuplicateColumn { table: String, column: String },
    #[error("primary key '{column}' of table {table} collides with a client column")]
    PrimaryKeyCollision { table: String, column: String },
    #[error("foreign key {table}.{column} references unknown table '{target}'")]
    UnknownForeignTable {
        table: String,
        column: String,
        target: String,
    },
    #[error("foreign key {table}.{column} references '{target}.{target_column}', which is not its primary key")]
    ForeignKeyNotPrimary {
        table: String,
        column: String,
        target: String,
        target_column: String,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("constraint violation: {message}")]
    Constraint {
        /// Violated constraint name as reported by PostgreSQL, when available.
        constraint: Option<String>,
        message: String,
    },
    /// Connection/transport failure; the request is safe to retry.
    #[error("store unavailable: {0}")]
    Store(sqlx::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("operation '{operation}' not enabled for {path_segment}")]
    OperationNotAllowed {
        path_segment: String,
        operation: &'static str,
    },
}

/// Classify driver errors: unique/FK/not-null violations become `Constraint`,
/// everything else is a retryable store failure.
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("row".into()),
            sqlx::Error::Database(db) => {
                use sqlx::error::ErrorKind;
                match db.kind() {
                    ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation => AppError::Constraint {
                        constraint: db.constraint().map(str::to_string),
                        message: db.message().to_string(),
                    },
                    _ => AppError::Store(sqlx::Error::Database(db)),
                }
            }
            other => AppError::Store(other),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Model(_) => (StatusCode::INTERNAL_SERVER_ERROR, "model_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::Constraint { .. } => (StatusCode::CONFLICT, "constraint_violation"),
            AppError::Store(_) => (StatusCode::SERVICE_UNAVAILABLE, "store_error"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::OperationNotAllowed { .. } => {
                (StatusCode::METHOD_NOT_ALLOWED, "operation_not_allowed")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let details = match &self {
            AppError::Constraint {
                constraint: Some(name),
                ..
            } => Some(serde_json::json!({ "constraint": name })),
            _ => None,
        };
        if status.is_server_error() {
            tracing::error!(code, error = %self, "request failed");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}
