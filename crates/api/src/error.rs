use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use notekeep_core::error::CoreError;

use crate::response::ErrorBody;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] so every failure leaves through the same
/// `{ success: false, error, errors? }` envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `notekeep_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A malformed request (unparseable body or query string).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a message for the logs only.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Generic client-facing message for anything the client cannot act on.
const INTERNAL_MESSAGE: &str = "Server Error";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new(msg.clone())),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new(INTERNAL_MESSAGE),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(core: &CoreError) -> (StatusCode, ErrorBody) {
    match core {
        CoreError::NotFound { entity } => (
            StatusCode::NOT_FOUND,
            ErrorBody::new(format!("{entity} not found")),
        ),
        CoreError::Validation(messages) => {
            (StatusCode::BAD_REQUEST, ErrorBody::validation(messages.clone()))
        }
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ErrorBody::new(msg.clone())),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, ErrorBody::new(msg.clone())),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new(INTERNAL_MESSAGE),
            )
        }
    }
}

/// Human message for a unique constraint the schema names.
fn unique_violation_message(constraint: &str) -> Option<&'static str> {
    match constraint {
        "uq_users_email" => Some("User with this email already exists"),
        "uq_categories_name" => Some("Category with this name already exists"),
        "uq_tags_name" => Some("Tag with this name already exists"),
        _ => None,
    }
}

/// Classify a sqlx error into an HTTP status and envelope.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations (`23505`) on a known `uq_` constraint map to 400.
/// - Check violations (`23514`) map to 400.
/// - Foreign-key violations (`23503`) map to 404: the referenced row is gone.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, ErrorBody) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            ErrorBody::new("Resource not found"),
        ),
        sqlx::Error::Database(db_err) => {
            match db_err.code().as_deref() {
                Some("23505") => {
                    let constraint = db_err.constraint().unwrap_or("unknown");
                    let message = unique_violation_message(constraint)
                        .map(str::to_string)
                        .unwrap_or_else(|| "Duplicate field value entered".to_string());
                    return (StatusCode::BAD_REQUEST, ErrorBody::validation(vec![message]));
                }
                Some("23514") => {
                    tracing::debug!(
                        constraint = db_err.constraint().unwrap_or("unknown"),
                        "Check constraint rejected write"
                    );
                    return (
                        StatusCode::BAD_REQUEST,
                        ErrorBody::validation(vec!["Invalid field value".to_string()]),
                    );
                }
                Some("23503") => {
                    tracing::debug!(
                        constraint = db_err.constraint().unwrap_or("unknown"),
                        "Foreign key rejected write"
                    );
                    return (
                        StatusCode::NOT_FOUND,
                        ErrorBody::new("Referenced resource not found"),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new(INTERNAL_MESSAGE),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new(INTERNAL_MESSAGE),
            )
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
