//! Shared response envelope types for API handlers.
//!
//! Every response is `{ success, data?, count?, message? }` on success and
//! `{ success: false, error, errors? }` on failure. Handlers build successes
//! with [`ApiResponse`]; failures are rendered by [`AppError`](crate::error::AppError).

use serde::Serialize;

/// Success envelope around a serializable payload.
///
/// ```ignore
/// Ok(Json(ApiResponse::list(notes)))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            count: None,
            data,
            message: None,
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// A list payload with its length in `count`.
    pub fn list(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(data.len()),
            data,
            message: None,
        }
    }
}

/// Serializes as `{}`.
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// `{ success: true, data: {} }` for deletions.
    pub fn empty(message: &'static str) -> Self {
        Self {
            success: true,
            count: None,
            data: Empty {},
            message: Some(message),
        }
    }
}

/// Failure envelope.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            errors: None,
        }
    }

    /// A validation failure listing every violated constraint.
    pub fn validation(errors: Vec<String>) -> Self {
        Self {
            success: false,
            error: "Validation failed".to_string(),
            errors: Some(errors),
        }
    }
}
