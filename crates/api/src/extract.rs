//! Request extractors that reject through [`AppError`].
//!
//! Axum's stock `Json` and `Query` extractors answer malformed input with a
//! plain-text body. These wrappers keep such failures inside the JSON
//! envelope.

use axum::extract::{FromRequest, FromRequestParts};
use notekeep_core::error::CoreError;
use notekeep_core::types::DbId;

use crate::error::AppError;

/// `axum::Json` whose rejection is a 400 envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Query` whose rejection is a 400 envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Parse a path segment as an id.
///
/// A segment that is not a positive integer cannot name a row, so it is
/// reported as `entity` not found.
pub fn parse_id(raw: &str, entity: &'static str) -> Result<DbId, AppError> {
    raw.parse::<DbId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(AppError::Core(CoreError::NotFound { entity }))
}
