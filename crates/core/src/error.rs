/// Domain error taxonomy shared by every layer.
///
/// The API layer maps each variant onto exactly one HTTP status; nothing in
/// here knows about HTTP.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The entity does not exist, or exists but is hidden from the caller.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// One or more field constraints were violated. Every violation is listed.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a validation failure with a single message.
    pub fn invalid(message: impl Into<String>) -> Self {
        CoreError::Validation(vec![message.into()])
    }

    pub fn not_found(entity: &'static str) -> Self {
        CoreError::NotFound { entity }
    }
}
