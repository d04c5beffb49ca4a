//! Shared field-validation helpers.
//!
//! Validators never stop at the first problem: they push every violated
//! constraint into a [`FieldErrors`] and turn it into a single
//! [`CoreError::Validation`] at the end.

use crate::error::CoreError;

/// Accumulator for field-level validation messages.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    /// Push `message` when `condition` is false.
    pub fn check(&mut self, condition: bool, message: impl Into<String>) {
        if !condition {
            self.push(message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn finish(self) -> Result<(), CoreError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(self.0))
        }
    }
}

/// `true` for a `#RRGGBB` hex color.
pub fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// `true` when `value` has real content once surrounding whitespace is gone.
pub fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Length in characters, not bytes, so multi-byte input is measured fairly.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}
