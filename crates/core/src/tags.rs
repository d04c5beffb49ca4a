//! Tag-name normalization and tag validation.
//!
//! A tag's identity is its normalized name: surrounding whitespace trimmed,
//! lowercased. The store keeps a unique index on that form, so every caller
//! must normalize through [`normalize_tag_name`] before looking a tag up.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::validation::{char_len, is_hex_color, FieldErrors};

/// Maximum length of a normalized tag name, in characters.
pub const MAX_TAG_NAME_LENGTH: usize = 30;

/// Color given to tags created without one.
pub const DEFAULT_TAG_COLOR: &str = "#3b82f6";

pub fn normalize_tag_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalize a list of user-supplied tag names into unique, non-empty names.
///
/// First occurrence wins, so the output keeps the caller's ordering.
pub fn dedupe_tag_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| normalize_tag_name(name.as_ref()))
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Validate the tag names attached to a note.
pub fn validate_note_tag_names<S: AsRef<str>>(names: &[S]) -> Result<(), CoreError> {
    let mut errors = FieldErrors::new();
    for name in dedupe_tag_names(names) {
        errors.check(
            char_len(&name) <= MAX_TAG_NAME_LENGTH,
            format!("Tag '{name}' cannot exceed {MAX_TAG_NAME_LENGTH} characters"),
        );
    }
    errors.finish()
}

/// Validate an explicit tag create (`require_name`) or partial update.
pub fn validate_tag(
    name: Option<&str>,
    color: Option<&str>,
    require_name: bool,
) -> Result<(), CoreError> {
    let mut errors = FieldErrors::new();

    match name.map(normalize_tag_name) {
        Some(name) if !name.is_empty() => errors.check(
            char_len(&name) <= MAX_TAG_NAME_LENGTH,
            format!("Tag name cannot exceed {MAX_TAG_NAME_LENGTH} characters"),
        ),
        Some(_) => errors.push("Tag name is required"),
        None if require_name => errors.push("Tag name is required"),
        None => {}
    }

    if let Some(color) = color {
        errors.check(
            is_hex_color(color),
            "Color must be a valid hex color code (e.g., #3b82f6)",
        );
    }

    errors.finish()
}
