//! Note field rules.
//!
//! The category of a note is checked against the fixed [`NOTE_CATEGORIES`]
//! list, not against the admin-managed category registry. Renaming or
//! deleting a registry category therefore has no effect on notes.

use crate::error::CoreError;
use crate::tags::validate_note_tag_names;
use crate::validation::{char_len, is_hex_color, FieldErrors};

pub const MAX_TITLE_LENGTH: usize = 100;

pub const NOTE_CATEGORIES: &[&str] = &["Work", "Personal", "Ideas", "Study", "Todo", "Other"];

pub const DEFAULT_NOTE_CATEGORY: &str = "Other";
pub const DEFAULT_NOTE_COLOR: &str = "#ffffff";

/// Borrowed view of the user-editable note fields, as received.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoteFields<'a> {
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
    pub category: Option<&'a str>,
    pub color: Option<&'a str>,
    pub tags: Option<&'a [String]>,
}

/// Validate a new note: title, content, and category are mandatory.
pub fn validate_new_note(fields: &NoteFields<'_>) -> Result<(), CoreError> {
    validate(fields, true)
}

/// Validate a partial update: only the fields present are checked.
pub fn validate_note_update(fields: &NoteFields<'_>) -> Result<(), CoreError> {
    validate(fields, false)
}

fn validate(fields: &NoteFields<'_>, creating: bool) -> Result<(), CoreError> {
    let mut errors = FieldErrors::new();

    match fields.title.map(str::trim) {
        Some("") => errors.push("Title is required"),
        Some(title) => errors.check(
            char_len(title) <= MAX_TITLE_LENGTH,
            format!("Title cannot exceed {MAX_TITLE_LENGTH} characters"),
        ),
        None if creating => errors.push("Title is required"),
        None => {}
    }

    match fields.content.map(str::trim) {
        Some("") => errors.push("Content is required"),
        None if creating => errors.push("Content is required"),
        _ => {}
    }

    match fields.category.map(str::trim) {
        Some("") => errors.push("Category is required"),
        Some(category) => errors.check(
            NOTE_CATEGORIES.contains(&category),
            format!("Category must be one of: {}", NOTE_CATEGORIES.join(", ")),
        ),
        None if creating => errors.push("Category is required"),
        None => {}
    }

    if let Some(color) = fields.color {
        errors.check(
            is_hex_color(color),
            "Color must be a valid hex color code (e.g., #ffffff)",
        );
    }

    if let Some(tags) = fields.tags {
        if let Err(CoreError::Validation(messages)) = validate_note_tag_names(tags) {
            messages.into_iter().for_each(|m| errors.push(m));
        }
    }

    errors.finish()
}
