//! Category registry rules and the built-in category set.

use crate::error::CoreError;
use crate::validation::{char_len, is_hex_color, FieldErrors};

pub const MAX_CATEGORY_NAME_LENGTH: usize = 50;
pub const MAX_CATEGORY_DESCRIPTION_LENGTH: usize = 200;

pub const DEFAULT_CATEGORY_COLOR: &str = "#3b82f6";
pub const DEFAULT_CATEGORY_ICON: &str = "📂";

/// A built-in category restored by `notekeep-admin seed-categories`.
#[derive(Debug, Clone, Copy)]
pub struct SeedCategory {
    pub name: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

/// Must stay in sync with the seed rows in the categories migration.
pub const SEED_CATEGORIES: &[SeedCategory] = &[
    SeedCategory {
        name: "Work",
        description: "Work-related notes and tasks",
        color: "#3b82f6",
        icon: "💼",
    },
    SeedCategory {
        name: "Personal",
        description: "Personal notes and reminders",
        color: "#8b5cf6",
        icon: "👤",
    },
    SeedCategory {
        name: "Ideas",
        description: "Creative ideas and brainstorming",
        color: "#f59e0b",
        icon: "💡",
    },
    SeedCategory {
        name: "Study",
        description: "Study notes and learning materials",
        color: "#10b981",
        icon: "📚",
    },
    SeedCategory {
        name: "Todo",
        description: "Todo lists and tasks",
        color: "#ef4444",
        icon: "✅",
    },
    SeedCategory {
        name: "Other",
        description: "Miscellaneous notes",
        color: "#6b7280",
        icon: "📁",
    },
];

/// Validate a category create (`require_name`) or partial update.
pub fn validate_category(
    name: Option<&str>,
    description: Option<&str>,
    color: Option<&str>,
    require_name: bool,
) -> Result<(), CoreError> {
    let mut errors = FieldErrors::new();

    match name.map(str::trim) {
        Some("") => errors.push("Category name is required"),
        Some(name) => errors.check(
            char_len(name) <= MAX_CATEGORY_NAME_LENGTH,
            format!("Category name cannot exceed {MAX_CATEGORY_NAME_LENGTH} characters"),
        ),
        None if require_name => errors.push("Category name is required"),
        None => {}
    }

    if let Some(description) = description {
        errors.check(
            char_len(description.trim()) <= MAX_CATEGORY_DESCRIPTION_LENGTH,
            format!("Description cannot exceed {MAX_CATEGORY_DESCRIPTION_LENGTH} characters"),
        );
    }

    if let Some(color) = color {
        errors.check(
            is_hex_color(color),
            "Color must be a valid hex color code (e.g., #3b82f6)",
        );
    }

    errors.finish()
}
