//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - The `Serialize` shape returned to API clients where it differs from the row
//! - `Deserialize` create/update DTOs (update DTOs have all-`Option` fields)

pub mod category;
pub mod dashboard;
pub mod note;
pub mod tag;
pub mod user;
