pub mod admin;
pub mod auth;
pub mod categories;
pub mod health;
pub mod notes;
pub mod tags;
