//! Domain logic for the notekeep service.
//!
//! Everything in this crate is pure: no database, no HTTP. The `db` crate
//! persists what is defined here and the `api` crate exposes it over JSON.

pub mod access;
pub mod categories;
pub mod credentials;
pub mod error;
pub mod notes;
pub mod roles;
pub mod tags;
pub mod types;
pub mod users;
pub mod validation;
