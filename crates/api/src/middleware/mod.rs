//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- requires a valid bearer token.
//! - [`auth::MaybeAuthUser`] -- attaches an identity when a valid token is present.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.

pub mod auth;
pub mod rbac;
