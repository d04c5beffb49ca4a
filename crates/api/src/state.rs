use std::sync::Arc;

use notekeep_core::credentials::{CredentialHasher, TokenAuthority};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted and everything else is
/// behind `Arc`. The credential capabilities are built once at startup and
/// never mutated.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: notekeep_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Password hashing capability.
    pub hasher: Arc<dyn CredentialHasher>,
    /// Token signing and verification capability.
    pub tokens: Arc<dyn TokenAuthority>,
}
