use std::path::PathBuf;

use notekeep_core::access::NoteAccessMode;

use crate::auth::jwt::JwtConfig;
use crate::auth::password::PasswordConfig;

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Server configuration loaded from environment variables.
///
/// Defaults suit local development; the database URL, JWT secret, and note
/// access mode have no default and must be set explicitly.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    pub database_url: String,
    /// Pool size (default: `20`).
    pub database_max_connections: u32,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory of front-end assets served for non-API paths, if any.
    pub static_dir: Option<PathBuf>,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Argon2 cost settings.
    pub password: PasswordConfig,
    /// Whether anonymous callers may read notes.
    pub note_access: NoteAccessMode,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `DATABASE_URL`             | **required**               |
    /// | `DATABASE_MAX_CONNECTIONS` | `20`                       |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `STATIC_DIR`               | unset                      |
    /// | `NOTE_ACCESS_MODE`         | **required** (`owner`/`public`) |
    /// | `LOG_FORMAT`               | `text`                     |
    ///
    /// JWT and password-hash settings are read by [`JwtConfig::from_env`]
    /// and [`PasswordConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on a missing required variable or an unparseable value, so
    /// misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let database_max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DATABASE_MAX_CONNECTIONS must be a valid u32");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let static_dir = std::env::var("STATIC_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let note_access: NoteAccessMode = std::env::var("NOTE_ACCESS_MODE")
            .expect("NOTE_ACCESS_MODE must be set to 'owner' or 'public'")
            .parse()
            .unwrap_or_else(|e| panic!("{e}"));

        Self {
            host,
            port,
            database_url,
            database_max_connections,
            cors_origins,
            request_timeout_secs,
            static_dir,
            jwt: JwtConfig::from_env(),
            password: PasswordConfig::from_env(),
            note_access,
        }
    }
}

/// Read `LOG_FORMAT` (`text` or `json`, default `text`).
///
/// Separate from [`ServerConfig::from_env`] so tracing can be initialized
/// before the rest of the configuration is loaded.
pub fn log_format_from_env() -> LogFormat {
    match std::env::var("LOG_FORMAT") {
        Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
        Ok(v) if v.is_empty() || v.eq_ignore_ascii_case("text") => LogFormat::Text,
        Ok(v) => panic!("LOG_FORMAT must be 'text' or 'json', got '{v}'"),
        Err(_) => LogFormat::Text,
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
