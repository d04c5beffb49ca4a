//! Request-level access policy: role checks and owner-scoping of note reads.

use std::fmt;
use std::str::FromStr;

use crate::credentials::Identity;
use crate::error::CoreError;
use crate::roles::Role;
use crate::types::DbId;

/// Require an identity whose role is in `allowed`.
///
/// No identity is a 401; an identity with the wrong role is a 403.
pub fn authorize<'a>(
    identity: Option<&'a Identity>,
    allowed: &[Role],
) -> Result<&'a Identity, CoreError> {
    let identity =
        identity.ok_or_else(|| CoreError::Unauthorized("User not authenticated".into()))?;
    if !identity.role.is_one_of(allowed) {
        let names: Vec<&str> = allowed.iter().map(Role::as_str).collect();
        return Err(CoreError::Forbidden(format!(
            "Access denied. Required role: {}",
            names.join(" or ")
        )));
    }
    Ok(identity)
}

/// How note reads behave for callers without a token.
///
/// Chosen once per deployment. There is no default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteAccessMode {
    /// Every note read requires a token and only sees the caller's notes.
    Owner,
    /// Anonymous callers read all notes; authenticated callers still only
    /// see their own.
    Public,
}

impl NoteAccessMode {
    /// Resolve the owner filter for a note read.
    ///
    /// `Ok(Some(id))` scopes the read to that owner, `Ok(None)` reads
    /// unscoped.
    pub fn read_scope(&self, identity: Option<&Identity>) -> Result<Option<DbId>, CoreError> {
        match (self, identity) {
            (_, Some(identity)) => Ok(Some(identity.user_id)),
            (NoteAccessMode::Public, None) => Ok(None),
            (NoteAccessMode::Owner, None) => Err(CoreError::Unauthorized(
                "No token provided, authorization required".into(),
            )),
        }
    }
}

impl FromStr for NoteAccessMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "owner" => Ok(NoteAccessMode::Owner),
            "public" => Ok(NoteAccessMode::Public),
            other => Err(CoreError::invalid(format!(
                "Invalid note access mode '{other}'. Must be 'owner' or 'public'"
            ))),
        }
    }
}

impl fmt::Display for NoteAccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteAccessMode::Owner => f.write_str("owner"),
            NoteAccessMode::Public => f.write_str("public"),
        }
    }
}
