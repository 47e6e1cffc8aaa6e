//! HTTP handlers, one module per resource.
//!
//! Reads are public; every mutating handler takes an
//! [`AuthUser`](crate::middleware::auth::AuthUser).

pub mod auth;
pub mod pages;
pub mod performers;
pub mod sections;
pub mod tickets;
pub mod users;

use festival_core::error::CoreError;
use festival_core::types::{DbId, Version};

use crate::error::{AppError, AppResult};

/// Reject an update whose client-supplied version is not the stored one.
pub(crate) fn ensure_version(
    entity: &str,
    id: DbId,
    expected: Option<Version>,
    current: Version,
) -> AppResult<()> {
    match expected {
        Some(expected) if expected != current => Err(AppError::Core(CoreError::Conflict(
            format!("{entity} {id} is at version {current}, not {expected}; reload and retry"),
        ))),
        _ => Ok(()),
    }
}

/// The row changed between our read and our guarded write.
pub(crate) fn concurrent_write(entity: &str, id: DbId) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "{entity} {id} was modified concurrently; reload and retry"
    )))
}
