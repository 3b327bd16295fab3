// src/repositories/sqlite/mod.rs

pub mod activity_log;
pub mod asset;
pub mod asset_history;
pub mod complaint;
pub mod maintenance;
pub mod user;

use quartermaster_common::error::Error;

/// Surfaces store-level unique-constraint failures as the domain error.
pub(crate) fn map_unique_violation(e: sqlx::Error, what: &str) -> Error {
    let unique = e
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());
    if unique {
        Error::UniquenessViolation(what.to_string())
    } else {
        Error::Database(e)
    }
}
