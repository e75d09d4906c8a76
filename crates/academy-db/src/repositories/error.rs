//! Error handling utilities for repositories

use academy_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Map unique and foreign-key violations of an insert.
///
/// `on_foreign_key` receives the violated constraint name, e.g. `enrollments_user_id_fkey`.
pub fn map_insert_error<U, F>(e: SqlxError, on_unique: U, on_foreign_key: F) -> DomainError
where
    U: FnOnce() -> DomainError,
    F: FnOnce(&str) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
        if db_err.is_foreign_key_violation() {
            return on_foreign_key(db_err.constraint().unwrap_or_default());
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Error for a counter update that matched no row inside a transaction
pub fn counter_not_updated(what: &str) -> DomainError {
    DomainError::ConsistencyError(format!("{what} was not updated"))
}
