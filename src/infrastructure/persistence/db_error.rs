use crate::domain::error::StorageError;

pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

/// Maps an INSERT failure, turning a UNIQUE violation into a conflict.
pub fn map_insert_error(e: sqlx::Error) -> StorageError {
    if is_unique_violation(&e) {
        StorageError::AliasConflict
    } else {
        StorageError::Unavailable(e)
    }
}
