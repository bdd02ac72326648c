//! Error handling for pagekit-store
//!
//! Store operations return the canonical `PkError`; these helpers build it
//! with consistent op names and kinds.

use pagekit_core::errors::{PkError, PkErrorKind};

/// Result type alias using PkError
pub type Result<T> = std::result::Result<T, PkError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> PkError {
    PkError::new(PkErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error for an already-applied migration
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> PkError {
    PkError::new(PkErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: recorded {}, embedded {}",
            migration_id, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> PkError {
    PkError::new(PkErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// True if SQLite rejected a write on a UNIQUE or PRIMARY KEY constraint
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

/// Create a serialization error for stored JSON or timestamps
pub fn corrupt_row(op: &str, id: &str, reason: impl std::fmt::Display) -> PkError {
    PkError::new(PkErrorKind::Serialization)
        .with_op(op.to_string())
        .with_entity_id(id.to_string())
        .with_message(format!("Stored row {} cannot be decoded: {}", id, reason))
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> PkError {
    PkError::new(PkErrorKind::Persistence)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
