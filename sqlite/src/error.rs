//! Error types for the SQLite execution layer.
//!
//! Row-level failures ([`RowError`]) pass through transparently so callers
//! can still tell a missing column from a type mismatch from an upstream
//! cursor fault; everything database-side folds into [`StoreError`].

use rowfold_core::RowError;
use thiserror::Error;

/// Errors that can occur while executing queries or store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite operation failure.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Row access or row-source failure, surfaced unchanged.
    #[error(transparent)]
    Row(#[from] RowError),

    /// Table prefix contains invalid characters.
    #[error("invalid prefix '{0}': must contain only alphanumeric characters and underscores")]
    InvalidPrefix(String),

    /// A point lookup or single-row query matched nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// A single-row query matched more than one row.
    #[error("query returned more than one row")]
    MultipleRows,

    /// Migration lifecycle operation failure.
    #[error("migration error: {0}")]
    MigrationError(String),
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
