//! Store error types for tab-store.

use tab_core::CursorError;
use thiserror::Error;

use crate::datasource::SaveMode;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// A collected result could not be shaped into a cursor.
    #[error(transparent)]
    Cursor(#[from] CursorError),

    /// A column referenced by a write or a key does not exist in the table.
    #[error("Unknown column {column} in table {table}")]
    UnknownColumn { table: String, column: String },

    /// The table does not exist.
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// A positional write did not supply one value per table column.
    #[error("Table {table} has {expected} columns but {actual} values were supplied")]
    Arity {
        table: String,
        expected: usize,
        actual: usize,
    },

    /// A non-nullable field received a null cell.
    #[error("Field {field} is not nullable")]
    NullViolation { field: String },

    /// The data source only supports appending.
    #[error("Save mode {0} is not supported; only append is")]
    UnsupportedSaveMode(SaveMode),

    /// Invalid state encountered (e.g., a `TableSpec` without columns).
    #[error("Invalid state: {0}")]
    InvalidState(String),
}
