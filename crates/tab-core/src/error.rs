//! Cursor error types for tab-core.

use thiserror::Error;

use crate::value::ValueKind;

/// Errors raised while building or reading a [`crate::TabularCursor`].
///
/// Every variant is a distinct, local failure of one call. A null cell is
/// never an error; it is reported through `was_null()` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    /// Rows and column names disagree on shape.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No row is current (before the first `advance()` or after exhaustion).
    #[error("No current row")]
    NoCurrentRow,

    /// Ordinal outside `[1, column_count]`.
    #[error("Column ordinal {ordinal} out of range (1..={column_count})")]
    OutOfRange { ordinal: usize, column_count: usize },

    /// No column has exactly this name.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// The requested accessor type cannot represent the cell.
    #[error("Cannot read column {ordinal} as {requested}: found {found}")]
    TypeCoercion {
        ordinal: usize,
        requested: &'static str,
        found: ValueKind,
    },
}
