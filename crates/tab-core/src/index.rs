//! Column addressing for cursor accessors: 1-based ordinal or exact name.

use crate::error::CursorError;
use crate::row::Columns;

/// Something that resolves to a 1-based column ordinal.
///
/// Implemented for `usize` (an ordinal, bounds-checked) and for string names
/// (exact, case-sensitive match; first duplicate wins).
pub trait ColumnIndex {
    /// # Errors
    ///
    /// Returns [`CursorError::OutOfRange`] for a bad ordinal or
    /// [`CursorError::ColumnNotFound`] for an unknown name.
    fn ordinal(&self, columns: &Columns) -> Result<usize, CursorError>;
}

impl ColumnIndex for usize {
    fn ordinal(&self, columns: &Columns) -> Result<usize, CursorError> {
        columns.check_ordinal(*self)
    }
}

impl ColumnIndex for &str {
    fn ordinal(&self, columns: &Columns) -> Result<usize, CursorError> {
        columns.find(self)
    }
}

impl ColumnIndex for String {
    fn ordinal(&self, columns: &Columns) -> Result<usize, CursorError> {
        columns.find(self)
    }
}

impl ColumnIndex for &String {
    fn ordinal(&self, columns: &Columns) -> Result<usize, CursorError> {
        columns.find(self)
    }
}
