//! Rows, column descriptors, and the validated batch a producer hands over.

use crate::cursor::TabularCursor;
use crate::error::CursorError;
use crate::value::Value;

/// Build a [`Row`] from a list of expressions convertible into [`Value`].
///
/// ```
/// use tab_core::{row, Value};
///
/// let r = row!["a", 40, Value::Null];
/// assert_eq!(r.len(), 3);
/// ```
#[macro_export]
macro_rules! row {
    ($($value:expr),* $(,)?) => {
        $crate::Row::new(vec![$($crate::Value::from($value)),*])
    };
}

/// An immutable, fixed-length sequence of cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row(Vec<Value>);

impl Row {
    #[must_use]
    pub const fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Cell at a 0-based position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.0
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// Ordered column names of a result, positionally aligned with every row.
///
/// Names are kept verbatim. Lookups are exact and case-sensitive, so a
/// family-qualified name such as `CF1.A` round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Columns(Vec<String>);

impl Columns {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Name at a 1-based ordinal.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::OutOfRange`] outside `[1, len]`.
    pub fn name(&self, ordinal: usize) -> Result<&str, CursorError> {
        self.check_ordinal(ordinal)?;
        Ok(&self.0[ordinal - 1])
    }

    /// 1-based ordinal of the first column named exactly `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::ColumnNotFound`] if no column matches.
    pub fn find(&self, name: &str) -> Result<usize, CursorError> {
        self.0
            .iter()
            .position(|candidate| candidate == name)
            .map(|index| index + 1)
            .ok_or_else(|| CursorError::ColumnNotFound(name.to_string()))
    }

    /// Validate a 1-based ordinal against the column count.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::OutOfRange`] outside `[1, len]`.
    pub fn check_ordinal(&self, ordinal: usize) -> Result<usize, CursorError> {
        if ordinal == 0 || ordinal > self.0.len() {
            return Err(CursorError::OutOfRange {
                ordinal,
                column_count: self.0.len(),
            });
        }
        Ok(ordinal)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// ResultBatch
// ---------------------------------------------------------------------------

/// A fully materialized query result: column names plus rows in final order.
///
/// Construction checks that every row has exactly one cell per column, so a
/// batch can always be turned into a cursor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultBatch {
    columns: Columns,
    rows: Vec<Row>,
}

impl ResultBatch {
    /// # Errors
    ///
    /// Returns [`CursorError::InvalidArgument`] naming the first row whose
    /// arity differs from the column count.
    pub fn new(columns: Columns, rows: Vec<Row>) -> Result<Self, CursorError> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(CursorError::InvalidArgument(format!(
                "row {} has {} values but there are {} columns",
                index + 1,
                row.len(),
                columns.len()
            )));
        }
        Ok(Self { columns, rows })
    }

    #[must_use]
    pub const fn columns(&self) -> &Columns {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn into_parts(self) -> (Columns, Vec<Row>) {
        (self.columns, self.rows)
    }

    /// Wrap this batch in a cursor positioned before the first row.
    #[must_use]
    pub fn into_cursor(self) -> TabularCursor {
        TabularCursor::from(self)
    }
}
