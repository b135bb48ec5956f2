//! Forward-only cursor over a materialized result.
//!
//! ```text
//! before first ──advance()──▶ row 1 ──▶ … ──▶ row n ──advance()──▶ after last
//!                                                                   (terminal)
//! ```
//!
//! Accessors read the current row only. Position never moves backwards and
//! the terminal state is sticky: every `advance()` after exhaustion returns
//! `false`.

use std::cell::Cell;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use crate::coerce::FromValue;
use crate::error::CursorError;
use crate::index::ColumnIndex;
use crate::row::{Columns, ResultBatch, Row};
use crate::value::Value;

/// JDBC-style, single-pass cursor over rows already in final order.
///
/// The cursor is `Send` but not `Sync`: the was-null flag is updated through
/// `&self` reads. Readers on several threads each need their own cursor.
#[derive(Debug)]
pub struct TabularCursor {
    columns: Columns,
    rows: Vec<Row>,
    /// 0 = before first, `k` = row `k` is current, `len + 1` = after last.
    position: usize,
    was_null: Cell<bool>,
}

impl TabularCursor {
    /// Build a cursor positioned before the first row.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::InvalidArgument`] if any row's arity differs
    /// from the number of columns.
    pub fn new(columns: Columns, rows: Vec<Row>) -> Result<Self, CursorError> {
        ResultBatch::new(columns, rows).map(Self::from)
    }

    /// Move to the next row. Returns whether a row is now current.
    pub fn advance(&mut self) -> bool {
        if self.position <= self.rows.len() {
            self.position += 1;
        }
        self.current_row().is_ok()
    }

    /// Read a cell of the current row through the coercion table.
    ///
    /// A null cell yields `T::from_null()` and sets [`Self::was_null`]; a
    /// successful non-null read clears it.
    ///
    /// # Errors
    ///
    /// [`CursorError::NoCurrentRow`], [`CursorError::OutOfRange`],
    /// [`CursorError::ColumnNotFound`], or [`CursorError::TypeCoercion`].
    pub fn get<T: FromValue, I: ColumnIndex>(&self, index: I) -> Result<T, CursorError> {
        let row = self.current_row()?;
        let ordinal = index.ordinal(&self.columns)?;
        let value = &row.values()[ordinal - 1];

        if value.is_null() {
            self.was_null.set(true);
            return Ok(T::from_null());
        }

        let converted = T::from_value(value).ok_or(CursorError::TypeCoercion {
            ordinal,
            requested: T::NAME,
            found: value.kind(),
        })?;
        self.was_null.set(false);
        Ok(converted)
    }

    /// # Errors
    ///
    /// See [`Self::get`].
    pub fn get_string<I: ColumnIndex>(&self, index: I) -> Result<Option<String>, CursorError> {
        self.get(index)
    }

    /// # Errors
    ///
    /// See [`Self::get`]. Values outside the `i32` range fail to coerce.
    pub fn get_int<I: ColumnIndex>(&self, index: I) -> Result<i32, CursorError> {
        self.get(index)
    }

    /// # Errors
    ///
    /// See [`Self::get`].
    pub fn get_long<I: ColumnIndex>(&self, index: I) -> Result<i64, CursorError> {
        self.get(index)
    }

    /// # Errors
    ///
    /// See [`Self::get`].
    pub fn get_double<I: ColumnIndex>(&self, index: I) -> Result<f64, CursorError> {
        self.get(index)
    }

    /// # Errors
    ///
    /// See [`Self::get`].
    pub fn get_boolean<I: ColumnIndex>(&self, index: I) -> Result<bool, CursorError> {
        self.get(index)
    }

    /// # Errors
    ///
    /// See [`Self::get`].
    pub fn get_decimal<I: ColumnIndex>(
        &self,
        index: I,
    ) -> Result<Option<BigDecimal>, CursorError> {
        self.get(index)
    }

    /// # Errors
    ///
    /// See [`Self::get`].
    pub fn get_timestamp<I: ColumnIndex>(
        &self,
        index: I,
    ) -> Result<Option<DateTime<Utc>>, CursorError> {
        self.get(index)
    }

    /// # Errors
    ///
    /// See [`Self::get`].
    pub fn get_bytes<I: ColumnIndex>(&self, index: I) -> Result<Option<Vec<u8>>, CursorError> {
        self.get(index)
    }

    /// The raw cell, cloned. Never fails to coerce.
    ///
    /// # Errors
    ///
    /// See [`Self::get`].
    pub fn get_object<I: ColumnIndex>(&self, index: I) -> Result<Value, CursorError> {
        self.get(index)
    }

    /// Whether the last successful read hit a null cell.
    #[must_use]
    pub fn was_null(&self) -> bool {
        self.was_null.get()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column name at a 1-based ordinal.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::OutOfRange`] outside `[1, column_count]`.
    pub fn column_name(&self, ordinal: usize) -> Result<&str, CursorError> {
        self.columns.name(ordinal)
    }

    /// Ordinal of the first column named exactly `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::ColumnNotFound`] if no column matches.
    pub fn find_column(&self, name: &str) -> Result<usize, CursorError> {
        self.columns.find(name)
    }

    #[must_use]
    pub const fn columns(&self) -> &Columns {
        &self.columns
    }

    /// 1-based number of the current row, or 0 when no row is current.
    #[must_use]
    pub fn row_number(&self) -> usize {
        if self.current_row().is_ok() {
            self.position
        } else {
            0
        }
    }

    /// True only while a non-empty result has not been advanced yet.
    #[must_use]
    pub fn is_before_first(&self) -> bool {
        self.position == 0 && !self.rows.is_empty()
    }

    /// True once a non-empty result has been advanced past its last row.
    #[must_use]
    pub fn is_after_last(&self) -> bool {
        self.position > self.rows.len() && !self.rows.is_empty()
    }

    fn current_row(&self) -> Result<&Row, CursorError> {
        self.position
            .checked_sub(1)
            .and_then(|index| self.rows.get(index))
            .ok_or(CursorError::NoCurrentRow)
    }
}

impl From<ResultBatch> for TabularCursor {
    fn from(batch: ResultBatch) -> Self {
        let (columns, rows) = batch.into_parts();
        Self {
            columns,
            rows,
            position: 0,
            was_null: Cell::new(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::row;
    use crate::value::ValueKind;

    fn scores() -> TabularCursor {
        TabularCursor::new(
            Columns::new(["A_STRING", "COL1"]),
            vec![row!["a", 40], row!["b", 20], row!["c", 30]],
        )
        .unwrap()
    }

    #[test]
    fn reads_rows_in_order_then_exhausts() {
        let mut rs = scores();
        let mut seen = Vec::new();
        while rs.advance() {
            seen.push(rs.get_int(2).unwrap());
        }
        assert_eq!(seen, vec![40, 20, 30]);
        assert!(!rs.advance());
        assert!(!rs.advance());
    }

    #[test]
    fn accessor_before_first_advance_fails() {
        let rs = scores();
        assert_eq!(rs.get_string(1), Err(CursorError::NoCurrentRow));
        assert_eq!(rs.get_int("COL1"), Err(CursorError::NoCurrentRow));
        assert_eq!(rs.row_number(), 0);
    }

    #[test]
    fn accessor_after_exhaustion_fails() {
        let mut rs = scores();
        while rs.advance() {}
        assert_eq!(rs.get_long(2), Err(CursorError::NoCurrentRow));
        assert!(rs.is_after_last());
        assert_eq!(rs.row_number(), 0);
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    #[case(usize::MAX)]
    fn ordinal_outside_columns_is_out_of_range(#[case] ordinal: usize) {
        let mut rs = scores();
        assert!(rs.advance());
        assert_eq!(
            rs.get_string(ordinal),
            Err(CursorError::OutOfRange {
                ordinal,
                column_count: 2
            })
        );
    }

    #[test]
    fn null_string_is_none() {
        let mut rs = TabularCursor::new(
            Columns::new(["FLAG", "TYPE"]),
            vec![row![Value::Null, "M"]],
        )
        .unwrap();
        assert!(rs.advance());
        assert_eq!(rs.get_string(1), Ok(None));
        assert!(rs.was_null());
        assert_eq!(rs.get_string(2), Ok(Some("M".into())));
        assert!(!rs.was_null());
    }

    #[test]
    fn null_number_is_zero_with_was_null() {
        let mut rs = TabularCursor::new(
            Columns::new(["ID", "SCORE", "RATIO"]),
            vec![row![1, Value::Null, Value::Null]],
        )
        .unwrap();
        assert!(rs.advance());
        assert_eq!(rs.get_int(2), Ok(0));
        assert!(rs.was_null());
        assert_eq!(rs.get_double(3), Ok(0.0));
        assert!(rs.was_null());
        assert_eq!(rs.get_boolean(3), Ok(false));
        assert!(rs.was_null());
        assert_eq!(rs.get_long(1), Ok(1));
        assert!(!rs.was_null());
    }

    #[test]
    fn failed_coercion_reports_kind() {
        let mut rs = scores();
        assert!(rs.advance());
        assert_eq!(
            rs.get_int(1),
            Err(CursorError::TypeCoercion {
                ordinal: 1,
                requested: "int",
                found: ValueKind::Text,
            })
        );
    }

    #[test]
    fn name_lookup_is_exact() {
        let mut rs = TabularCursor::new(
            Columns::new(["A_STRING", "CF1.A", "CF1.B"]),
            vec![row!["c", 30, "cc"]],
        )
        .unwrap();
        assert_eq!(rs.find_column("CF1.A"), Ok(2));
        assert_eq!(
            rs.find_column("MISSING"),
            Err(CursorError::ColumnNotFound("MISSING".into()))
        );
        assert!(rs.advance());
        assert_eq!(rs.get_int("CF1.A"), Ok(30));
        assert_eq!(rs.get_string("CF1.B"), Ok(Some("cc".into())));
        assert_eq!(
            rs.get_string("cf1.b"),
            Err(CursorError::ColumnNotFound("cf1.b".into()))
        );
    }

    #[test]
    fn typed_getters_cover_every_kind() {
        let ts = DateTime::parse_from_rfc3339("2026-02-09T14:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let dec = BigDecimal::from_str("19.99").unwrap();
        let mut rs = TabularCursor::new(
            Columns::new(["OK", "PRICE", "AT", "BLOB", "RATIO"]),
            vec![row![true, dec.clone(), ts, vec![1u8, 2], 0.5]],
        )
        .unwrap();
        assert!(rs.advance());
        assert_eq!(rs.get_boolean(1), Ok(true));
        assert_eq!(rs.get_decimal(2), Ok(Some(dec)));
        assert_eq!(rs.get_timestamp(3), Ok(Some(ts)));
        assert_eq!(rs.get_bytes(4), Ok(Some(vec![1, 2])));
        assert_eq!(rs.get_double(5), Ok(0.5));
        assert_eq!(rs.get_object(5), Ok(Value::Double(0.5)));
    }

    #[test]
    fn empty_result_never_has_a_row() {
        let mut rs = TabularCursor::new(Columns::new(["ID"]), Vec::new()).unwrap();
        assert!(!rs.is_before_first());
        assert!(!rs.advance());
        assert!(!rs.is_after_last());
        assert_eq!(rs.get_int(1), Err(CursorError::NoCurrentRow));
        assert_eq!(rs.column_count(), 1);
    }

    #[test]
    fn row_number_tracks_position() {
        let mut rs = scores();
        assert!(rs.is_before_first());
        assert!(rs.advance());
        assert_eq!(rs.row_number(), 1);
        assert!(rs.advance());
        assert_eq!(rs.row_number(), 2);
    }
}
