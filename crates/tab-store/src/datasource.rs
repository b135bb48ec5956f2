//! Frame-based data-source API: save a dataset into a table, load it back.
//!
//! A [`Frame`] is rows plus a schema of named, kinded fields. Saving matches
//! fields to table columns by name and upserts every row. Columns the frame
//! does not name keep their stored values.

use std::fmt;

use tab_core::{Columns, CursorError, ResultBatch, Row, Value, ValueKind};
use tracing::{debug, warn};

use crate::TabStore;
use crate::convert::decode_declared;
use crate::error::StoreError;
use crate::ident::{normalize, quote};
use crate::schema::TableColumn;
use crate::upsert::merge_sql;

// ---------------------------------------------------------------------------
// SaveMode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    #[default]
    Append,
    Overwrite,
    ErrorIfExists,
    Ignore,
}

impl SaveMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::Overwrite => "overwrite",
            Self::ErrorIfExists => "error_if_exists",
            Self::Ignore => "ignore",
        }
    }
}

impl fmt::Display for SaveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub kind: ValueKind,
    pub nullable: bool,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ValueKind, nullable: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            nullable,
        }
    }
}

/// An in-memory dataset: rows shaped by a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    schema: Vec<Field>,
    rows: Vec<Row>,
}

impl Frame {
    /// Build a frame, checking every row against the schema.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Cursor`] when a row's width differs from the schema
    /// - [`StoreError::NullViolation`] for a null in a non-nullable field
    /// - [`StoreError::InvalidState`] for a cell whose kind differs from its field
    pub fn new(schema: Vec<Field>, rows: Vec<Row>) -> Result<Self, StoreError> {
        for (n, row) in rows.iter().enumerate() {
            if row.len() != schema.len() {
                return Err(CursorError::InvalidArgument(format!(
                    "row {} has {} values but the schema has {} fields",
                    n + 1,
                    row.len(),
                    schema.len()
                ))
                .into());
            }
            for (field, value) in schema.iter().zip(row.values()) {
                match value {
                    Value::Null if !field.nullable => {
                        return Err(StoreError::NullViolation {
                            field: field.name.clone(),
                        });
                    }
                    Value::Null => {}
                    value if value.kind() != field.kind => {
                        return Err(StoreError::InvalidState(format!(
                            "field {} expects {} but row {} holds {}",
                            field.name,
                            field.kind,
                            n + 1,
                            value.kind()
                        )));
                    }
                    _ => {}
                }
            }
        }
        Ok(Self { schema, rows })
    }

    #[must_use]
    pub fn schema(&self) -> &[Field] {
        &self.schema
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
}

// ---------------------------------------------------------------------------
// WriteOptions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    pub table: String,
    pub mode: SaveMode,
}

impl WriteOptions {
    /// Append into `table`.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            mode: SaveMode::Append,
        }
    }

    #[must_use]
    pub const fn mode(mut self, mode: SaveMode) -> Self {
        self.mode = mode;
        self
    }
}

// ---------------------------------------------------------------------------
// Store operations
// ---------------------------------------------------------------------------

/// Match a field name to a table column; exact first, then ignoring ASCII case.
fn resolve<'a>(columns: &'a [TableColumn], name: &str) -> Option<&'a TableColumn> {
    columns
        .iter()
        .find(|c| c.name == name)
        .or_else(|| columns.iter().find(|c| c.name.eq_ignore_ascii_case(name)))
}

impl TabStore {
    /// Write every row of `frame` into the target table.
    ///
    /// # Errors
    ///
    /// - [`StoreError::UnsupportedSaveMode`] for any mode but append
    /// - [`StoreError::TableNotFound`] / [`StoreError::UnknownColumn`] when
    ///   the target does not match the frame
    /// - [`StoreError::LibSql`] if a write fails; nothing is written then
    pub async fn save(&self, frame: &Frame, options: &WriteOptions) -> Result<u64, StoreError> {
        if options.mode != SaveMode::Append {
            warn!(mode = %options.mode, table = %options.table, "save rejected");
            return Err(StoreError::UnsupportedSaveMode(options.mode));
        }

        let table = normalize(&options.table, self.fold_identifiers());
        let columns = self.table_columns(&options.table).await?;
        let mut targets = Vec::with_capacity(frame.schema().len());
        for field in frame.schema() {
            let name = normalize(&field.name, self.fold_identifiers());
            let column = resolve(&columns, &name).ok_or_else(|| StoreError::UnknownColumn {
                table: table.clone(),
                column: name.clone(),
            })?;
            targets.push(column.name.clone());
        }

        let keys = columns
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.name.clone())
            .collect::<Vec<_>>();
        let sql = merge_sql(&table, &targets, &keys);
        let written = self.write_rows(&sql, frame.rows()).await?;
        debug!(%table, written, "frame saved");
        Ok(written)
    }

    /// Read a whole table, columns in declaration order.
    ///
    /// Cells are decoded by declared type, so timestamp, decimal and boolean
    /// columns come back as those kinds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TableNotFound`] if the table does not exist.
    pub async fn load(&self, table: &str) -> Result<ResultBatch, StoreError> {
        let columns = self.table_columns(table).await?;
        let stored = normalize(table, self.fold_identifiers());
        let select = columns
            .iter()
            .map(|c| quote(&c.name))
            .collect::<Vec<_>>()
            .join(", ");
        let raw = self
            .query(&format!(
                "SELECT {select} FROM {}",
                quote(&stored)
            ))
            .await?;

        let (_, rows) = raw.into_parts();
        let rows = rows
            .into_iter()
            .map(|row| {
                Row::new(
                    row.into_values()
                        .into_iter()
                        .zip(&columns)
                        .map(|(value, column)| decode_declared(value, column.declared))
                        .collect(),
                )
            })
            .collect();
        let names = Columns::new(columns.into_iter().map(|c| c.name));
        Ok(ResultBatch::new(names, rows)?)
    }

    /// Column names of a table, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TableNotFound`] if the table does not exist.
    pub async fn describe(&self, table: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .table_columns(table)
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tab_core::row;

    fn id_v1() -> Vec<Field> {
        vec![
            Field::new("id", ValueKind::Integer, false),
            Field::new("v1", ValueKind::Text, true),
        ]
    }

    #[test]
    fn frame_rejects_null_in_required_field() {
        let err = Frame::new(id_v1(), vec![row![Value::Null, "x"]]).unwrap_err();
        assert!(matches!(err, StoreError::NullViolation { ref field } if field == "id"));
    }

    #[test]
    fn frame_accepts_null_in_nullable_field() {
        let frame = Frame::new(id_v1(), vec![row![1, Value::Null]]).unwrap();
        assert_eq!(frame.len(), 1);
    }

    #[test]
    fn frame_rejects_wrong_width() {
        let err = Frame::new(id_v1(), vec![row![1]]).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Cursor(CursorError::InvalidArgument(_))
        ));
    }

    #[test]
    fn frame_rejects_wrong_kind() {
        let err = Frame::new(id_v1(), vec![row!["1", "x"]]).unwrap_err();
        assert!(matches!(err, StoreError::InvalidState(_)));
    }

    #[test]
    fn append_is_the_default_mode() {
        let options = WriteOptions::new("table1");
        assert_eq!(options.mode, SaveMode::Append);
        assert_eq!(options.mode(SaveMode::Ignore).mode.to_string(), "ignore");
    }

    #[test]
    fn resolve_prefers_exact_match() {
        let columns = vec![
            TableColumn {
                name: "id".into(),
                declared: None,
                not_null: false,
                primary_key: false,
            },
            TableColumn {
                name: "ID".into(),
                declared: None,
                not_null: false,
                primary_key: false,
            },
        ];
        assert_eq!(resolve(&columns, "ID").map(|c| c.name.as_str()), Some("ID"));
        assert_eq!(resolve(&columns, "Id").map(|c| c.name.as_str()), Some("id"));
        assert!(resolve(&columns, "V1").is_none());
    }
}
