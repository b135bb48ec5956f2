//! Table DDL: `TableSpec`, `ColumnSpec`, `SqlType`.

use std::fmt;

use tracing::debug;

use crate::TabStore;
use crate::error::StoreError;
use crate::ident::{normalize, qualified, quote};

/// Declared column types.
///
/// SQLite maps these names onto its affinities: `BIGINT` is integer,
/// `VARCHAR`/`CHAR` are text, `DOUBLE` is real, the rest are numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Integer,
    BigInt,
    Varchar(Option<u32>),
    Char(u32),
    Timestamp,
    Date,
    Decimal,
    Double,
    Boolean,
}

impl SqlType {
    /// Parse a declared type as reported by `PRAGMA table_info`.
    #[must_use]
    pub fn parse(declared: &str) -> Option<Self> {
        let upper = declared.trim().to_ascii_uppercase();
        let (base, len) = match upper.split_once('(') {
            Some((base, rest)) => (
                base.trim(),
                rest.trim_end_matches(')').trim().parse::<u32>().ok(),
            ),
            None => (upper.as_str(), None),
        };
        Some(match base {
            "INTEGER" | "INT" => Self::Integer,
            "BIGINT" => Self::BigInt,
            "VARCHAR" => Self::Varchar(len),
            "CHAR" => Self::Char(len.unwrap_or(1)),
            "TIMESTAMP" => Self::Timestamp,
            "DATE" => Self::Date,
            "DECIMAL" => Self::Decimal,
            "DOUBLE" => Self::Double,
            "BOOLEAN" => Self::Boolean,
            _ => return None,
        })
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => f.write_str("INTEGER"),
            Self::BigInt => f.write_str("BIGINT"),
            Self::Varchar(None) => f.write_str("VARCHAR"),
            Self::Varchar(Some(len)) => write!(f, "VARCHAR({len})"),
            Self::Char(len) => write!(f, "CHAR({len})"),
            Self::Timestamp => f.write_str("TIMESTAMP"),
            Self::Date => f.write_str("DATE"),
            Self::Decimal => f.write_str("DECIMAL"),
            Self::Double => f.write_str("DOUBLE"),
            Self::Boolean => f.write_str("BOOLEAN"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub family: Option<String>,
    pub name: String,
    pub sql_type: SqlType,
    pub not_null: bool,
}

impl ColumnSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            family: None,
            name: name.into(),
            sql_type,
            not_null: false,
        }
    }

    /// Place the column in a column family (`cf1.a`).
    #[must_use]
    pub fn in_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// The name the column is stored under.
    #[must_use]
    pub fn stored_name(&self, fold: bool) -> String {
        qualified(self.family.as_deref(), &self.name, fold)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
    pub primary_key: Vec<String>,
    pub if_not_exists: bool,
}

impl TableSpec {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
            if_not_exists: false,
        }
    }

    #[must_use]
    pub fn column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    #[must_use]
    pub fn primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = columns.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// Render the `CREATE TABLE` statement.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidState`] for a table without columns and
    /// [`StoreError::UnknownColumn`] for a key column the table does not declare.
    pub fn to_sql(&self, fold: bool) -> Result<String, StoreError> {
        let table = normalize(&self.name, fold);
        if self.columns.is_empty() {
            return Err(StoreError::InvalidState(format!(
                "table {table} declares no columns"
            )));
        }

        let stored: Vec<String> = self.columns.iter().map(|c| c.stored_name(fold)).collect();
        let mut parts: Vec<String> = self
            .columns
            .iter()
            .zip(&stored)
            .map(|(column, name)| {
                let mut def = format!("{} {}", quote(name), column.sql_type);
                if column.not_null {
                    def.push_str(" NOT NULL");
                }
                def
            })
            .collect();

        if !self.primary_key.is_empty() {
            let mut keys = Vec::with_capacity(self.primary_key.len());
            for key in &self.primary_key {
                let key = normalize(key, fold);
                if !stored.contains(&key) {
                    return Err(StoreError::UnknownColumn {
                        table,
                        column: key,
                    });
                }
                keys.push(quote(&key));
            }
            parts.push(format!("PRIMARY KEY ({})", keys.join(", ")));
        }

        let guard = if self.if_not_exists {
            "IF NOT EXISTS "
        } else {
            ""
        };
        Ok(format!(
            "CREATE TABLE {guard}{} ({})",
            quote(&table),
            parts.join(", ")
        ))
    }
}

/// A column as the catalog reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    pub name: String,
    pub declared: Option<SqlType>,
    pub not_null: bool,
    pub primary_key: bool,
}

impl TabStore {
    /// Catalog columns of a stored table, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TableNotFound`] when the table has no columns.
    pub async fn table_columns(&self, table: &str) -> Result<Vec<TableColumn>, StoreError> {
        let stored = normalize(table, self.fold_identifiers());
        let mut rows = self
            .conn()
            .query(
                "SELECT name, type, \"notnull\", pk FROM pragma_table_info(?1) ORDER BY cid",
                [stored.as_str()],
            )
            .await?;

        let mut columns = Vec::new();
        while let Some(row) = rows.next().await? {
            let declared = row.get::<Option<String>>(1)?;
            columns.push(TableColumn {
                name: row.get::<String>(0)?,
                declared: declared.as_deref().and_then(SqlType::parse),
                not_null: row.get::<i64>(2)? != 0,
                primary_key: row.get::<i64>(3)? != 0,
            });
        }

        if columns.is_empty() {
            return Err(StoreError::TableNotFound(stored));
        }
        Ok(columns)
    }

    /// Create a table from a [`TableSpec`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the table definition is invalid or the statement fails.
    pub async fn create_table(&self, spec: &TableSpec) -> Result<(), StoreError> {
        let sql = spec.to_sql(self.fold_identifiers())?;
        debug!(%sql, "create table");
        self.conn().execute(&sql, ()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn family_table() -> TableSpec {
        TableSpec::new("t1")
            .column(ColumnSpec::new("a_string", SqlType::Varchar(None)).not_null())
            .column(ColumnSpec::new("a", SqlType::Integer).in_family("cf1"))
            .column(ColumnSpec::new("col1", SqlType::Integer))
            .primary_key(["a_string"])
    }

    #[test]
    fn renders_family_columns_and_key() {
        assert_eq!(
            family_table().to_sql(true).unwrap(),
            "CREATE TABLE \"T1\" (\"A_STRING\" VARCHAR NOT NULL, \"CF1.A\" INTEGER, \
             \"COL1\" INTEGER, PRIMARY KEY (\"A_STRING\"))"
        );
    }

    #[test]
    fn if_not_exists_guard() {
        let sql = family_table().if_not_exists().to_sql(true).unwrap();
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS \"T1\""));
    }

    #[test]
    fn unknown_key_column_is_rejected() {
        let err = family_table()
            .primary_key(["missing"])
            .to_sql(true)
            .unwrap_err();
        assert!(
            matches!(err, StoreError::UnknownColumn { ref column, .. } if column == "MISSING")
        );
    }

    #[test]
    fn empty_table_is_invalid() {
        let err = TableSpec::new("t").to_sql(true).unwrap_err();
        assert!(matches!(err, StoreError::InvalidState(_)));
    }

    #[rstest]
    #[case(SqlType::Varchar(Some(10)), "VARCHAR(10)")]
    #[case(SqlType::Char(1), "CHAR(1)")]
    #[case(SqlType::BigInt, "BIGINT")]
    #[case(SqlType::Timestamp, "TIMESTAMP")]
    fn declared_type_parses_back(#[case] ty: SqlType, #[case] declared: &str) {
        assert_eq!(ty.to_string(), declared);
        assert_eq!(SqlType::parse(declared), Some(ty));
    }

    #[test]
    fn unknown_declared_type() {
        assert_eq!(SqlType::parse("GEOMETRY"), None);
        assert_eq!(SqlType::parse("varchar"), Some(SqlType::Varchar(None)));
    }
}
