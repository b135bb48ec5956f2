//! UPSERT: insert a row, or update the row with the same key.
//!
//! Positional writes replace the whole row. Named-column writes only touch
//! the columns they name.

use tab_core::Row;
use tracing::{debug, warn};

use crate::TabStore;
use crate::convert::to_sql_value;
use crate::error::StoreError;
use crate::ident::{normalize, quote};

fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Positional `INSERT OR REPLACE` covering every column of a stored table.
pub(crate) fn upsert_sql(table: &str, width: usize) -> String {
    format!(
        "INSERT OR REPLACE INTO {} VALUES ({})",
        quote(table),
        placeholders(width)
    )
}

/// Named-column upsert that leaves unlisted columns of an existing row alone.
///
/// `keys` are the table's primary key columns. Without a key every row is a
/// plain insert.
pub(crate) fn merge_sql(table: &str, columns: &[String], keys: &[String]) -> String {
    let target = columns.iter().map(|c| quote(c)).collect::<Vec<_>>();
    let mut sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote(table),
        target.join(", "),
        placeholders(columns.len())
    );
    if keys.is_empty() {
        return sql;
    }

    let conflict = keys.iter().map(|k| quote(k)).collect::<Vec<_>>();
    let updates = columns
        .iter()
        .filter(|c| !keys.contains(c))
        .map(|c| format!("{0} = excluded.{0}", quote(c)))
        .collect::<Vec<_>>();
    if updates.is_empty() {
        sql.push_str(&format!(" ON CONFLICT ({}) DO NOTHING", conflict.join(", ")));
    } else {
        sql.push_str(&format!(
            " ON CONFLICT ({}) DO UPDATE SET {}",
            conflict.join(", "),
            updates.join(", ")
        ));
    }
    sql
}

fn params(row: &Row) -> Vec<libsql::Value> {
    row.values().iter().map(to_sql_value).collect()
}

impl TabStore {
    /// Upsert one row by position.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Arity`] if the row does not supply one value per
    /// table column, or [`StoreError::LibSql`] if the write fails.
    pub async fn upsert(&self, table: &str, row: &Row) -> Result<u64, StoreError> {
        self.upsert_all(table, std::slice::from_ref(row)).await
    }

    /// Upsert many rows by position in one transaction.
    ///
    /// Nothing is written if any row fails.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Arity`] if a row's width differs from the table,
    /// or [`StoreError::LibSql`] if a write fails.
    pub async fn upsert_all(&self, table: &str, rows: &[Row]) -> Result<u64, StoreError> {
        let columns = self.table_columns(table).await?;
        let stored = normalize(table, self.fold_identifiers());

        for row in rows {
            if row.len() != columns.len() {
                warn!(table = %stored, expected = columns.len(), actual = row.len(), "upsert rejected");
                return Err(StoreError::Arity {
                    table: stored,
                    expected: columns.len(),
                    actual: row.len(),
                });
            }
        }

        let sql = upsert_sql(&stored, columns.len());
        self.write_rows(&sql, rows).await
    }

    /// Execute `sql` once per row inside a transaction.
    pub(crate) async fn write_rows(&self, sql: &str, rows: &[Row]) -> Result<u64, StoreError> {
        let tx = self.conn().transaction().await?;
        let mut written = 0;
        for row in rows {
            match tx.execute(sql, params(row)).await {
                Ok(changed) => written += changed,
                Err(e) => {
                    warn!(%sql, error = %e, "write failed, rolling back");
                    if let Err(rollback) = tx.rollback().await {
                        warn!(error = %rollback, "rollback failed");
                    }
                    return Err(e.into());
                }
            }
        }
        tx.commit().await?;
        debug!(%sql, written, "rows committed");
        Ok(written)
    }
}
