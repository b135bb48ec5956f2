//! SQL queries collected into result batches.

use tab_core::{Columns, ResultBatch, Row, RowProducer};
use tracing::debug;

use crate::TabStore;
use crate::convert::from_sql_value;
use crate::error::StoreError;

impl TabStore {
    /// Run a query and collect every row, in the order the engine returns them.
    ///
    /// Column names are the statement's result names: declared names for
    /// `SELECT *`, aliases where the query gives them.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LibSql`] if the statement fails.
    pub async fn query(&self, sql: &str) -> Result<ResultBatch, StoreError> {
        let mut rows = self.conn().query(sql, ()).await?;
        let count = rows.column_count();
        let columns = Columns::new(
            (0..count).map(|i| rows.column_name(i).unwrap_or_default().to_string()),
        );

        let mut collected = Vec::new();
        while let Some(row) = rows.next().await? {
            let values = (0..count)
                .map(|i| row.get_value(i).map(from_sql_value))
                .collect::<Result<Vec<_>, _>>()?;
            collected.push(Row::new(values));
        }

        debug!(%sql, rows = collected.len(), columns = columns.len(), "query collected");
        Ok(ResultBatch::new(columns, collected)?)
    }
}

impl RowProducer for TabStore {
    type Error = StoreError;

    async fn collect(&self, sql: &str) -> Result<ResultBatch, StoreError> {
        self.query(sql).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tab_core::Value;

    #[tokio::test]
    async fn collects_aliases_and_values() {
        let store = TabStore::open_local(":memory:").await.unwrap();
        let batch = store
            .query("SELECT 1 AS N, 2.5 AS R, 'x' AS S, NULL AS Z, x'0102' AS B")
            .await
            .unwrap();
        assert_eq!(batch.columns().as_slice(), &["N", "R", "S", "Z", "B"]);
        assert_eq!(
            batch.rows()[0].values(),
            &[
                Value::Integer(1),
                Value::Double(2.5),
                Value::Text("x".into()),
                Value::Null,
                Value::Bytes(vec![1, 2]),
            ]
        );
    }

    #[tokio::test]
    async fn producer_cursor_reads_rows() {
        let store = TabStore::open_local(":memory:").await.unwrap();
        let mut rs = store
            .cursor("SELECT 'a' AS K UNION ALL SELECT 'b'")
            .await
            .unwrap();
        assert!(rs.advance());
        assert_eq!(rs.get_string("K").unwrap(), Some("a".into()));
        assert!(rs.advance());
        assert_eq!(rs.get_string(1).unwrap(), Some("b".into()));
        assert!(!rs.advance());
    }

    #[tokio::test]
    async fn bad_sql_is_a_hard_failure() {
        let store = TabStore::open_local(":memory:").await.unwrap();
        let err = store.cursor("SELECT * FROM MISSING").await.unwrap_err();
        assert!(matches!(err, StoreError::LibSql(_)));
    }
}
