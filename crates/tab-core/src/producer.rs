//! The seam between a query engine and the cursor.
//!
//! A producer executes a query and hands back every row already in final
//! order. Sorting, joins and filtering all happen on the producer side; the
//! cursor only reads.

use crate::cursor::TabularCursor;
use crate::error::CursorError;
use crate::row::ResultBatch;

/// Executes queries and materializes their results.
#[allow(async_fn_in_trait)]
pub trait RowProducer {
    type Error: From<CursorError>;

    /// Run `sql` and collect its full result.
    async fn collect(&self, sql: &str) -> Result<ResultBatch, Self::Error>;

    /// Run `sql` and wrap the result in a cursor positioned before the first row.
    async fn cursor(&self, sql: &str) -> Result<TabularCursor, Self::Error> {
        Ok(self.collect(sql).await?.into_cursor())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::row;
    use crate::row::Columns;

    /// Serves canned batches keyed by query text.
    struct Canned(HashMap<&'static str, ResultBatch>);

    impl RowProducer for Canned {
        type Error = CursorError;

        async fn collect(&self, sql: &str) -> Result<ResultBatch, CursorError> {
            self.0
                .get(sql)
                .cloned()
                .ok_or_else(|| CursorError::InvalidArgument(format!("unknown query: {sql}")))
        }
    }

    fn canned() -> Canned {
        let batch = ResultBatch::new(
            Columns::new(["A_STRING", "COL1"]),
            vec![row!["b", 20], row!["c", 30], row!["a", 40]],
        )
        .unwrap();
        Canned(HashMap::from([("SELECT A_STRING, COL1 FROM T ORDER BY COL1", batch)]))
    }

    #[tokio::test]
    async fn cursor_preserves_producer_order() {
        let producer = canned();
        let mut rs = producer
            .cursor("SELECT A_STRING, COL1 FROM T ORDER BY COL1")
            .await
            .unwrap();
        let mut names = Vec::new();
        while rs.advance() {
            names.push(rs.get_string(1).unwrap().unwrap());
        }
        assert_eq!(names, ["b", "c", "a"]);
    }

    #[tokio::test]
    async fn producer_errors_surface() {
        let producer = canned();
        let err = producer.cursor("SELECT 1").await.unwrap_err();
        assert_eq!(err, CursorError::InvalidArgument("unknown query: SELECT 1".into()));
    }
}
