use anyhow::Context;
use tab_core::RowProducer;
use tab_store::TabStore;

use crate::cli::{GlobalFlags, SqlArgs};
use crate::output::{QueryResponse, render_query};

/// Read at most `limit` rows through a cursor.
pub async fn collect(store: &TabStore, sql: &str, limit: u32) -> anyhow::Result<QueryResponse> {
    let mut rs = store.cursor(sql).await.context("query failed")?;
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);

    let columns = rs.columns().iter().map(String::from).collect();
    let mut rows = Vec::new();
    while rows.len() < limit && rs.advance() {
        let row = (1..=rs.column_count())
            .map(|ordinal| rs.get_object(ordinal))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }

    tracing::debug!(rows = rows.len(), limit, "query rendered");
    Ok(QueryResponse { columns, rows })
}

pub async fn handle(args: &SqlArgs, store: &TabStore, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = collect(store, &args.sql, flags.limit).await?;
    println!("{}", render_query(&response, flags.format)?);
    Ok(())
}
