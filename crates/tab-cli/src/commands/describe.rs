use anyhow::Context;
use tab_store::TabStore;

use crate::cli::{DescribeArgs, GlobalFlags};
use crate::output::{ListResponse, render_list};

pub async fn handle(
    args: &DescribeArgs,
    store: &TabStore,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let columns = store
        .describe(&args.table)
        .await
        .with_context(|| format!("failed to describe '{}'", args.table))?;
    let response = ListResponse {
        header: "column",
        items: columns,
    };
    println!("{}", render_list(&response, flags.format)?);
    Ok(())
}
