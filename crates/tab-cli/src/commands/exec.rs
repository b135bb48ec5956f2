use anyhow::Context;
use tab_store::TabStore;

use crate::cli::{GlobalFlags, SqlArgs};

pub async fn handle(args: &SqlArgs, store: &TabStore, flags: &GlobalFlags) -> anyhow::Result<()> {
    store
        .execute_batch(&args.sql)
        .await
        .context("statement batch failed")?;
    if !flags.quiet {
        println!("ok");
    }
    Ok(())
}
