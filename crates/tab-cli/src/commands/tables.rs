use tab_store::TabStore;

use crate::cli::GlobalFlags;
use crate::output::{ListResponse, render_list};

pub async fn handle(store: &TabStore, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = ListResponse {
        header: "table",
        items: store.tables().await?,
    };
    println!("{}", render_list(&response, flags.format)?);
    Ok(())
}
