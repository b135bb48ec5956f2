use tab_store::TabStore;

use crate::cli::{Commands, GlobalFlags};

pub mod describe;
pub mod exec;
pub mod query;
pub mod tables;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: &Commands,
    store: &TabStore,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Query(args) => query::handle(args, store, flags).await,
        Commands::Exec(args) => exec::handle(args, store, flags).await,
        Commands::Tables => tables::handle(store, flags).await,
        Commands::Describe(args) => describe::handle(args, store, flags).await,
    }
}
