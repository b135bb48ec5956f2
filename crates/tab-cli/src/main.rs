use anyhow::Context;
use clap::Parser;
use tab_config::TabConfig;
use tab_store::TabStore;

mod cli;
mod commands;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("tabula error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config = TabConfig::load_with_dotenv().context("failed to load configuration")?;
    cli.apply_overrides(&mut config);
    let flags = cli.global_flags(&config)?;

    if config.store.is_in_memory() {
        tracing::debug!("store is in memory; nothing persists after exit");
    }
    let store = TabStore::from_config(&config.store)
        .await
        .with_context(|| format!("failed to open store at '{}'", config.store.path))?;

    commands::dispatch(&cli.command, &store, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("TABULA_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
