use clap::{Args, Parser, Subcommand, ValueEnum};
use tab_config::TabConfig;

pub mod global;

pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `tabula` binary.
#[derive(Debug, Parser)]
#[command(
    name = "tabula",
    version,
    about = "Tabula - run SQL, read rows through a cursor"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw (defaults to general.format)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Max rows to print (defaults to general.default_limit)
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database path (overrides store.path)
    #[arg(long, global = true)]
    pub db: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a query and print its rows
    Query(SqlArgs),
    /// Run a batch of statements (DDL/DML)
    Exec(SqlArgs),
    /// List user tables
    Tables,
    /// List a table's columns in declaration order
    Describe(DescribeArgs),
}

#[derive(Debug, Args)]
pub struct SqlArgs {
    /// SQL text
    pub sql: String,
}

#[derive(Debug, Args)]
pub struct DescribeArgs {
    /// Table name (unquoted names fold to upper case)
    pub table: String,
}

impl Cli {
    /// Resolve global flags, falling back to configured defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured format is not a known output format.
    pub fn global_flags(&self, config: &TabConfig) -> anyhow::Result<GlobalFlags> {
        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::from_str(&config.general.format, true)
                .map_err(|error| anyhow::anyhow!("invalid general.format: {error}"))?,
        };
        Ok(GlobalFlags {
            format,
            limit: self.limit.unwrap_or(config.general.default_limit),
            quiet: self.quiet,
            verbose: self.verbose,
        })
    }

    /// Apply command-line overrides to loaded configuration.
    pub fn apply_overrides(&self, config: &mut TabConfig) {
        if let Some(db) = &self.db {
            config.store.path.clone_from(db);
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;
    use tab_config::TabConfig;

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "tabula",
            "--format",
            "table",
            "--limit",
            "10",
            "--verbose",
            "tables",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, Some(OutputFormat::Table));
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Tables));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["tabula", "query", "SELECT 1", "--format", "raw", "-q"])
            .expect("cli should parse");

        assert_eq!(cli.format, Some(OutputFormat::Raw));
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Query(ref args) if args.sql == "SELECT 1"));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["tabula", "--format", "xml", "tables"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn config_fills_missing_flags() {
        let cli = Cli::try_parse_from(["tabula", "describe", "t1"]).expect("cli should parse");
        let mut config = TabConfig::default();
        config.general.format = "json".into();
        config.general.default_limit = 3;

        let flags = cli.global_flags(&config).expect("flags resolve");
        assert_eq!(flags.format, OutputFormat::Json);
        assert_eq!(flags.limit, 3);
        assert!(matches!(cli.command, Commands::Describe(ref args) if args.table == "t1"));
    }

    #[test]
    fn db_flag_overrides_store_path() {
        let cli = Cli::try_parse_from(["tabula", "--db", "./orders.db", "tables"])
            .expect("cli should parse");
        let mut config = TabConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.store.path, "./orders.db");
    }
}
