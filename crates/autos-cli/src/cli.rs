//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Autos CLI - Look up and normalize judicial process records.
#[derive(Debug, Parser)]
#[command(name = "autos")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "AUTOS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (numbers only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a process from its tribunal, normalize and store it
    Lookup(LookupArgs),

    /// Normalize a saved source document
    Normalize(NormalizeArgs),

    /// Show a stored process
    Show(ShowArgs),

    /// List known tribunals
    Tribunals,
}

/// Arguments for the lookup command.
#[derive(Debug, Parser)]
pub struct LookupArgs {
    /// Process number, formatted or 20 digits
    pub number: String,

    /// Tribunal code (defaults to the configured tribunal)
    #[arg(short, long)]
    pub tribunal: Option<String>,

    /// Do not persist the result
    #[arg(long)]
    pub no_save: bool,
}

/// Arguments for the normalize command.
#[derive(Debug, Parser)]
pub struct NormalizeArgs {
    /// JSON file with the source document
    #[arg(short = 'i', long)]
    pub file: Option<PathBuf>,

    /// Read the source document from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Number to use when the document carries none
    #[arg(short, long)]
    pub number: Option<String>,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Process number, formatted or 20 digits
    pub number: String,

    /// Tribunal code (defaults to the configured tribunal)
    #[arg(short, long)]
    pub tribunal: Option<String>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
