//! Autos CLI - Command-line interface for looking up judicial process records.

use autos_cli::commands;
use autos_cli::{Cli, Command, Config, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> autos_cli::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Lookup(args) => commands::execute_lookup(args, &config, &formatter).await?,
        Command::Normalize(args) => commands::execute_normalize(args, &config, &formatter)?,
        Command::Show(args) => commands::execute_show(args, &config, &formatter)?,
        Command::Tribunals => commands::execute_tribunals(&config, &formatter)?,
    }

    Ok(())
}

/// Logs go to stderr so `--format json` output stays parseable.
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
