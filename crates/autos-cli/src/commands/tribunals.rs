//! Tribunals command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use autos_sources::TribunalRegistry;

/// Execute the tribunals command.
pub fn execute_tribunals(config: &Config, formatter: &Formatter) -> Result<()> {
    let registry = TribunalRegistry::from_config(config.sources.tribunals.clone());
    println!("{}", formatter.format_tribunals(&registry.list())?);
    Ok(())
}
