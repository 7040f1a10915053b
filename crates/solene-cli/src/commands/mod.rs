//! Command implementations

mod config;
mod export;
mod formats;
mod import;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;
use solene_core::{DriverRegistry, SolenePlugin};
use solene_geo::NewellNormal;
use std::sync::Arc;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Export(args) => export::execute(args, config_path, &output),
        Commands::Import(args) => import::execute(args, &output),
        Commands::Formats => formats::execute(&output),
        Commands::Config => config::execute(config_path, &output),
    }
}

/// Registry with the Solene plugin loaded
fn default_registry() -> DriverRegistry {
    let mut registry = DriverRegistry::new();
    SolenePlugin::new(Arc::new(NewellNormal)).load(&mut registry);
    registry
}
