//! Import command implementation

use super::default_registry;
use crate::cli::ImportArgs;
use crate::output::OutputWriter;
use anyhow::Result;
use solene_core::ports::NoProgress;

pub fn execute(args: ImportArgs, output: &OutputWriter) -> Result<()> {
    let registry = default_registry();
    let driver = registry.find_importer(&args.file)?;
    let rows = driver.import_file(&args.file, &NoProgress)?;

    output.info(format!("Read {} rows from {}", rows.len(), args.file.display()));
    Ok(())
}
