//! Export command implementation

use super::default_registry;
use crate::cli::ExportArgs;
use crate::config_loader::load_config_with_overrides;
use crate::output::OutputWriter;
use crate::output_types::ExportOutput;
use crate::progress::ExportBar;
use anyhow::{Context, Result};
use solene_core::config::CliConfigOverrides;
use solene_core::ports::{ExportProgress, NoProgress};
use solene_core::sources::{open_source, InputFormat};
use std::path::Path;

pub fn execute(args: ExportArgs, config_path: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let input_format = args
        .input_format
        .as_deref()
        .map(InputFormat::parse)
        .transpose()?;

    let config = load_config_with_overrides(
        config_path,
        CliConfigOverrides {
            format: args.format.map(|f| f.to_lowercase()),
            input_format,
            progress: args.no_progress.then_some(false),
        },
    )?;

    let registry = default_registry();
    let driver = if args.output.extension().is_some() {
        registry.find_exporter(&args.output)?
    } else {
        registry.exporter_for_format(&config.format.value)?
    };
    tracing::debug!(driver = driver.driver_name(), "Selected export driver");

    let source = open_source(&args.input, config.input_format.value)
        .with_context(|| format!("Failed to open input table {}", args.input.display()))?;

    let bar;
    let progress: &dyn ExportProgress = if config.progress.value && !output.is_json() {
        bar = ExportBar::new(&format!("Exporting {}", source.name()));
        &bar
    } else {
        &NoProgress
    };

    let summary = driver.export_table(source.as_ref(), &args.output, progress)?;

    if summary.declared_rows != summary.written_faces {
        output.warning(format!(
            "Header declares {} rows but {} faces were written",
            summary.declared_rows, summary.written_faces
        ));
    }

    if output.is_json() {
        output.result(ExportOutput {
            input: args.input,
            output: summary.path,
            driver: driver.driver_name().to_string(),
            declared_rows: summary.declared_rows,
            written_faces: summary.written_faces,
        })?;
    } else {
        output.success(format!(
            "Exported {} faces to {}",
            summary.written_faces,
            summary.path.display()
        ));
        output.kv("Driver", driver.driver_name());
        output.kv("Table", source.name());
    }

    Ok(())
}
