use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Solene - Export polygonal surface tables to CIR
#[derive(Parser, Debug)]
#[command(name = "solene")]
#[command(about = "Export polygonal surface tables to the Solene CIR format", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./solene.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export a table of surfaces to a CIR file
    Export(ExportArgs),

    /// Import a CIR file (not supported by the CIR driver)
    Import(ImportArgs),

    /// List registered drivers and their formats
    Formats,

    /// Show the effective configuration and where each value comes from
    Config,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Input table: a WKT file (one geometry per line) or a GeoJSON file
    pub input: PathBuf,

    /// Output file; an existing file is overwritten
    pub output: PathBuf,

    /// How to read the input (auto, wkt, geojson)
    #[arg(long, value_name = "FORMAT")]
    pub input_format: Option<String>,

    /// Export format when the output path has no extension
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// File to import
    pub file: PathBuf,
}
