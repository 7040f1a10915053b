use serde::Serialize;
use std::path::PathBuf;

/// Output for export command
#[derive(Debug, Serialize)]
pub struct ExportOutput {
    pub input: PathBuf,
    pub output: PathBuf,
    pub driver: String,
    pub declared_rows: u64,
    pub written_faces: u64,
}

/// Output for formats command
#[derive(Debug, Serialize)]
pub struct FormatsOutput {
    pub drivers: Vec<DriverInfo>,
}

#[derive(Debug, Serialize)]
pub struct DriverInfo {
    pub name: String,
    pub export_formats: Vec<String>,
    pub import_formats: Vec<String>,
    pub description: Option<String>,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub format: ConfigValue<String>,
    pub input_format: ConfigValue<String>,
    pub progress: ConfigValue<bool>,
}

#[derive(Debug, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: String,
}
