//! Error types for the Solene exporter

use crate::models::GeometryType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SoleneError {
    // Geometry errors
    #[error("Geometry at row {row} is a {geometry_type}, not a (multi-)polygon")]
    UnsupportedGeometry {
        row: u64,
        geometry_type: GeometryType,
    },

    // Driver errors
    #[error("{driver} does not support import")]
    UnsupportedDirection { driver: String },

    #[error("Unsupported format: .{extension}. Supported formats: {}", supported.join(", "))]
    UnsupportedFormat {
        extension: String,
        supported: Vec<String>,
    },

    #[error("Driver not registered: {name}")]
    DriverNotFound { name: String },

    // Row source errors
    #[error("Row source {source_name} failed: {reason}")]
    Source { source_name: String, reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SoleneError {
    /// Build a row source failure
    pub fn source_failure(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        SoleneError::Source {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SoleneError>;
