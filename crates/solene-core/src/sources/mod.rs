//! Row sources
//!
//! Concrete tables the exporter can stream from. Each source answers the row
//! count and the row stream separately, the same way a database answers a
//! `COUNT(*)` and a `SELECT`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{Result, SoleneError};
use crate::ports::RowSource;

pub mod geojson;
pub mod memory;
pub mod wkt;

pub use self::geojson::GeoJsonSource;
pub use self::memory::MemorySource;
pub use self::wkt::WktFileSource;

/// How an input table is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Pick by file extension
    #[default]
    Auto,
    /// One WKT geometry per line
    Wkt,
    /// GeoJSON feature collection, feature or geometry
    GeoJson,
}

impl InputFormat {
    /// Format implied by a file extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "wkt" | "txt" => Some(InputFormat::Wkt),
            "json" | "geojson" => Some(InputFormat::GeoJson),
            _ => None,
        }
    }

    /// Parse a format name
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(InputFormat::Auto),
            "wkt" => Ok(InputFormat::Wkt),
            "geojson" | "json" => Ok(InputFormat::GeoJson),
            _ => Err(SoleneError::ConfigInvalid {
                key: "input_format".to_string(),
                reason: format!("Invalid input format: {}. Use auto, wkt, or geojson", s),
            }),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Auto => f.write_str("auto"),
            InputFormat::Wkt => f.write_str("wkt"),
            InputFormat::GeoJson => f.write_str("geojson"),
        }
    }
}

/// Open an input file as a row source
pub fn open_source(path: &Path, format: InputFormat) -> Result<Box<dyn RowSource>> {
    tracing::debug!(path = %path.display(), format = %format, "Opening row source");

    match format {
        InputFormat::Wkt => Ok(Box::new(WktFileSource::open(path)?)),
        InputFormat::GeoJson => Ok(Box::new(GeoJsonSource::open(path)?)),
        InputFormat::Auto => open_source(path, detect_format(path)?),
    }
}

/// Concrete format implied by the file extension; never `Auto`
fn detect_format(path: &Path) -> Result<InputFormat> {
    let extension = path.extension().and_then(|e| e.to_str());
    extension
        .and_then(InputFormat::from_extension)
        .ok_or_else(|| SoleneError::UnsupportedFormat {
            extension: extension.unwrap_or("none").to_string(),
            supported: vec![
                "wkt".to_string(),
                "txt".to_string(),
                "json".to_string(),
                "geojson".to_string(),
            ],
        })
}

/// Table name derived from a file name
pub(crate) fn table_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(InputFormat::from_extension("WKT"), Some(InputFormat::Wkt));
        assert_eq!(InputFormat::from_extension("txt"), Some(InputFormat::Wkt));
        assert_eq!(InputFormat::from_extension("geojson"), Some(InputFormat::GeoJson));
        assert_eq!(InputFormat::from_extension("shp"), None);
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(InputFormat::parse("AUTO").unwrap(), InputFormat::Auto);
        assert_eq!(InputFormat::parse("json").unwrap(), InputFormat::GeoJson);
        assert!(InputFormat::parse("gml").is_err());
    }

    #[test]
    fn test_auto_detects_wkt_table() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("roofs.txt");
        std::fs::write(&path, "POLYGON((0 0,1 0,1 1,0 0))\n").unwrap();

        let source = open_source(&path, InputFormat::Auto).unwrap();
        assert_eq!(source.name(), "roofs");
        assert_eq!(source.row_count().unwrap(), 1);
        assert_eq!(detect_format(&path).unwrap(), InputFormat::Wkt);
    }

    #[test]
    fn test_open_unknown_extension() {
        let err = open_source(Path::new("table.gml"), InputFormat::Auto).err().unwrap();
        assert!(matches!(err, SoleneError::UnsupportedFormat { extension, .. } if extension == "gml"));
    }
}
