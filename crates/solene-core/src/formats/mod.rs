//! Driver abstraction layer
//!
//! Each output format is handled by a `Driver`. The `DriverRegistry` is owned
//! by the calling application, which registers drivers into it and picks one
//! by file extension; nothing is registered globally.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{Result, SoleneError};
use crate::models::Geometry;
use crate::ports::{ExportProgress, RowSource};

pub mod cir;

pub use cir::{CirDriver, CirWriter};

/// Format driver trait that all drivers must implement
pub trait Driver: Send + Sync {
    /// Unique driver name, used as the registry key
    fn driver_name(&self) -> &str;

    /// File extensions this driver can write (e.g., ["cir"])
    fn export_formats(&self) -> &[&str];

    /// File extensions this driver claims for reading
    fn import_formats(&self) -> &[&str];

    /// Human-readable description of one of the driver's formats
    fn format_description(&self, format: &str) -> Option<&str>;

    /// Write every row of `source` to a newly created (or truncated) file
    fn export_table(
        &self,
        source: &dyn RowSource,
        path: &Path,
        progress: &dyn ExportProgress,
    ) -> Result<ExportSummary>;

    /// Read a file back into row geometries.
    ///
    /// Drivers are export-only unless they override this; the default fails
    /// before touching `path`.
    fn import_file(&self, _path: &Path, _progress: &dyn ExportProgress) -> Result<Vec<Geometry>> {
        Err(SoleneError::UnsupportedDirection {
            driver: self.driver_name().to_string(),
        })
    }
}

/// Outcome of a successful export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    /// Destination file
    pub path: PathBuf,

    /// Row count written in the document header
    pub declared_rows: u64,

    /// Faces actually written
    pub written_faces: u64,
}

/// Central registry of format drivers
pub struct DriverRegistry {
    drivers: Vec<Box<dyn Driver>>,
}

impl DriverRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            drivers: Vec::new(),
        }
    }

    /// Register a driver, replacing any driver with the same name
    pub fn register(&mut self, driver: Box<dyn Driver>) {
        let name = driver.driver_name().to_string();
        if self.unregister(&name).is_ok() {
            tracing::debug!(driver = %name, "Replaced registered driver");
        }
        self.drivers.push(driver);
    }

    /// Remove a driver by name and hand it back
    pub fn unregister(&mut self, name: &str) -> Result<Box<dyn Driver>> {
        let position = self
            .drivers
            .iter()
            .position(|d| d.driver_name() == name)
            .ok_or_else(|| SoleneError::DriverNotFound {
                name: name.to_string(),
            })?;
        Ok(self.drivers.remove(position))
    }

    /// Look up a driver by name
    pub fn driver(&self, name: &str) -> Option<&dyn Driver> {
        self.drivers
            .iter()
            .find(|d| d.driver_name() == name)
            .map(|d| d.as_ref())
    }

    /// Driver able to write the given path, chosen by extension
    pub fn find_exporter(&self, path: &Path) -> Result<&dyn Driver> {
        self.find_by_extension(path, |d| d.export_formats(), self.export_formats())
    }

    /// Driver claiming the given path for import, chosen by extension
    pub fn find_importer(&self, path: &Path) -> Result<&dyn Driver> {
        self.find_by_extension(path, |d| d.import_formats(), self.import_formats())
    }

    /// Driver writing files with the given extension
    pub fn exporter_for_format(&self, format: &str) -> Result<&dyn Driver> {
        self.drivers
            .iter()
            .find(|d| {
                d.export_formats()
                    .iter()
                    .any(|f| f.eq_ignore_ascii_case(format))
            })
            .map(|d| d.as_ref())
            .ok_or_else(|| SoleneError::UnsupportedFormat {
                extension: format.to_string(),
                supported: self.export_formats(),
            })
    }

    fn find_by_extension<'a>(
        &'a self,
        path: &Path,
        formats: impl Fn(&'a dyn Driver) -> &'a [&'a str],
        supported: Vec<String>,
    ) -> Result<&'a dyn Driver> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| SoleneError::UnsupportedFormat {
                extension: "none".to_string(),
                supported: supported.clone(),
            })?;

        self.drivers
            .iter()
            .map(|d| d.as_ref())
            .find(|d| formats(*d).iter().any(|f| f.eq_ignore_ascii_case(extension)))
            .ok_or_else(|| SoleneError::UnsupportedFormat {
                extension: extension.to_string(),
                supported,
            })
    }

    /// Get list of all export extensions
    pub fn export_formats(&self) -> Vec<String> {
        self.drivers
            .iter()
            .flat_map(|d| d.export_formats())
            .map(|s| s.to_string())
            .collect()
    }

    /// Get list of all import extensions
    pub fn import_formats(&self) -> Vec<String> {
        self.drivers
            .iter()
            .flat_map(|d| d.import_formats())
            .map(|s| s.to_string())
            .collect()
    }

    /// Get all registered drivers
    pub fn drivers(&self) -> &[Box<dyn Driver>] {
        &self.drivers
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock driver for testing
    struct MockDriver {
        name: &'static str,
        extensions: Vec<&'static str>,
    }

    impl Driver for MockDriver {
        fn driver_name(&self) -> &str {
            self.name
        }

        fn export_formats(&self) -> &[&str] {
            &self.extensions
        }

        fn import_formats(&self) -> &[&str] {
            &[]
        }

        fn format_description(&self, _format: &str) -> Option<&str> {
            Some(self.name)
        }

        fn export_table(
            &self,
            _source: &dyn RowSource,
            path: &Path,
            _progress: &dyn ExportProgress,
        ) -> Result<ExportSummary> {
            Ok(ExportSummary {
                path: path.to_path_buf(),
                declared_rows: 0,
                written_faces: 0,
            })
        }
    }

    fn mock(name: &'static str, extensions: Vec<&'static str>) -> Box<dyn Driver> {
        Box::new(MockDriver { name, extensions })
    }

    #[test]
    fn test_registry_creation() {
        let registry = DriverRegistry::new();
        assert_eq!(registry.drivers().len(), 0);
    }

    #[test]
    fn test_driver_registration() {
        let mut registry = DriverRegistry::new();
        registry.register(mock("Mock", vec!["cir", "val"]));

        assert_eq!(registry.drivers().len(), 1);
        assert_eq!(registry.export_formats(), vec!["cir", "val"]);
        assert!(registry.driver("Mock").is_some());
    }

    #[test]
    fn test_register_same_name_replaces() {
        let mut registry = DriverRegistry::new();
        registry.register(mock("Mock", vec!["cir"]));
        registry.register(mock("Mock", vec!["val"]));

        assert_eq!(registry.drivers().len(), 1);
        assert_eq!(registry.export_formats(), vec!["val"]);
    }

    #[test]
    fn test_exporter_detection() {
        let mut registry = DriverRegistry::new();
        registry.register(mock("Cir", vec!["cir"]));
        registry.register(mock("Val", vec!["val"]));

        let driver = registry.find_exporter(Path::new("out/site.CIR")).unwrap();
        assert_eq!(driver.driver_name(), "Cir");

        let driver = registry.find_exporter(Path::new("out/site.val")).unwrap();
        assert_eq!(driver.driver_name(), "Val");

        let driver = registry.exporter_for_format("val").unwrap();
        assert_eq!(driver.driver_name(), "Val");
    }

    #[test]
    fn test_unsupported_extension() {
        let mut registry = DriverRegistry::new();
        registry.register(mock("Cir", vec!["cir"]));

        let err = registry.find_exporter(Path::new("site.xyz")).err().unwrap();
        match err {
            SoleneError::UnsupportedFormat { extension, supported } => {
                assert_eq!(extension, "xyz");
                assert_eq!(supported, vec!["cir"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(registry.find_exporter(Path::new("no_extension")).is_err());
        assert!(registry.find_importer(Path::new("site.cir")).is_err());
    }

    #[test]
    fn test_unregister() {
        let mut registry = DriverRegistry::new();
        registry.register(mock("Cir", vec!["cir"]));

        let removed = registry.unregister("Cir").unwrap();
        assert_eq!(removed.driver_name(), "Cir");
        assert!(registry.drivers().is_empty());
        assert!(matches!(
            registry.unregister("Cir"),
            Err(SoleneError::DriverNotFound { .. })
        ));
    }

    #[test]
    fn test_default_import_is_unsupported() {
        let driver = MockDriver {
            name: "Mock",
            extensions: vec!["cir"],
        };
        let err = driver
            .import_file(Path::new("missing.cir"), &crate::ports::NoProgress)
            .unwrap_err();
        assert!(matches!(err, SoleneError::UnsupportedDirection { driver } if driver == "Mock"));
    }
}
