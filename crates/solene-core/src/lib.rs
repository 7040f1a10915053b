//! Solene Core - CIR serialization, drivers, and row sources
//!
//! This crate turns tables of polygonal surfaces into Solene CIR documents.
//! Geometric strategies (face normals) are injected through the traits in
//! [`ports`].

pub mod config;
pub mod error;
pub mod export;
pub mod formats;
pub mod models;
pub mod plugin;
pub mod ports;
pub mod repair;
pub mod sources;

pub use error::{Result, SoleneError};
pub use export::CirExporter;
pub use formats::{CirDriver, Driver, DriverRegistry, ExportSummary};
pub use plugin::SolenePlugin;
