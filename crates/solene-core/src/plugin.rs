//! Solene driver plugin
//!
//! Bundles the Solene drivers so a host can add or remove them from its own
//! `DriverRegistry` in one call.

use std::sync::Arc;

use crate::error::Result;
use crate::formats::cir::{CirDriver, DRIVER_NAME};
use crate::formats::DriverRegistry;
use crate::ports::NormalResolver;

pub const PLUGIN_NAME: &str = "Solene driver plugin";
pub const PLUGIN_VERSION: &str = "1.0";

/// Registers the CIR driver, sharing one normal resolver between loads
pub struct SolenePlugin {
    normals: Arc<dyn NormalResolver>,
}

impl SolenePlugin {
    pub fn new(normals: Arc<dyn NormalResolver>) -> Self {
        Self { normals }
    }

    pub fn name(&self) -> &str {
        PLUGIN_NAME
    }

    pub fn version(&self) -> &str {
        PLUGIN_VERSION
    }

    /// Register every Solene driver
    pub fn load(&self, registry: &mut DriverRegistry) {
        let normals = Box::new(Arc::clone(&self.normals));
        registry.register(Box::new(CirDriver::new(normals)));
        tracing::debug!(plugin = PLUGIN_NAME, "Loaded");
    }

    /// Remove every Solene driver
    pub fn unload(&self, registry: &mut DriverRegistry) -> Result<()> {
        registry.unregister(DRIVER_NAME)?;
        tracing::debug!(plugin = PLUGIN_NAME, "Unloaded");
        Ok(())
    }
}
