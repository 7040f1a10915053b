//! In-memory row source for development and testing.

use crate::error::Result;
use crate::models::Geometry;
use crate::ports::{RowIter, RowSource};

/// Table held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    name: String,
    rows: Vec<Geometry>,
    reported_count: Option<u64>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, rows: Vec<Geometry>) -> Self {
        Self {
            name: name.into(),
            rows,
            reported_count: None,
        }
    }

    /// Report `count` rows regardless of how many are stored, as a table
    /// modified between its count query and its select would.
    pub fn with_reported_count(mut self, count: u64) -> Self {
        self.reported_count = Some(count);
        self
    }

    pub fn push(&mut self, geometry: Geometry) {
        self.rows.push(geometry);
    }
}

impl RowSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn row_count(&self) -> Result<u64> {
        Ok(self.reported_count.unwrap_or(self.rows.len() as u64))
    }

    fn rows(&self) -> Result<RowIter<'_>> {
        Ok(Box::new(self.rows.iter().cloned().map(Ok)))
    }
}
