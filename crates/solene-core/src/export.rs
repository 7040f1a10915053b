//! Row-streaming CIR export
//!
//! Each row is fully repaired, classified and written before the next one is
//! pulled from the source. The first error ends the export: bytes already
//! handed to the sink stay there, so a failure on row `k` leaves a truncated
//! document holding faces `1..k`.

use std::io::Write;

use crate::error::{Result, SoleneError};
use crate::formats::cir::CirWriter;
use crate::models::{DocumentHeader, Face, Feature, Geometry, GeometryType, Surface};
use crate::ports::{ExportProgress, NormalResolver, ZRepair};
use crate::repair::ZeroFillRepair;

/// Turns a stream of row geometries into a CIR document
pub struct CirExporter {
    normals: Box<dyn NormalResolver>,
    repair: Box<dyn ZRepair>,
}

impl CirExporter {
    /// Exporter using the default zero-fill elevation repair
    pub fn new(normals: Box<dyn NormalResolver>) -> Self {
        Self {
            normals,
            repair: Box::new(ZeroFillRepair),
        }
    }

    pub fn with_z_repair(mut self, repair: Box<dyn ZRepair>) -> Self {
        self.repair = repair;
        self
    }

    /// Write the header for `total_count` rows, then one face per row.
    ///
    /// `total_count` is written as given; it is not checked against the
    /// number of rows the stream actually yields. Returns the number of faces
    /// written.
    pub fn export<W, I>(
        &self,
        out: W,
        total_count: u64,
        rows: I,
        progress: &dyn ExportProgress,
    ) -> Result<u64>
    where
        W: Write,
        I: IntoIterator<Item = Result<Geometry>>,
    {
        let mut writer = CirWriter::new(out);
        writer.write_header(DocumentHeader { total_count })?;

        progress.begin(total_count);
        let result = self.write_rows(&mut writer, rows, progress);
        progress.finish();

        let written = match result {
            Ok(written) => written,
            Err(e) => {
                tracing::error!(error = %e, "CIR export aborted");
                return Err(e);
            }
        };

        if written != total_count {
            tracing::warn!(
                declared = total_count,
                written,
                "Row count changed while exporting; header does not match body"
            );
        }
        tracing::info!(faces = written, "CIR export complete");
        Ok(written)
    }

    fn write_rows<W, I>(
        &self,
        writer: &mut CirWriter<W>,
        rows: I,
        progress: &dyn ExportProgress,
    ) -> Result<u64>
    where
        W: Write,
        I: IntoIterator<Item = Result<Geometry>>,
    {
        let mut row_index = 0;
        for row in rows {
            let feature = Feature {
                row_index,
                geometry: self.repair.repair(row?),
            };
            self.write_feature(writer, &feature)?;
            progress.end_step();
            row_index += 1;
        }
        Ok(row_index)
    }

    /// Write one row as a face block
    pub fn write_feature<W: Write>(
        &self,
        writer: &mut CirWriter<W>,
        feature: &Feature,
    ) -> Result<()> {
        let face = match feature.geometry.classify() {
            Surface::Polygon(polygon) => {
                Face::single(feature.row_index, polygon, self.normals.normal(polygon))
            }
            Surface::MultiPolygon(multi) => {
                // The whole face takes the normal of its first part.
                let Some(first) = multi.parts.first() else {
                    return Err(unsupported(feature.row_index, GeometryType::Empty));
                };
                Face::multi(feature.row_index, &multi.parts, self.normals.normal(first))
            }
            Surface::Other(geometry_type) => {
                return Err(unsupported(feature.row_index, geometry_type));
            }
        };

        tracing::debug!(
            face = face.index,
            contours = face.contour_count(),
            "Writing face"
        );
        writer.write_face(&face)
    }
}

fn unsupported(row: u64, geometry_type: GeometryType) -> SoleneError {
    SoleneError::UnsupportedGeometry { row, geometry_type }
}
