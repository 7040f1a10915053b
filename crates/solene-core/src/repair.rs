//! Elevation repair
//!
//! Normals cannot be computed over rings with missing elevations, so a row
//! with any undefined Z is flattened onto the Z = 0 plane, known elevations
//! included. Rows whose coordinates all carry a Z are passed through
//! untouched.

use crate::models::{Geometry, Point3D};
use crate::ports::ZRepair;

/// Default repair: if any coordinate lacks Z, every Z becomes 0
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroFillRepair;

impl ZRepair for ZeroFillRepair {
    fn repair(&self, mut geometry: Geometry) -> Geometry {
        if geometry.has_missing_z() {
            geometry.for_each_point_mut(&mut |p: &mut Point3D| p.z = Some(0.0));
        }
        geometry
    }
}
