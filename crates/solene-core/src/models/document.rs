//! Face and contour records of a CIR document

use serde::Serialize;

use crate::models::geometry::{Polygon, Ring, Vector3};

/// Document header: row count declared before streaming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentHeader {
    pub total_count: u64,
}

/// One polygonal ring-with-holes unit inside a face
#[derive(Debug, Clone, Copy)]
pub struct Contour<'a> {
    pub shell: &'a Ring,
    pub holes: &'a [Ring],
}

impl<'a> Contour<'a> {
    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }
}

impl<'a> From<&'a Polygon> for Contour<'a> {
    fn from(polygon: &'a Polygon) -> Self {
        Contour {
            shell: &polygon.shell,
            holes: &polygon.holes,
        }
    }
}

/// One output record, built from one row geometry.
///
/// `contours` is never empty.
#[derive(Debug, Clone)]
pub struct Face<'a> {
    /// 1-based face number (row index + 1)
    pub index: u64,
    pub normal: Vector3,
    pub contours: Vec<Contour<'a>>,
}

impl<'a> Face<'a> {
    /// Face made of a single polygon
    pub fn single(row_index: u64, polygon: &'a Polygon, normal: Vector3) -> Self {
        Face {
            index: row_index + 1,
            normal,
            contours: vec![Contour::from(polygon)],
        }
    }

    /// Face made of every part of a multi-polygon, in part order
    pub fn multi(row_index: u64, parts: &'a [Polygon], normal: Vector3) -> Self {
        Face {
            index: row_index + 1,
            normal,
            contours: parts.iter().map(Contour::from).collect(),
        }
    }

    pub fn contour_count(&self) -> usize {
        self.contours.len()
    }
}
