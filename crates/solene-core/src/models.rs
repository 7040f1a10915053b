pub mod document;
pub mod geometry;

pub use document::{Contour, DocumentHeader, Face};
pub use geometry::{
    Feature, Geometry, GeometryType, MultiPolygon, Point3D, Polygon, Ring, Surface, Vector3,
};
