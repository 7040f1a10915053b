use crate::models::{Geometry, Polygon, Vector3};

/// Port for face normal computation
pub trait NormalResolver: Send + Sync {
    /// Normal of the plane carrying the polygon's shell
    fn normal(&self, polygon: &Polygon) -> Vector3;
}

/// Port for elevation repair applied to every row before it is written
pub trait ZRepair: Send + Sync {
    fn repair(&self, geometry: Geometry) -> Geometry;
}

impl<T: NormalResolver + ?Sized> NormalResolver for std::sync::Arc<T> {
    fn normal(&self, polygon: &Polygon) -> Vector3 {
        (**self).normal(polygon)
    }
}
