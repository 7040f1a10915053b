//! Face normal computation
//!
//! Uses Newell's method: summing the edge cross terms of the closed shell
//! gives a vector perpendicular to the best-fit plane of the ring, with a
//! length proportional to its area. It tolerates slightly non-planar rings
//! and collinear leading points, where a three-point cross product would not.

use solene_core::models::{Point3D, Polygon, Ring, Vector3};
use solene_core::ports::NormalResolver;

/// Unit normal of the shell ring, oriented by its winding
/// (counter-clockwise seen from above points up).
#[derive(Debug, Clone, Copy, Default)]
pub struct NewellNormal;

impl NormalResolver for NewellNormal {
    fn normal(&self, polygon: &Polygon) -> Vector3 {
        let normal = newell(&polygon.shell).normalized();
        if normal == Vector3::ZERO {
            tracing::debug!(points = polygon.shell.len(), "Degenerate shell, zero normal");
        }
        normal
    }
}

/// Unnormalized Newell vector of a ring.
///
/// The ring is treated as closed whether or not its last point repeats the
/// first. A missing elevation counts as zero.
pub fn newell(ring: &Ring) -> Vector3 {
    let points = ring.points();
    let mut n = Vector3::ZERO;
    if points.len() < 3 {
        return n;
    }

    for (i, current) in points.iter().enumerate() {
        let next = &points[(i + 1) % points.len()];
        let (x0, y0, z0) = ordinates(current);
        let (x1, y1, z1) = ordinates(next);
        n.x += (y0 - y1) * (z0 + z1);
        n.y += (z0 - z1) * (x0 + x1);
        n.z += (x0 - x1) * (y0 + y1);
    }
    n
}

fn ordinates(p: &Point3D) -> (f64, f64, f64) {
    (p.x, p.y, p.z.unwrap_or(0.0))
}
