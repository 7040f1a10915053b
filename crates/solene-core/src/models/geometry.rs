//! Canonical geometry types read from row sources and written as CIR faces.
//!
//! Coordinates are always three-dimensional; a missing elevation is `None`
//! rather than a NaN sentinel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A coordinate with an optional elevation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Point3D {
    /// Create a point with a known elevation
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Create a point without elevation
    pub fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Create a point from raw ordinates, mapping a NaN elevation to `None`
    pub fn from_ordinates(x: f64, y: f64, z: Option<f64>) -> Self {
        Self {
            x,
            y,
            z: z.filter(|z| !z.is_nan()),
        }
    }

    pub fn has_z(&self) -> bool {
        self.z.is_some()
    }
}

/// Closed sequence of points (first == last)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ring(pub Vec<Point3D>);

impl Ring {
    pub fn new(points: Vec<Point3D>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Point3D] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Point3D>> for Ring {
    fn from(points: Vec<Point3D>) -> Self {
        Ring(points)
    }
}

/// Polygon with one shell and zero or more holes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub shell: Ring,
    pub holes: Vec<Ring>,
}

impl Polygon {
    pub fn new(shell: Ring, holes: Vec<Ring>) -> Self {
        Self { shell, holes }
    }

    /// Iterate the shell then every hole
    /// No shell points
    pub fn is_empty(&self) -> bool {
        self.shell.is_empty()
    }

    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.shell).chain(self.holes.iter())
    }

    fn rings_mut(&mut self) -> impl Iterator<Item = &mut Ring> {
        std::iter::once(&mut self.shell).chain(self.holes.iter_mut())
    }
}

/// Multi-part polygonal surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPolygon {
    pub parts: Vec<Polygon>,
}

impl MultiPolygon {
    pub fn new(parts: Vec<Polygon>) -> Self {
        Self { parts }
    }
}

/// Geometry type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
    Empty,
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
            GeometryType::Empty => "empty geometry",
        };
        f.write_str(name)
    }
}

/// Geometry value of one table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { point: Point3D },
    LineString { points: Vec<Point3D> },
    Polygon(Polygon),
    MultiPoint { points: Vec<Point3D> },
    MultiLineString { lines: Vec<Vec<Point3D>> },
    MultiPolygon(MultiPolygon),
    GeometryCollection { geometries: Vec<Geometry> },
    Empty,
}

/// Polygonal view of a geometry, the only shapes a CIR face can hold
#[derive(Debug, Clone, Copy)]
pub enum Surface<'a> {
    Polygon(&'a Polygon),
    MultiPolygon(&'a MultiPolygon),
    Other(GeometryType),
}

impl Geometry {
    /// Create a Polygon geometry
    pub fn polygon(shell: Vec<Point3D>, holes: Vec<Vec<Point3D>>) -> Self {
        Geometry::Polygon(Polygon::new(
            Ring::new(shell),
            holes.into_iter().map(Ring::new).collect(),
        ))
    }

    /// Create a MultiPolygon geometry
    pub fn multi_polygon(parts: Vec<Polygon>) -> Self {
        Geometry::MultiPolygon(MultiPolygon::new(parts))
    }

    /// Get the geometry type
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point { .. } => GeometryType::Point,
            Geometry::LineString { .. } => GeometryType::LineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint { .. } => GeometryType::MultiPoint,
            Geometry::MultiLineString { .. } => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection { .. } => GeometryType::GeometryCollection,
            Geometry::Empty => GeometryType::Empty,
        }
    }

    /// Classify as a writable surface.
    ///
    /// A polygon with an empty shell, a multi-polygon without parts, and a
    /// multi-polygon holding any empty part are reported as `Other(Empty)`.
    pub fn classify(&self) -> Surface<'_> {
        match self {
            Geometry::Polygon(polygon) if polygon.is_empty() => Surface::Other(GeometryType::Empty),
            Geometry::Polygon(polygon) => Surface::Polygon(polygon),
            Geometry::MultiPolygon(multi)
                if multi.parts.is_empty() || multi.parts.iter().any(Polygon::is_empty) =>
            {
                Surface::Other(GeometryType::Empty)
            }
            Geometry::MultiPolygon(multi) => Surface::MultiPolygon(multi),
            other => Surface::Other(other.geometry_type()),
        }
    }

    /// Visit every coordinate, including those of nested parts
    pub fn for_each_point(&self, f: &mut impl FnMut(&Point3D)) {
        match self {
            Geometry::Point { point } => f(point),
            Geometry::LineString { points } | Geometry::MultiPoint { points } => {
                points.iter().for_each(f)
            }
            Geometry::Polygon(polygon) => polygon.rings().flat_map(|r| r.0.iter()).for_each(f),
            Geometry::MultiLineString { lines } => lines.iter().flatten().for_each(f),
            Geometry::MultiPolygon(multi) => multi
                .parts
                .iter()
                .flat_map(|p| p.rings())
                .flat_map(|r| r.0.iter())
                .for_each(f),
            Geometry::GeometryCollection { geometries } => {
                for geometry in geometries {
                    geometry.for_each_point(f);
                }
            }
            Geometry::Empty => {}
        }
    }

    /// Mutably visit every coordinate, including those of nested parts
    pub fn for_each_point_mut(&mut self, f: &mut impl FnMut(&mut Point3D)) {
        match self {
            Geometry::Point { point } => f(point),
            Geometry::LineString { points } | Geometry::MultiPoint { points } => {
                points.iter_mut().for_each(f)
            }
            Geometry::Polygon(polygon) => {
                polygon.rings_mut().flat_map(|r| r.0.iter_mut()).for_each(f)
            }
            Geometry::MultiLineString { lines } => lines.iter_mut().flatten().for_each(f),
            Geometry::MultiPolygon(multi) => multi
                .parts
                .iter_mut()
                .flat_map(|p| p.rings_mut())
                .flat_map(|r| r.0.iter_mut())
                .for_each(f),
            Geometry::GeometryCollection { geometries } => {
                for geometry in geometries {
                    geometry.for_each_point_mut(f);
                }
            }
            Geometry::Empty => {}
        }
    }

    /// True if at least one coordinate lacks an elevation
    pub fn has_missing_z(&self) -> bool {
        let mut missing = false;
        self.for_each_point(&mut |p: &Point3D| missing |= p.z.is_none());
        missing
    }
}

/// Row geometry tagged with its 0-based read position
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub row_index: u64,
    pub geometry: Geometry,
}

/// 3D vector, used for face normals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit vector in the same direction, or zero for a zero-length vector
    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len <= f64::EPSILON {
            return Vector3::ZERO;
        }
        Vector3::new(self.x / len, self.y / len, self.z / len)
    }
}

impl From<Vector3> for Point3D {
    fn from(v: Vector3) -> Self {
        Point3D::new(v.x, v.y, v.z)
    }
}
