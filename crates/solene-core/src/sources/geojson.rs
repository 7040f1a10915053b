//! GeoJSON table reader

use std::fs;
use std::path::Path;

use geojson::{GeoJson, Value};

use crate::error::{Result, SoleneError};
use crate::models::{Geometry, Point3D, Polygon, Ring};
use crate::ports::{RowIter, RowSource};
use crate::sources::table_name;

/// Row source over a GeoJSON document.
///
/// A feature collection yields one row per feature; a lone feature or
/// geometry is a one-row table. Features without geometry are empty rows.
/// Empty polygons, including empty parts of a multi-polygon, are kept in
/// place so the exporter rejects them.
///
/// Unlike [`WktFileSource`](super::WktFileSource), the whole document is read
/// and parsed when the source is opened; only the conversion to row
/// geometries is lazy. Use a WKT table for inputs too large to hold in memory.
#[derive(Debug, Clone)]
pub struct GeoJsonSource {
    name: String,
    geometries: Vec<Option<geojson::Geometry>>,
}

impl GeoJsonSource {
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_str_named(table_name(path), &content)
    }

    /// Parse a GeoJSON document held in memory
    pub fn from_str_named(name: impl Into<String>, content: &str) -> Result<Self> {
        let name = name.into();
        let geojson: GeoJson = content.parse().map_err(|e| {
            SoleneError::source_failure(&name, format!("Failed to parse GeoJSON: {}", e))
        })?;

        let geometries = match geojson {
            GeoJson::FeatureCollection(fc) => fc.features.into_iter().map(|f| f.geometry).collect(),
            GeoJson::Feature(feature) => vec![feature.geometry],
            GeoJson::Geometry(geometry) => vec![Some(geometry)],
        };

        Ok(Self { name, geometries })
    }
}

impl RowSource for GeoJsonSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn row_count(&self) -> Result<u64> {
        Ok(self.geometries.len() as u64)
    }

    fn rows(&self) -> Result<RowIter<'_>> {
        let name = self.name.as_str();
        Ok(Box::new(self.geometries.iter().enumerate().map(move |(idx, geometry)| {
            match geometry {
                Some(geometry) => convert_value(&geometry.value).map_err(|reason| {
                    SoleneError::source_failure(name, format!("feature {}: {}", idx, reason))
                }),
                None => Ok(Geometry::Empty),
            }
        })))
    }
}

fn convert_value(value: &Value) -> std::result::Result<Geometry, String> {
    let geometry = match value {
        Value::Point(position) => Geometry::Point {
            point: convert_position(position)?,
        },
        Value::MultiPoint(positions) => Geometry::MultiPoint {
            points: convert_positions(positions)?,
        },
        Value::LineString(positions) => Geometry::LineString {
            points: convert_positions(positions)?,
        },
        Value::MultiLineString(lines) => Geometry::MultiLineString {
            lines: lines
                .iter()
                .map(|line| convert_positions(line))
                .collect::<std::result::Result<_, _>>()?,
        },
        Value::Polygon(rings) if rings.is_empty() => Geometry::Empty,
        Value::Polygon(rings) => Geometry::Polygon(convert_polygon(rings)?),
        Value::MultiPolygon(polygons) if polygons.is_empty() => Geometry::Empty,
        Value::MultiPolygon(polygons) => Geometry::multi_polygon(
            polygons
                .iter()
                .map(|rings| convert_polygon(rings))
                .collect::<std::result::Result<_, _>>()?,
        ),
        Value::GeometryCollection(geometries) => Geometry::GeometryCollection {
            geometries: geometries
                .iter()
                .map(|g| convert_value(&g.value))
                .collect::<std::result::Result<_, _>>()?,
        },
    };
    Ok(geometry)
}

/// A polygon without rings becomes one with an empty shell
fn convert_polygon(rings: &[Vec<Vec<f64>>]) -> std::result::Result<Polygon, String> {
    let mut rings = rings.iter().map(|ring| convert_positions(ring).map(Ring::new));
    let shell = rings.next().transpose()?.unwrap_or_default();
    Ok(Polygon::new(shell, rings.collect::<std::result::Result<_, _>>()?))
}

fn convert_positions(positions: &[Vec<f64>]) -> std::result::Result<Vec<Point3D>, String> {
    positions.iter().map(|p| convert_position(p)).collect()
}

fn convert_position(position: &[f64]) -> std::result::Result<Point3D, String> {
    match position {
        [x, y] => Ok(Point3D::xy(*x, *y)),
        [x, y, z, ..] => Ok(Point3D::from_ordinates(*x, *y, Some(*z))),
        _ => Err(format!("position has {} ordinates, expected at least 2", position.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeometryType, Surface};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0, 0, 12], [4, 0, 12], [4, 4, 12], [0, 0, 12]]]
                },
                "properties": { "height": 12 }
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[0, 0], [1, 0], [1, 1], [0, 0]]],
                        [[[5, 5], [6, 5], [6, 6], [5, 5]]]
                    ]
                },
                "properties": {}
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": {}
            }
        ]
    }"#;

    #[test]
    fn test_feature_collection_rows() {
        let source = GeoJsonSource::from_str_named("blocks", COLLECTION).unwrap();
        assert_eq!(source.row_count().unwrap(), 3);

        let rows: Vec<Geometry> = source.rows().unwrap().collect::<Result<_>>().unwrap();
        assert_eq!(rows[0].geometry_type(), GeometryType::Polygon);
        assert_eq!(rows[1].geometry_type(), GeometryType::MultiPolygon);
        assert_eq!(rows[2], Geometry::Empty);

        match &rows[0] {
            Geometry::Polygon(polygon) => assert_eq!(polygon.shell.points()[1].z, Some(12.0)),
            other => panic!("expected polygon, got {:?}", other),
        }
        assert!(rows[1].has_missing_z());
    }

    #[test]
    fn test_single_geometry_document() {
        let source = GeoJsonSource::from_str_named(
            "line",
            r#"{"type": "LineString", "coordinates": [[0, 0], [1, 1]]}"#,
        )
        .unwrap();
        let rows: Vec<Geometry> = source.rows().unwrap().collect::<Result<_>>().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].geometry_type(), GeometryType::LineString);
    }

    #[test]
    fn test_empty_rings_are_not_surfaces() {
        let polygon = GeoJsonSource::from_str_named(
            "polygon",
            r#"{"type": "Polygon", "coordinates": [[]]}"#,
        )
        .unwrap();
        let multi = GeoJsonSource::from_str_named(
            "multi",
            r#"{"type": "MultiPolygon", "coordinates": [[], [[[0, 0], [1, 0], [1, 1], [0, 0]]]]}"#,
        )
        .unwrap();

        for source in [polygon, multi] {
            let rows: Vec<Geometry> = source.rows().unwrap().collect::<Result<_>>().unwrap();
            assert!(matches!(rows[0].classify(), Surface::Other(GeometryType::Empty)));
        }
    }

    #[test]
    fn test_multi_polygon_keeps_empty_part_in_place() {
        let source = GeoJsonSource::from_str_named(
            "multi",
            r#"{"type": "MultiPolygon", "coordinates": [[], [[[0, 0], [1, 0], [1, 1], [0, 0]]]]}"#,
        )
        .unwrap();
        let rows: Vec<Geometry> = source.rows().unwrap().collect::<Result<_>>().unwrap();
        match &rows[0] {
            Geometry::MultiPolygon(multi) => {
                assert_eq!(multi.parts.len(), 2);
                assert!(multi.parts[0].is_empty());
                assert_eq!(multi.parts[1].shell.len(), 4);
            }
            other => panic!("expected multi-polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_document() {
        let err = GeoJsonSource::from_str_named("bad", "not geojson").unwrap_err();
        assert!(matches!(err, SoleneError::Source { .. }));
    }

    #[test]
    fn test_open_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", COLLECTION).unwrap();

        let source = GeoJsonSource::open(file.path()).unwrap();
        assert_eq!(source.row_count().unwrap(), 3);
    }
}
