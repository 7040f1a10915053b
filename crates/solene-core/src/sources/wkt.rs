//! WKT table reader
//!
//! A WKT table is a text file holding one geometry per line. Blank lines and
//! lines starting with `#` are not rows. Both 2D and `Z` geometries are
//! accepted; 2D coordinates have no elevation. An empty part of a
//! multi-polygon stays in place as an empty polygon, so contour order and
//! the first part are never shifted.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use wkt::types::{Coord, Polygon as WktPolygon};
use wkt::{Wkt, Wkt as WktGeometry};

use crate::error::{Result, SoleneError};
use crate::models::{Geometry, Point3D, Polygon, Ring};
use crate::ports::{RowIter, RowSource};
use crate::sources::table_name;

/// Row source over a WKT table file
#[derive(Debug, Clone)]
pub struct WktFileSource {
    path: PathBuf,
    name: String,
}

impl WktFileSource {
    /// Open a WKT table; rows are read lazily on each `rows()` call
    pub fn open(path: &Path) -> Result<Self> {
        // Fail early on a missing file rather than on the first count.
        File::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            name: table_name(path),
        })
    }

    fn reader(&self) -> Result<BufReader<File>> {
        Ok(BufReader::new(File::open(&self.path)?))
    }
}

fn is_row(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with('#')
}

impl RowSource for WktFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn row_count(&self) -> Result<u64> {
        let mut count = 0;
        for line in self.reader()?.lines() {
            let line = line.map_err(|e| SoleneError::source_failure(&self.name, e.to_string()))?;
            if is_row(&line) {
                count += 1;
            }
        }
        Ok(count)
    }

    fn rows(&self) -> Result<RowIter<'_>> {
        let lines = self.reader()?.lines().enumerate();
        let name = self.name.as_str();

        Ok(Box::new(lines.filter_map(move |(idx, line)| {
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(SoleneError::source_failure(name, e.to_string()))),
            };
            if !is_row(&line) {
                return None;
            }
            Some(parse_wkt(line.trim()).map_err(|reason| {
                SoleneError::source_failure(name, format!("line {}: {}", idx + 1, reason))
            }))
        })))
    }
}

/// Parse one WKT geometry
pub fn parse_wkt(text: &str) -> std::result::Result<Geometry, String> {
    let wkt: Wkt<f64> = Wkt::from_str(text).map_err(|e| e.to_string())?;
    Ok(convert_geometry(wkt))
}

fn convert_geometry(geometry: WktGeometry<f64>) -> Geometry {
    match geometry {
        WktGeometry::Point(point) => match point.0 {
            Some(coord) => Geometry::Point {
                point: convert_coord(&coord),
            },
            None => Geometry::Empty,
        },
        WktGeometry::LineString(line) if line.0.is_empty() => Geometry::Empty,
        WktGeometry::LineString(line) => Geometry::LineString {
            points: line.0.iter().map(convert_coord).collect(),
        },
        WktGeometry::Polygon(polygon) => convert_polygon(polygon)
            .map(Geometry::Polygon)
            .unwrap_or(Geometry::Empty),
        WktGeometry::MultiPoint(multi) => Geometry::MultiPoint {
            points: multi
                .0
                .iter()
                .filter_map(|p| p.0.as_ref())
                .map(convert_coord)
                .collect(),
        },
        WktGeometry::MultiLineString(multi) => Geometry::MultiLineString {
            lines: multi
                .0
                .iter()
                .map(|line| line.0.iter().map(convert_coord).collect())
                .collect(),
        },
        WktGeometry::MultiPolygon(multi) => {
            if multi.0.is_empty() {
                Geometry::Empty
            } else {
                // Empty parts are kept so the exporter rejects the row.
                let parts = multi
                    .0
                    .into_iter()
                    .map(|p| convert_polygon(p).unwrap_or_else(empty_polygon))
                    .collect();
                Geometry::multi_polygon(parts)
            }
        }
        WktGeometry::GeometryCollection(collection) => Geometry::GeometryCollection {
            geometries: collection.0.into_iter().map(convert_geometry).collect(),
        },
    }
}

fn empty_polygon() -> Polygon {
    Polygon::new(Ring::default(), vec![])
}

/// `None` for an empty polygon
fn convert_polygon(polygon: WktPolygon<f64>) -> Option<Polygon> {
    let mut rings = polygon
        .0
        .into_iter()
        .map(|ring| Ring::new(ring.0.iter().map(convert_coord).collect()));
    let shell = rings.next()?;
    Some(Polygon::new(shell, rings.collect()))
}

fn convert_coord(coord: &Coord<f64>) -> Point3D {
    Point3D::from_ordinates(coord.x, coord.y, coord.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeometryType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_2d_polygon() {
        let geometry = parse_wkt("POLYGON((1 1,5 1,5 5,1 5,1 1))").unwrap();
        match geometry {
            Geometry::Polygon(polygon) => {
                assert_eq!(polygon.shell.len(), 5);
                assert!(polygon.holes.is_empty());
                assert!(polygon.shell.points().iter().all(|p| p.z.is_none()));
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_polygon_z_with_hole() {
        let geometry = parse_wkt(
            "POLYGON Z ((0 0 3,10 0 3,10 10 3,0 10 3,0 0 3),(2 2 3,4 2 3,4 4 3,2 2 3))",
        )
        .unwrap();
        match geometry {
            Geometry::Polygon(polygon) => {
                assert_eq!(polygon.holes.len(), 1);
                assert_eq!(polygon.holes[0].len(), 4);
                assert_eq!(polygon.shell.points()[0].z, Some(3.0));
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_multi_polygon() {
        let geometry =
            parse_wkt("MULTIPOLYGON(((0 0,1 0,1 1,0 0)),((5 5,6 5,6 6,5 5)))").unwrap();
        assert_eq!(geometry.geometry_type(), GeometryType::MultiPolygon);
    }

    #[test]
    fn test_parse_non_polygonal_and_empty() {
        assert_eq!(
            parse_wkt("LINESTRING(0 0,1 1)").unwrap().geometry_type(),
            GeometryType::LineString
        );
        assert_eq!(parse_wkt("POLYGON EMPTY").unwrap(), Geometry::Empty);
        assert!(parse_wkt("NOT WKT").is_err());
    }

    #[test]
    fn test_multi_polygon_keeps_part_positions() {
        let geometry =
            parse_wkt("MULTIPOLYGON(((0 0,1 0,1 1,0 0)),((5 5,6 5,6 6,5 5)))").unwrap();
        match &geometry {
            Geometry::MultiPolygon(multi) => {
                assert_eq!(multi.parts.len(), 2);
                assert_eq!(multi.parts[1].shell.points()[0], Point3D::xy(5.0, 5.0));
            }
            other => panic!("expected multi-polygon, got {:?}", other),
        }
        assert_eq!(parse_wkt("MULTIPOLYGON EMPTY").unwrap(), Geometry::Empty);
    }

    #[test]
    fn test_file_source_skips_comments_and_blanks() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# buildings").unwrap();
        writeln!(file, "POLYGON((1 1,5 1,5 5,1 5,1 1))").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "POLYGON((1 6,5 6,5 10,1 10,1 6))").unwrap();

        let source = WktFileSource::open(file.path()).unwrap();
        assert_eq!(source.row_count().unwrap(), 2);

        let rows: Vec<Geometry> = source.rows().unwrap().collect::<Result<_>>().unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_file_source_reports_bad_line() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "POLYGON((1 1,5 1,5 5,1 5,1 1))").unwrap();
        writeln!(file, "POLYGON((oops").unwrap();

        let source = WktFileSource::open(file.path()).unwrap();
        let rows: Vec<Result<Geometry>> = source.rows().unwrap().collect();
        assert!(rows[0].is_ok());
        match &rows[1] {
            Err(SoleneError::Source { reason, .. }) => assert!(reason.starts_with("line 2:")),
            other => panic!("expected source error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            WktFileSource::open(Path::new("/nonexistent/table.wkt")),
            Err(SoleneError::Io(_))
        ));
    }
}
