//! Solene CIR format driver
//!
//! A CIR document is CRLF-terminated text:
//!
//! ```text
//! <count> <count>
//! \t\t99999 99999          (five times)
//! f<face> <contours>       per row
//! \t<nx>\t<ny>\t<nz>       face normal
//! c<holes>                 per contour
//! <points>                 shell ring, then one node line per point
//! t                        per hole, followed by the hole ring
//! ```
//!
//! Node lines carry three `%10.5f` fields, each preceded by a tab.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::export::CirExporter;
use crate::formats::{Driver, ExportSummary};
use crate::models::{Contour, DocumentHeader, Face, Point3D, Ring};
use crate::ports::{ExportProgress, NormalResolver, RowSource, ZRepair};

pub const DRIVER_NAME: &str = "Solene Cir driver";
pub const EXTENSION: &str = "cir";

/// Reserved metadata lines following the count line
const PADDING_LINES: usize = 5;
const PADDING_VALUE: u32 = 99999;
const EOL: &str = "\r\n";
const DECIMALS: usize = 5;

/// Line-level CIR serializer over any byte sink
pub struct CirWriter<W: Write> {
    out: W,
}

impl<W: Write> CirWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Count line followed by the padding block
    pub fn write_header(&mut self, header: DocumentHeader) -> Result<()> {
        write!(self.out, "{} {}{EOL}", header.total_count, header.total_count)?;
        for _ in 0..PADDING_LINES {
            write!(self.out, "\t\t{PADDING_VALUE} {PADDING_VALUE}{EOL}")?;
        }
        Ok(())
    }

    pub fn write_face(&mut self, face: &Face<'_>) -> Result<()> {
        write!(self.out, "f{} {}{EOL}", face.index, face.contour_count())?;
        self.write_node(&face.normal.into())?;
        for contour in &face.contours {
            self.write_contour(contour)?;
        }
        Ok(())
    }

    pub fn write_contour(&mut self, contour: &Contour<'_>) -> Result<()> {
        write!(self.out, "c{}{EOL}", contour.hole_count())?;
        self.write_ring(contour.shell)?;
        for hole in contour.holes {
            write!(self.out, "t{EOL}")?;
            self.write_ring(hole)?;
        }
        Ok(())
    }

    pub fn write_ring(&mut self, ring: &Ring) -> Result<()> {
        write!(self.out, "{}{EOL}", ring.len())?;
        for point in ring.points() {
            self.write_node(point)?;
        }
        Ok(())
    }

    /// A missing elevation is written as zero.
    pub fn write_node(&mut self, point: &Point3D) -> Result<()> {
        let z = point.z.unwrap_or(0.0);
        write!(
            self.out,
            "\t{:>10}\t{:>10}\t{:>10}{EOL}",
            fixed_point(point.x),
            fixed_point(point.y),
            fixed_point(z)
        )?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Five-decimal rendering of `value`, rounded half-up on its shortest
/// decimal form (`0.015625` gives `0.01563`, not the binary tie `0.01562`).
pub fn fixed_point(value: f64) -> String {
    if !value.is_finite() {
        return format!("{:.5}", value);
    }

    // Display for f64 is the shortest round-trip form and never uses an exponent.
    let repr = format!("{}", value.abs());
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(DECIMALS))
        .collect();

    if frac_part.as_bytes().get(DECIMALS).is_some_and(|d| *d >= b'5') {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, b'1');
                break;
            }
            i -= 1;
            if digits[i] == b'9' {
                digits[i] = b'0';
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - DECIMALS;
    let int_digits: String = digits[..split].iter().map(|&d| d as char).collect();
    let frac_digits: String = digits[split..].iter().map(|&d| d as char).collect();
    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{}{}.{}", sign, int_digits, frac_digits)
}

/// Export-only driver for the `.cir` extension
pub struct CirDriver {
    exporter: CirExporter,
}

impl CirDriver {
    pub fn new(normals: Box<dyn NormalResolver>) -> Self {
        Self {
            exporter: CirExporter::new(normals),
        }
    }

    /// Replace the default zero-fill elevation repair
    pub fn with_z_repair(mut self, repair: Box<dyn ZRepair>) -> Self {
        self.exporter = self.exporter.with_z_repair(repair);
        self
    }

    pub fn exporter(&self) -> &CirExporter {
        &self.exporter
    }
}

impl Driver for CirDriver {
    fn driver_name(&self) -> &str {
        DRIVER_NAME
    }

    fn export_formats(&self) -> &[&str] {
        &[EXTENSION]
    }

    fn import_formats(&self) -> &[&str] {
        &[EXTENSION]
    }

    fn format_description(&self, format: &str) -> Option<&str> {
        format.eq_ignore_ascii_case(EXTENSION).then_some(DRIVER_NAME)
    }

    fn export_table(
        &self,
        source: &dyn RowSource,
        path: &Path,
        progress: &dyn ExportProgress,
    ) -> Result<ExportSummary> {
        let declared_rows = source.row_count()?;
        let rows = source.rows()?;

        tracing::info!(
            table = source.name(),
            path = %path.display(),
            rows = declared_rows,
            "Exporting table to CIR"
        );

        let mut out = BufWriter::new(File::create(path)?);
        let written = self.exporter.export(&mut out, declared_rows, rows, progress);
        // Flush what was written even when the export failed part-way.
        let flushed = out.flush();
        let written_faces = written?;
        flushed?;

        Ok(ExportSummary {
            path: path.to_path_buf(),
            declared_rows,
            written_faces,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SoleneError;
    use crate::models::{Polygon, Vector3};
    use proptest::prelude::*;

    fn render(f: impl FnOnce(&mut CirWriter<&mut Vec<u8>>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        let mut writer = CirWriter::new(&mut buf);
        f(&mut writer).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn square(x0: f64, y0: f64, size: f64) -> Ring {
        Ring::new(vec![
            Point3D::new(x0, y0, 0.0),
            Point3D::new(x0 + size, y0, 0.0),
            Point3D::new(x0 + size, y0 + size, 0.0),
            Point3D::new(x0, y0 + size, 0.0),
            Point3D::new(x0, y0, 0.0),
        ])
    }

    #[test]
    fn test_node_layout() {
        let text = render(|w| w.write_node(&Point3D::new(1.0, -22.5, 1234.123456)));
        assert_eq!(text, "\t   1.00000\t -22.50000\t1234.12346\r\n");
    }

    #[test]
    fn test_node_rounds_half_up() {
        let text = render(|w| w.write_node(&Point3D::new(0.015625, 0.123455, 1.000005)));
        assert_eq!(text, "\t   0.01563\t   0.12346\t   1.00001\r\n");

        let text = render(|w| w.write_node(&Point3D::new(-0.0, -2.999995, 99.999996)));
        assert_eq!(text, "\t  -0.00000\t  -3.00000\t 100.00000\r\n");
    }

    #[test]
    fn test_fixed_point() {
        assert_eq!(fixed_point(0.0), "0.00000");
        assert_eq!(fixed_point(12.5), "12.50000");
        assert_eq!(fixed_point(0.000004), "0.00000");
        assert_eq!(fixed_point(9.999995), "10.00000");
        assert_eq!(fixed_point(-0.1234549), "-0.12345");
        assert_eq!(fixed_point(1e-7), "0.00000");
    }

    #[test]
    fn test_node_missing_z_written_as_zero() {
        let text = render(|w| w.write_node(&Point3D::xy(3.0, 4.0)));
        assert_eq!(text, "\t   3.00000\t   4.00000\t   0.00000\r\n");
    }

    #[test]
    fn test_header_and_padding() {
        let text = render(|w| w.write_header(DocumentHeader { total_count: 7 }));
        let lines: Vec<&str> = text.split("\r\n").collect();
        assert_eq!(lines[0], "7 7");
        assert_eq!(&lines[1..6], &["\t\t99999 99999"; 5]);
        assert_eq!(lines[6], "");
    }

    #[test]
    fn test_contour_with_holes() {
        let polygon = Polygon::new(
            square(0.0, 0.0, 10.0),
            vec![square(1.0, 1.0, 2.0), square(5.0, 5.0, 2.0)],
        );
        let text = render(|w| w.write_contour(&Contour::from(&polygon)));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "c2");
        assert_eq!(lines[1], "5");
        assert_eq!(lines[7], "t");
        assert_eq!(lines[8], "5");
        assert_eq!(lines.iter().filter(|l| **l == "t").count(), 2);
        assert_eq!(lines.len(), 1 + 6 + 2 * 7);
    }

    #[test]
    fn test_face_block() {
        let polygon = Polygon::new(square(0.0, 0.0, 1.0), vec![]);
        let face = Face::single(4, &polygon, Vector3::new(0.0, 0.0, 1.0));
        let text = render(|w| w.write_face(&face));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "f5 1");
        assert_eq!(lines[1], "\t   0.00000\t   0.00000\t   1.00000");
        assert_eq!(lines[2], "c0");
        assert_eq!(lines[3], "5");
    }

    #[test]
    fn test_lines_end_with_crlf() {
        let polygon = Polygon::new(square(0.0, 0.0, 1.0), vec![square(0.2, 0.2, 0.1)]);
        let face = Face::single(0, &polygon, Vector3::new(0.0, 0.0, 1.0));
        let text = render(|w| w.write_face(&face));
        assert!(text.ends_with("\r\n"));
        assert_eq!(text.matches('\n').count(), text.matches("\r\n").count());
    }

    #[test]
    fn test_import_is_unsupported() {
        let driver = CirDriver::new(Box::new(UpNormal));
        let path = Path::new("/nonexistent/dir/input.cir");
        let err = driver.import_file(path, &crate::ports::NoProgress).unwrap_err();
        assert!(matches!(err, SoleneError::UnsupportedDirection { .. }));
    }

    #[test]
    fn test_format_description() {
        let driver = CirDriver::new(Box::new(UpNormal));
        assert_eq!(driver.format_description("cir"), Some(DRIVER_NAME));
        assert_eq!(driver.format_description("shp"), None);
    }

    struct UpNormal;

    impl NormalResolver for UpNormal {
        fn normal(&self, _polygon: &Polygon) -> Vector3 {
            Vector3::new(0.0, 0.0, 1.0)
        }
    }

    proptest! {
        #[test]
        fn prop_node_fields_are_fixed_point(
            x in -99999.0f64..99999.0,
            y in -99999.0f64..99999.0,
            z in proptest::option::of(-9999.0f64..9999.0),
        ) {
            let text = render(|w| w.write_node(&Point3D { x, y, z }));
            let body = text.strip_suffix("\r\n").unwrap();
            let fields: Vec<&str> = body.split('\t').collect();

            prop_assert_eq!(fields.len(), 4);
            prop_assert_eq!(fields[0], "");
            for field in &fields[1..] {
                prop_assert!(field.len() >= 10);
                let digits = field.trim().split('.').nth(1).unwrap();
                prop_assert_eq!(digits.len(), 5);
            }
            let parsed_z: f64 = fields[3].trim().parse().unwrap();
            prop_assert!((parsed_z - z.unwrap_or(0.0)).abs() <= 0.000005 + 1e-9);
        }

        #[test]
        fn prop_hole_count_matches(holes in 0usize..6, shell_size in 4usize..12) {
            let shell = Ring::new((0..shell_size).map(|i| Point3D::xy(i as f64, 0.0)).collect());
            let holes_rings = (0..holes).map(|i| square(i as f64, 0.0, 0.5)).collect();
            let polygon = Polygon::new(shell, holes_rings);
            let text = render(|w| w.write_contour(&Contour::from(&polygon)));
            let lines: Vec<&str> = text.lines().collect();

            let expected_header = format!("c{}", holes);
            let expected_count = shell_size.to_string();
            prop_assert_eq!(lines[0], expected_header.as_str());
            prop_assert_eq!(lines[1], expected_count.as_str());
            prop_assert_eq!(lines.iter().filter(|l| **l == "t").count(), holes);
        }
    }
}
