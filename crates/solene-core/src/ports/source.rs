use crate::error::Result;
use crate::models::Geometry;

/// Forward-only stream of row geometries
pub type RowIter<'a> = Box<dyn Iterator<Item = Result<Geometry>> + 'a>;

/// Port for the table being exported
///
/// The count is taken before iteration starts and the two are never
/// reconciled: a source whose row count changes between the calls produces a
/// document whose header disagrees with its body.
pub trait RowSource {
    /// Name of the table, used in logs and errors
    fn name(&self) -> &str;

    /// Number of rows the table reports
    fn row_count(&self) -> Result<u64>;

    /// Open a fresh stream over the rows, in table order
    fn rows(&self) -> Result<RowIter<'_>>;
}
