//! Port trait definitions
//!
//! These traits define the collaborators the exporter is wired with: where
//! rows come from, how geometry is prepared, and who is told about progress.

pub mod geometry;
pub mod progress;
pub mod source;

pub use geometry::{NormalResolver, ZRepair};
pub use progress::{ExportProgress, NoProgress};
pub use source::{RowIter, RowSource};
