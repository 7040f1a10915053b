/// Port for export progress notifications
///
/// Purely observational: nothing flows back into the export, so a caller that
/// wants to cancel has to do it around the whole call.
pub trait ExportProgress {
    /// Export is about to stream `total` rows
    fn begin(&self, _total: u64) {}

    /// One row has been written
    fn end_step(&self);

    /// Export ended, successfully or not
    fn finish(&self) {}
}

/// Progress sink that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ExportProgress for NoProgress {
    fn end_step(&self) {}
}
