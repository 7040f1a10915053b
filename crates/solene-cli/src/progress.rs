use indicatif::{ProgressBar, ProgressStyle};
use solene_core::ports::ExportProgress;

/// Create a progress bar for determinate progress
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{msg}\n[{bar:40.cyan/blue}] {pos}/{len} ({percent}%) ETA: {eta}")
    {
        pb.set_style(style.progress_chars("█▓▒░ "));
    }
    pb.set_message(message.to_string());
    pb
}

/// Terminal progress bar fed by export notifications
pub struct ExportBar {
    bar: ProgressBar,
}

impl ExportBar {
    pub fn new(message: &str) -> Self {
        Self {
            bar: create_progress_bar(0, message),
        }
    }
}

impl ExportProgress for ExportBar {
    fn begin(&self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(0);
    }

    fn end_step(&self) {
        self.bar.inc(1);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
