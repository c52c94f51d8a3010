/// Trait for reporting sweep progress.
///
/// CLI implements with indicatif spinners; tests use [`SilentReporter`].
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_scan_start(&self) {}
    fn on_scan_progress(&self, _files_found: usize, _current_path: &str) {}
    fn on_scan_complete(&self, _total_files: usize, _duration_secs: f64) {}
    fn on_classify_start(&self, _total_files: usize) {}
    fn on_classify_complete(&self, _unique_titles: usize, _duration_secs: f64) {}
    fn on_delete_start(&self, _total_files: usize) {}
    fn on_delete_progress(&self, _files_processed: usize, _total_files: usize) {}
    fn on_delete_complete(&self, _deleted: usize, _failed: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
