use indicatif::{ProgressBar, ProgressStyle};
use romsweep_core::ProgressReporter;
use std::sync::Mutex;
use std::time::Duration;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// CLI progress reporter using indicatif.
///
/// - Scan phase: spinner (file count unknown upfront)
/// - Classify phase: spinner
/// - Delete phase: progress bar
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner(message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars(TICK_CHARS),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }

    fn set_bar(&self, pb: ProgressBar) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn finish_bar(&self) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_scan_start(&self) {
        self.set_bar(Self::spinner("Scanning for ROM files..."));
    }

    fn on_scan_progress(&self, files_found: usize, _current_path: &str) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            pb.set_message(format!("Scanning... {} ROM files found", files_found));
        }
    }

    fn on_scan_complete(&self, total_files: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Scan complete: {} ROM files in {:.2}s",
            total_files, duration_secs
        );
    }

    fn on_classify_start(&self, total_files: usize) {
        self.set_bar(Self::spinner(&format!("Classifying {} files...", total_files)));
    }

    fn on_classify_complete(&self, unique_titles: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Analysis complete: {} unique titles in {:.2}s",
            unique_titles, duration_secs
        );
    }

    fn on_delete_start(&self, total_files: usize) {
        let pb = ProgressBar::new(total_files as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "  {spinner:.red} Deleting [{bar:30.red/dim}] {pos}/{len} files",
            )
            .unwrap()
            .progress_chars("━╸─")
            .tick_chars(TICK_CHARS),
        );
        pb.enable_steady_tick(Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_delete_progress(&self, files_processed: usize, _total_files: usize) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            pb.set_position(files_processed as u64);
        }
    }

    fn on_delete_complete(&self, deleted: usize, failed: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Deletion complete: {} deleted, {} failed in {:.2}s",
            deleted, failed, duration_secs
        );
    }
}
