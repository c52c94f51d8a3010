use crate::analysis::{AnalysisReport, CollectionAnalyzer};
use crate::classify::Classifier;
use crate::config::{self, AppConfig};
use crate::deletion::{self, DeletionSummary};
use crate::error::Error;
use crate::progress::ProgressReporter;
use crate::rules::RuleTables;
use crate::scanner;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub struct SweepEngine {
    config: AppConfig,
    rules: RuleTables,
}

#[derive(Debug)]
pub struct SweepResult {
    pub scan_duration: Duration,
    pub analysis_duration: Duration,
    pub report: AnalysisReport,
    /// `None` in preview mode.
    pub deletion: Option<DeletionSummary>,
}

impl SweepEngine {
    /// Engine with rule tables loaded from the configuration.
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        let rules = config.load_rules()?;
        Ok(Self { config, rules })
    }

    pub fn with_rules(config: AppConfig, rules: RuleTables) -> Self {
        Self { config, rules }
    }

    /// Run the full pipeline:
    /// 1. Walk the configured directories for candidate ROMs
    /// 2. Classify (parallel), group by canonical title, decide keep/remove
    /// 3. Delete the removals when `delete_files` is set
    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<SweepResult, Error> {
        let roots = config::non_overlapping_directories(&self.config.rom_dirs);
        if roots.is_empty() {
            return Err(Error::Other("no ROM directories configured".to_string()));
        }
        info!("Processing directories: {:?}", roots);

        // Phase 1: Scan
        reporter.on_scan_start();
        let scan_start = Instant::now();
        let files = scanner::discover_roms(&roots, &self.config.scan_options(), reporter);
        let scan_duration = scan_start.elapsed();
        reporter.on_scan_complete(files.len(), scan_duration.as_secs_f64());
        debug!(
            "Scan completed in {:.2}s, {} candidate files",
            scan_duration.as_secs_f64(),
            files.len()
        );
        if files.is_empty() {
            warn!("No ROM files found");
        }

        // Phase 2: Classify and decide
        reporter.on_classify_start(files.len());
        let analysis_start = Instant::now();
        let records = Classifier::new(&self.rules).classify_all(&files);
        let report = CollectionAnalyzer::new(&self.rules).analyze(records);
        let analysis_duration = analysis_start.elapsed();
        reporter.on_classify_complete(report.stats.unique_titles, analysis_duration.as_secs_f64());
        debug!(
            "Analysis completed in {:.2}s, {} titles, {} removals",
            analysis_duration.as_secs_f64(),
            report.stats.unique_titles,
            report.stats.removed_files()
        );

        // Phase 3: Delete
        let deletion = if self.config.delete_files {
            info!("Deleting {} files...", report.stats.removed_files());
            Some(deletion::remove_rejected(&report, reporter))
        } else {
            info!("Preview mode, no files deleted");
            None
        };

        Ok(SweepResult {
            scan_duration,
            analysis_duration,
            report,
            deletion,
        })
    }
}
