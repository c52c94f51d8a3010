use crate::analysis::AnalysisReport;
use crate::progress::ProgressReporter;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    Deleted,
    /// The file was already gone when deletion was attempted.
    Missing,
    Failed(String),
}

/// Result of acting on a report's removals. `intended` counts every removal
/// the report asked for, independent of what actually happened on disk.
#[derive(Debug, Clone, Default)]
pub struct DeletionSummary {
    pub intended: usize,
    pub outcomes: HashMap<PathBuf, DeletionOutcome>,
}

impl DeletionSummary {
    pub fn outcome(&self, path: &Path) -> Option<&DeletionOutcome> {
        self.outcomes.get(path)
    }

    pub fn deleted(&self) -> usize {
        self.count(|o| *o == DeletionOutcome::Deleted)
    }

    pub fn missing(&self) -> usize {
        self.count(|o| *o == DeletionOutcome::Missing)
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, DeletionOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&DeletionOutcome) -> bool) -> usize {
        self.outcomes.values().filter(|o| pred(o)).count()
    }
}

/// Remove every file the report marked for removal. Kept records are never
/// touched; a failure on one file does not stop the rest.
pub fn remove_rejected(report: &AnalysisReport, reporter: &dyn ProgressReporter) -> DeletionSummary {
    let start = Instant::now();
    let removals: Vec<&PathBuf> = report.removals().map(|d| &d.record.path).collect();
    let kept: HashSet<&Path> = report
        .decisions()
        .filter(|d| d.is_kept())
        .map(|d| d.record.path.as_path())
        .collect();

    let mut summary = DeletionSummary {
        intended: removals.len(),
        outcomes: HashMap::with_capacity(removals.len()),
    };
    reporter.on_delete_start(removals.len());

    for (index, path) in removals.iter().enumerate() {
        let outcome = if kept.contains(path.as_path()) {
            warn!("Refusing to delete kept file '{}'", path.display());
            DeletionOutcome::Failed("file is also marked keep".to_string())
        } else if !path.exists() {
            warn!("File '{}' no longer exists", path.display());
            DeletionOutcome::Missing
        } else {
            match fs::remove_file(path) {
                Ok(()) => {
                    debug!("deleted: {}", path.display());
                    DeletionOutcome::Deleted
                }
                Err(e) => {
                    error!("Failed to remove '{}': {}", path.display(), e);
                    DeletionOutcome::Failed(e.to_string())
                }
            }
        };
        summary.outcomes.insert((*path).clone(), outcome);
        reporter.on_delete_progress(index + 1, removals.len());
    }

    info!(
        "Deletion executed: {} deleted, {} missing, {} failed",
        summary.deleted(),
        summary.missing(),
        summary.failed()
    );
    reporter.on_delete_complete(summary.deleted(), summary.failed(), start.elapsed().as_secs_f64());
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{CollectionAnalyzer, Decision, GroupReport, KeepReason};
    use crate::classify::Classifier;
    use crate::model::DiscoveredFile;
    use crate::progress::SilentReporter;
    use crate::rules::RuleTables;
    use tempfile::tempdir;

    #[test]
    fn test_remove_rejected_only_touches_removals() {
        let tmp = tempdir().unwrap();
        let names = ["Kirby (USA).gb", "Kirby (Europe).gb", "Kirby (Japan).gb"];
        let files: Vec<DiscoveredFile> = names
            .iter()
            .map(|name| {
                let path = tmp.path().join(name);
                fs::write(&path, b"rom").unwrap();
                DiscoveredFile::new(path, *name, 3)
            })
            .collect();
        // One removal disappears before deletion runs.
        fs::remove_file(tmp.path().join("Kirby (Japan).gb")).unwrap();

        let rules = RuleTables::default();
        let records = Classifier::new(&rules).classify_all(&files);
        let report = CollectionAnalyzer::new(&rules).analyze(records);
        let summary = remove_rejected(&report, &SilentReporter);

        assert_eq!(summary.intended, 2);
        assert_eq!(summary.deleted(), 1);
        assert_eq!(summary.missing(), 1);
        assert_eq!(summary.failed(), 0);
        assert!(tmp.path().join("Kirby (USA).gb").exists());
        assert!(!tmp.path().join("Kirby (Europe).gb").exists());
        assert_eq!(
            summary.outcome(&tmp.path().join("Kirby (Europe).gb")),
            Some(&DeletionOutcome::Deleted)
        );
        // Accounting in the report is untouched by deletion results.
        assert_eq!(report.stats.removed_files(), 2);
    }

    #[test]
    fn test_remove_rejected_never_deletes_a_kept_path() {
        let tmp = tempdir().unwrap();
        let shared = tmp.path().join("Tetris (World).gb");
        let other = tmp.path().join("Tetris (Japan).gb");
        fs::write(&shared, b"rom").unwrap();
        fs::write(&other, b"rom").unwrap();

        let rules = RuleTables::default();
        let classifier = Classifier::new(&rules);
        let record = |path: &PathBuf| {
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            classifier.classify(&DiscoveredFile::new(path.clone(), name, 3))
        };
        let report = AnalysisReport {
            groups: vec![
                GroupReport {
                    title: "Tetris.gb".to_string(),
                    decisions: vec![Decision {
                        record: record(&shared),
                        reason: Some(KeepReason::BestVersion),
                    }],
                },
                GroupReport {
                    title: "Tetris (alt).gb".to_string(),
                    decisions: vec![
                        Decision {
                            record: record(&shared),
                            reason: None,
                        },
                        Decision {
                            record: record(&other),
                            reason: None,
                        },
                    ],
                },
            ],
            ..AnalysisReport::default()
        };

        let summary = remove_rejected(&report, &SilentReporter);
        assert_eq!(summary.intended, 2);
        assert!(shared.exists());
        assert!(!other.exists());
        assert!(matches!(summary.outcome(&shared), Some(DeletionOutcome::Failed(_))));
        assert_eq!(summary.deleted(), 1);
    }

    #[test]
    fn test_remove_rejected_empty_report() {
        let summary = remove_rejected(&AnalysisReport::default(), &SilentReporter);
        assert_eq!(summary.intended, 0);
        assert!(summary.outcomes.is_empty());
    }
}
