use super::grouping::group_by_title;
use super::selection::{Decision, SelectionPolicy};
use crate::model::{bytes_to_mb, RomRecord};
use crate::rules::RuleTables;
use tracing::debug;

/// Aggregate sizes over every analyzed record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionStats {
    pub unique_titles: usize,
    pub total_files: usize,
    pub kept_files: usize,
    pub total_bytes: u64,
    pub kept_bytes: u64,
}

impl CollectionStats {
    pub fn removed_files(&self) -> usize {
        self.total_files - self.kept_files
    }

    pub fn removed_bytes(&self) -> u64 {
        self.total_bytes - self.kept_bytes
    }

    pub fn total_mb(&self) -> f64 {
        bytes_to_mb(self.total_bytes)
    }

    pub fn kept_mb(&self) -> f64 {
        bytes_to_mb(self.kept_bytes)
    }

    pub fn saved_mb(&self) -> f64 {
        bytes_to_mb(self.removed_bytes())
    }

    fn record(&mut self, decision: &Decision) {
        self.total_files += 1;
        self.total_bytes += decision.record.size_bytes;
        if decision.is_kept() {
            self.kept_files += 1;
            self.kept_bytes += decision.record.size_bytes;
        }
    }
}

/// Decisions for one canonical title, best variant first.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupReport {
    pub title: String,
    pub decisions: Vec<Decision>,
}

impl GroupReport {
    /// More than one variant competed for this title.
    pub fn is_contested(&self) -> bool {
        self.decisions.len() > 1
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisReport {
    /// Every title, sorted by title.
    pub groups: Vec<GroupReport>,
    pub stats: CollectionStats,
}

impl AnalysisReport {
    pub fn contested_groups(&self) -> impl Iterator<Item = &GroupReport> {
        self.groups.iter().filter(|g| g.is_contested())
    }

    pub fn decisions(&self) -> impl Iterator<Item = &Decision> {
        self.groups.iter().flat_map(|g| g.decisions.iter())
    }

    pub fn removals(&self) -> impl Iterator<Item = &Decision> {
        self.decisions().filter(|d| !d.is_kept())
    }
}

/// Groups classified records and applies the selection policy per title.
pub struct CollectionAnalyzer<'a> {
    policy: SelectionPolicy<'a>,
}

impl<'a> CollectionAnalyzer<'a> {
    pub fn new(rules: &'a RuleTables) -> Self {
        Self {
            policy: SelectionPolicy::new(rules),
        }
    }

    pub fn analyze(&self, records: Vec<RomRecord>) -> AnalysisReport {
        let groups = group_by_title(records);
        let mut report = AnalysisReport {
            groups: Vec::with_capacity(groups.len()),
            stats: CollectionStats {
                unique_titles: groups.len(),
                ..CollectionStats::default()
            },
        };

        for (title, members) in groups {
            let decisions = self.policy.decide(members);
            for decision in &decisions {
                report.stats.record(decision);
            }
            if decisions.len() > 1 {
                debug!(
                    "{}: kept {} of {}",
                    title,
                    decisions.iter().filter(|d| d.is_kept()).count(),
                    decisions.len()
                );
            }
            report.groups.push(GroupReport { title, decisions });
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;

    #[test]
    fn test_analyze_empty_collection() {
        let rules = RuleTables::default();
        let report = CollectionAnalyzer::new(&rules).analyze(Vec::new());
        assert!(report.groups.is_empty());
        assert_eq!(report.stats, CollectionStats::default());
        assert_eq!(report.stats.saved_mb(), 0.0);
    }

    #[test]
    fn test_analyze_stats_balance() {
        let rules = RuleTables::default();
        let classifier = Classifier::new(&rules);
        let mb = 1024 * 1024;
        let records = vec![
            classifier.classify_name("Doom (USA).zip", 4 * mb),
            classifier.classify_name("Doom (Europe).zip", 3 * mb),
            classifier.classify_name("Doom (Japan).zip", 2 * mb),
            classifier.classify_name("Quake (USA).zip", mb),
        ];

        let report = CollectionAnalyzer::new(&rules).analyze(records);

        assert_eq!(report.stats.unique_titles, 2);
        assert_eq!(report.stats.total_files, 4);
        assert_eq!(report.stats.kept_files, 2);
        assert_eq!(report.stats.removed_files(), 2);
        assert_eq!(report.stats.total_bytes, 10 * mb);
        assert_eq!(report.stats.kept_bytes, 5 * mb);
        assert_eq!(report.stats.total_mb(), report.stats.kept_mb() + report.stats.saved_mb());
        assert_eq!(report.contested_groups().count(), 1);
        assert_eq!(report.removals().count(), 2);
    }
}
