use crate::analysis::AnalysisReport;
use crate::error::Error;
use chrono::Local;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct DecisionRow<'a> {
    title: &'a str,
    status: &'static str,
    reason: String,
    size_bytes: u64,
    filename: &'a str,
    path: String,
    regions: String,
    build_score: i32,
    build_version: String,
    disc_number: u32,
}

/// Resolve where the CSV goes: an existing directory gets a timestamped file
/// name inside it, anything else is used as the file path.
pub fn resolve_csv_path(target: &Path) -> PathBuf {
    if target.is_dir() {
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        target.join(format!("romsweep-{}.csv", stamp))
    } else {
        target.to_path_buf()
    }
}

/// Write one row per decision, groups in title order. Returns rows written.
pub fn write_decisions_csv(report: &AnalysisReport, path: &Path) -> Result<usize, Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut wtr = csv::Writer::from_path(path)?;
    let mut rows = 0;

    for group in &report.groups {
        for decision in &group.decisions {
            let record = &decision.record;
            let build = record.attributes.build;
            wtr.serialize(DecisionRow {
                title: &group.title,
                status: if decision.is_kept() { "KEEP" } else { "REMOVE" },
                reason: decision.reason_text(),
                size_bytes: record.size_bytes,
                filename: &record.filename,
                path: record.path.to_string_lossy().into_owned(),
                regions: record.attributes.regions.to_string(),
                build_score: build.score,
                build_version: if build.version.is_infinite() {
                    String::new()
                } else {
                    build.version.to_string()
                },
                disc_number: record.attributes.disc_number,
            })?;
            rows += 1;
        }
    }

    wtr.flush()?;
    Ok(rows)
}
