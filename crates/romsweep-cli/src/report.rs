use colored::*;
use romsweep_core::analysis::{Decision, SelectionPolicy};
use romsweep_core::deletion::{DeletionOutcome, DeletionSummary};
use romsweep_core::{AppConfig, RomRecord, RuleTables, SweepResult};

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn region_names(rules: &RuleTables) -> String {
    let mut names: Vec<&str> = rules
        .region_tiers
        .iter()
        .map(|tier| {
            rules
                .region_codes
                .get(&tier.code)
                .map(String::as_str)
                .unwrap_or(tier.code.as_str())
        })
        .collect();
    names.push("Others");
    names.join(" > ")
}

pub fn print_banner(config: &AppConfig, rules: &RuleTables) {
    println!("{}", "ROM Sweep - region priority + revision logic".bold());
    println!("{}", "=".repeat(50));
    println!("ROM Directories: {}", config.rom_dirs.join(", "));
    println!("Preferred Regions: {}", config.preferred_regions.join(" > "));
    println!("Region Ranking: {}", region_names(rules));
    println!("Special Rule: Keep both Original + Rev B versions");
    if config.delete_files {
        println!("Delete Mode: {}", "ON".red().bold());
    } else {
        println!("Delete Mode: {}", "OFF (Preview only)".green());
    }
    println!();
}

pub fn print_delete_warning() {
    println!("{}", "WARNING: Delete mode is ON!".red().bold());
    println!("This will permanently delete ROM files!");
    println!("Make sure you have backups!");
    println!();
}

fn print_decision(decision: &Decision, deletion: Option<&DeletionSummary>) {
    let record = &decision.record;
    let status = if decision.is_kept() {
        format!("{:6}", "KEEP").green()
    } else {
        format!("{:6}", "REMOVE").red()
    };
    println!("  [{}] {:.1}MB - {}", status, record.size_mb(), record.filename);

    if let Some(reason) = decision.reason {
        println!("    -> Reason: {}", reason);
        return;
    }

    match deletion.and_then(|d| d.outcome(&record.path)) {
        Some(DeletionOutcome::Deleted) => {
            println!("    -> {}: {}", "DELETED".red(), record.path.display())
        }
        Some(DeletionOutcome::Missing) => {
            println!("    -> {}: {}", "MISSING".yellow(), record.path.display())
        }
        Some(DeletionOutcome::Failed(err)) => println!(
            "    -> {} {}: {}",
            "ERROR deleting".red().bold(),
            record.path.display(),
            err
        ),
        None => {}
    }
}

pub fn print_report(result: &SweepResult) {
    let report = &result.report;
    let deletion = result.deletion.as_ref();

    println!();
    println!("{}", rule());
    println!("ROM ANALYSIS RESULTS");
    println!("{}", rule());

    for group in report.contested_groups() {
        println!();
        println!("{}", group.title.bold());
        for decision in &group.decisions {
            print_decision(decision, deletion);
        }
    }

    let stats = &report.stats;
    println!();
    println!("{}", rule());
    println!("SUMMARY");
    println!("{}", rule());
    println!("Unique titles: {}", stats.unique_titles);
    println!("Total files: {}", stats.total_files);
    println!("Total size: {:.1} MB", stats.total_mb());
    println!("After cleanup: {:.1} MB", stats.kept_mb());
    println!(
        "Space saved: {}",
        format!("{:.1} MB", stats.saved_mb()).green()
    );

    match deletion {
        Some(summary) => {
            println!(
                "Files deleted: {} of {}",
                summary.deleted().to_string().red(),
                summary.intended
            );
            if summary.missing() > 0 {
                println!("Already missing: {}", summary.missing());
            }
            if summary.failed() > 0 {
                println!("Failed to delete: {}", summary.failed().to_string().red().bold());
            }
            println!("Cleanup completed!");
        }
        None => {
            println!();
            println!("{}", "NO FILES DELETED (Preview mode)".yellow());
            println!("To delete duplicates, run again with --delete");
        }
    }
}

pub fn print_classification(record: &RomRecord, rules: &RuleTables) {
    let attributes = &record.attributes;
    let policy = SelectionPolicy::new(rules);
    let version = if attributes.build.version.is_infinite() {
        "-".to_string()
    } else {
        attributes.build.version.to_string()
    };

    println!("{}", record.filename.bold());
    println!("  title:   {}", record.canonical_title);
    println!("  tags:    {}", record.tags.join(", "));
    println!(
        "  regions: {} (rank {})",
        attributes.regions,
        policy.region_rank(&attributes.regions)
    );
    println!("  build:   score {}, version {}", attributes.build.score, version);
    println!("  disc:    {}", attributes.disc_number);
}
