mod commands;
mod logging;
mod progress;
mod report;

use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context};
use clap::{CommandFactory, Parser};
use commands::{Cli, Commands, SweepArgs};
use dotenv::dotenv;
use progress::CliReporter;
use romsweep_core::config::{load_configuration, AppConfig};
use romsweep_core::{export, Classifier, RuleTables, SweepEngine};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = load_configuration().context("Error loading configuration")?;

    let args = Cli::parse();

    match args.command {
        Some(Commands::Run(sweep)) => run_sweep(config, sweep)?,
        Some(Commands::Classify { filenames, rules }) => {
            let rules = match rules {
                Some(path) => RuleTables::from_toml_file(Path::new(&path))?,
                None => config.load_rules()?,
            };
            let classifier = Classifier::new(&rules);
            for filename in &filenames {
                report::print_classification(&classifier.classify_name(filename, 0), &rules);
            }
        }
        Some(Commands::PrintConfig) => {
            let rules = config.load_rules()?;
            println!("{}", toml::to_string_pretty(&config)?);
            println!("# classification tables");
            println!("{}", toml::to_string_pretty(&rules)?);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn apply_overrides(mut config: AppConfig, sweep: &SweepArgs) -> AppConfig {
    if !sweep.dirs.is_empty() {
        config.rom_dirs = sweep.dirs.clone();
    }
    if !sweep.regions.is_empty() {
        config.preferred_regions = sweep.regions.clone();
    }
    if sweep.rules.is_some() {
        config.rules_file = sweep.rules.clone();
    }
    config.delete_files |= sweep.delete;
    config
}

fn run_sweep(config: AppConfig, sweep: SweepArgs) -> anyhow::Result<()> {
    let mut config = apply_overrides(config, &sweep);
    if config.rom_dirs.is_empty() {
        bail!("No ROM directory given; pass --dir or set rom_dirs in Romsweep.toml");
    }

    let rules = config.load_rules().context("Error loading rule tables")?;
    report::print_banner(&config, &rules);

    if config.delete_files {
        report::print_delete_warning();
        if !sweep.yes && !prompt_confirm("Delete all files marked REMOVE?", Some(false))? {
            warn!("Deletion not confirmed, continuing in preview mode");
            config.delete_files = false;
        }
    }
    let engine = SweepEngine::with_rules(config, rules);

    let reporter = CliReporter::new();
    let result = engine.run(&reporter)?;
    report::print_report(&result);

    if let Some(target) = &sweep.csv {
        let path = export::resolve_csv_path(target);
        let rows = export::write_decisions_csv(&result.report, &path)
            .with_context(|| format!("Error writing {}", path.display()))?;
        info!("Wrote {} decisions to {}", rows, path.display());
    }

    Ok(())
}

fn prompt_confirm(prompt: &str, default: Option<bool>) -> io::Result<bool> {
    let mut input = String::new();

    loop {
        input.clear();

        match default {
            Some(true) => print!("{} (Y/n): ", prompt),
            Some(false) | None => print!("{} (y/N): ", prompt),
        }
        io::stdout().flush()?;

        io::stdin().read_line(&mut input)?;

        match input.trim().to_uppercase().as_str() {
            "Y" => return Ok(true),
            "N" => return Ok(false),
            "" => match default {
                Some(default) => return Ok(default),
                None => continue,
            },
            _ => continue,
        }
    }
}
