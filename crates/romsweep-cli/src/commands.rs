use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "romsweep")]
#[command(about = "Keep the best version of every ROM and sweep out the rest", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze ROM directories and report keep/remove decisions (deletes only with --delete)
    Run(SweepArgs),
    /// Show how filenames are classified
    Classify {
        /// File names to classify
        #[arg(required = true)]
        filenames: Vec<String>,
        /// TOML file overriding the classification tables
        #[arg(long)]
        rules: Option<String>,
    },
    /// Print configuration values and classification tables
    PrintConfig,
}

#[derive(Debug, Args)]
pub struct SweepArgs {
    /// ROM directory to scan; repeat for several (overrides configured rom_dirs)
    #[arg(short, long = "dir")]
    pub dirs: Vec<String>,
    /// Preferred region order, e.g. `-r U -r E -r UK`
    #[arg(short, long = "region")]
    pub regions: Vec<String>,
    /// Delete files marked REMOVE
    #[arg(long)]
    pub delete: bool,
    /// Do not ask for confirmation before deleting
    #[arg(short, long)]
    pub yes: bool,
    /// TOML file overriding the classification tables
    #[arg(long)]
    pub rules: Option<String>,
    /// Write every decision to this CSV file, or a timestamped file inside this directory
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
