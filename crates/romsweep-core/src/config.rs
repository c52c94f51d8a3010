use crate::error::Error;
use crate::rules::RuleTables;
use crate::scanner::ScanOptions;
use config::{Config, Environment, File as ConfigFile};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_EXTENSIONS: &[&str] = &[
    // Nintendo
    ".nes", ".fds", ".nsf", ".smc", ".sfc", ".fig", ".gb", ".gbc", ".gba", ".n64", ".z64",
    ".v64", ".nds", ".3ds", ".cia", ".gcm", ".rvz", ".wbfs", ".wia", ".nsp", ".xci",
    // Sega
    ".md", ".gen", ".smd", ".32x", ".gg", ".sms", ".cdi", ".gdi",
    // Disc images
    ".bin", ".cue", ".chd", ".pbp", ".img", ".iso", ".cso", ".mdf", ".mds", ".nrg", ".ccd",
    ".sub",
    // PlayStation 3
    ".pkg", ".rap",
    // Archives
    ".zip", ".7z", ".rar", ".tar", ".gz", ".bz2",
    // Cartridge dumps and homebrew
    ".rom", ".a78", ".lnx", ".vec", ".int", ".xbe", ".dol", ".elf",
];

const DEFAULT_SKIP_DIRS: &[&str] = &[
    "images",
    "videos",
    "manuals",
    "saves",
    "screenshots",
    "artwork",
    "cheats",
    "docs",
];

const DEFAULT_SKIP_FILE_PREFIXES: &[&str] = &["systeminfo", "desktop.ini", ".ds_store", "thumbs.db"];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub rom_dirs: Vec<String>,
    /// Shown to the user; region ranking uses `RuleTables::region_tiers`.
    pub preferred_regions: Vec<String>,
    pub delete_files: bool,
    pub ignore_patterns: Vec<String>,
    pub skip_dirs: Vec<String>,
    pub skip_file_prefixes: Vec<String>,
    pub extensions: Vec<String>,
    pub rules_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rom_dirs: Vec::new(),
            preferred_regions: vec!["U".into(), "E".into(), "UK".into()],
            delete_files: false,
            ignore_patterns: Vec::new(),
            skip_dirs: to_strings(DEFAULT_SKIP_DIRS),
            skip_file_prefixes: to_strings(DEFAULT_SKIP_FILE_PREFIXES),
            extensions: to_strings(DEFAULT_EXTENSIONS),
            rules_file: None,
        }
    }
}

impl AppConfig {
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            extensions: lowercase(&self.extensions),
            skip_dirs: lowercase(&self.skip_dirs),
            skip_file_prefixes: lowercase(&self.skip_file_prefixes),
            ignore_patterns: self.ignore_patterns.clone(),
        }
    }

    /// Rule tables from `rules_file` when set, built-in defaults otherwise.
    pub fn load_rules(&self) -> Result<RuleTables, Error> {
        match &self.rules_file {
            Some(path) => RuleTables::from_toml_file(Path::new(path)),
            None => Ok(RuleTables::default()),
        }
    }
}

/// Read `Romsweep.toml` (optional) overlaid with `ROMSWEEP_*` environment variables.
pub fn load_configuration() -> Result<AppConfig, Error> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Romsweep").required(false))
        .add_source(
            Environment::with_prefix("ROMSWEEP")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("rom_dirs")
                .with_list_parse_key("preferred_regions")
                .with_list_parse_key("ignore_patterns")
                .with_list_parse_key("skip_dirs")
                .with_list_parse_key("skip_file_prefixes")
                .with_list_parse_key("extensions"),
        )
        .build()?;
    Ok(builder.try_deserialize::<AppConfig>()?)
}

/// Remove directories that are subdirectories of other directories in the list.
pub fn non_overlapping_directories(dirs: &[String]) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();

    for dir in dirs {
        let dir_path = Path::new(dir);
        if result.iter().any(|kept| dir_path.starts_with(kept)) {
            continue;
        }
        result.retain(|kept| !Path::new(kept).starts_with(dir_path));
        result.push(dir.clone());
    }

    result
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn lowercase(items: &[String]) -> Vec<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}
