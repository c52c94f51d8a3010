use crate::rules::UNKNOWN_REGION;
use std::fmt;
use std::path::PathBuf;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// A candidate file as handed over by the directory scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub filename: String,
    pub size_bytes: u64,
}

impl DiscoveredFile {
    pub fn new(path: impl Into<PathBuf>, filename: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            path: path.into(),
            filename: filename.into(),
            size_bytes,
        }
    }
}

/// Region codes found among a file's tags, in first-seen order without repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regions(Vec<String>);

impl Regions {
    pub fn from_codes(codes: Vec<String>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(codes.len());
        for code in codes {
            if !unique.contains(&code) {
                unique.push(code);
            }
        }
        if unique.is_empty() {
            unique.push(UNKNOWN_REGION.to_string());
        }
        Regions(unique)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.iter().any(|c| c == code)
    }

    pub fn is_unknown(&self) -> bool {
        self.0.len() == 1 && self.0[0] == UNKNOWN_REGION
    }
}

impl fmt::Display for Regions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

/// Build quality derived from release tags.
///
/// `version` is `f64::INFINITY` when no explicit version number was present,
/// which ranks an unversioned match above any numbered one with the same score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildRank {
    pub score: i32,
    pub version: f64,
}

impl BuildRank {
    pub const DEFAULT_SCORE: i32 = 50;
    pub const MAX_SCORE: i32 = 100;

    pub fn unversioned(score: i32) -> Self {
        Self {
            score,
            version: f64::INFINITY,
        }
    }
}

impl Default for BuildRank {
    fn default() -> Self {
        Self::unversioned(Self::DEFAULT_SCORE)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RomAttributes {
    pub regions: Regions,
    pub build: BuildRank,
    /// 0 when the file is not part of a multi-part set.
    pub disc_number: u32,
}

/// One classified ROM file. Immutable once built by [`crate::Classifier`].
#[derive(Debug, Clone, PartialEq)]
pub struct RomRecord {
    pub path: PathBuf,
    pub filename: String,
    pub size_bytes: u64,
    pub canonical_title: String,
    pub tags: Vec<String>,
    pub attributes: RomAttributes,
}

impl RomRecord {
    pub fn size_mb(&self) -> f64 {
        bytes_to_mb(self.size_bytes)
    }

    pub fn disc_number(&self) -> u32 {
        self.attributes.disc_number
    }
}

pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}
