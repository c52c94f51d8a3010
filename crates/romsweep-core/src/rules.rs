use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Region code used when no region tag is found on a file.
pub const UNKNOWN_REGION: &str = "Unk";

/// Substring of a tag that maps to a region code when the tag is not an exact code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionAlias {
    pub pattern: String,
    pub code: String,
}

/// Fixed ranking score awarded to a record whose region set contains `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionTier {
    pub code: String,
    pub score: i32,
}

/// Immutable lookup tables driving classification and selection.
///
/// Built once (defaults, a TOML override, or in code) and passed by reference
/// into [`crate::classify::AttributeClassifier`] and
/// [`crate::analysis::SelectionPolicy`], which match against the
/// [`normalized`](RuleTables::normalized) form. Every list that is "ordered" is
/// scanned front to back and the first hit wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleTables {
    /// Exact region tag → human readable name.
    pub region_codes: BTreeMap<String, String>,
    /// Legacy long-form region names, matched as substrings.
    pub region_aliases: Vec<RegionAlias>,
    /// Region tiers, highest applicable tier wins.
    pub region_tiers: Vec<RegionTier>,
    /// Score for region sets matching no tier (includes unknown).
    pub region_fallback_score: i32,
    /// Release quality markers, best first. Index `i` scores `100 - i`.
    pub release_codes: Vec<String>,
    /// A tag containing this marker forces the maximum build score.
    pub top_build_marker: String,
    /// Markers that make a variant a distinct game rather than a duplicate.
    pub special_editions: Vec<String>,
    /// Tags containing one of these mark an explicit "Rev B" style revision.
    pub revision_markers: Vec<String>,
    /// Tags containing one of these disqualify a record from being "original".
    pub non_original_markers: Vec<String>,
}

impl Default for RuleTables {
    fn default() -> Self {
        let region_codes = [
            ("As", "Asia"),
            ("A", "Australia"),
            ("B", "Brazil"),
            ("C", "Canada"),
            ("Ch", "China"),
            ("D", "Netherlands"),
            ("E", "Europe"),
            ("F", "France"),
            ("Fn", "Finland"),
            ("G", "Germany"),
            ("Gr", "Greece"),
            ("Hk", "Hong Kong"),
            ("I", "Italy"),
            ("J", "Japan"),
            ("K", "Korea"),
            ("Nl", "Netherlands"),
            ("No", "Norway"),
            ("R", "Russia"),
            ("S", "Spain"),
            ("Sw", "Sweden"),
            ("U", "USA"),
            ("UK", "United Kingdom"),
            ("W", "World"),
            ("Unl", "Unlicensed"),
            ("PD", "Public Domain"),
            (UNKNOWN_REGION, "Unknown"),
        ]
        .into_iter()
        .map(|(code, name)| (code.to_string(), name.to_string()))
        .collect();

        let region_aliases = [("USA", "U"), ("Europe", "E"), ("United Kingdom", "UK")]
            .into_iter()
            .map(|(pattern, code)| RegionAlias {
                pattern: pattern.to_string(),
                code: code.to_string(),
            })
            .collect();

        let region_tiers = [("U", 100), ("E", 90), ("UK", 85), ("W", 80), ("A", 75), ("C", 70)]
            .into_iter()
            .map(|(code, score)| RegionTier {
                code: code.to_string(),
                score,
            })
            .collect();

        Self {
            region_codes,
            region_aliases,
            region_tiers,
            region_fallback_score: 10,
            release_codes: strings(&[
                "gamecube edition",
                "!",
                "rev b",
                "rev 2",
                "rev",
                "alternate",
                "alt",
                "v",
                "o",
                "rev a",
                "rev 1",
                "beta",
                "proto",
                "alpha",
                "promo",
                "pirate",
                "demo",
                "sample",
                "bootleg",
                "b",
                "virtual console",
            ]),
            top_build_marker: "gamecube edition".to_string(),
            special_editions: strings(&[
                "gamecube edition",
                "virtual console",
                "limited run games",
                "iam8bit",
                "capcom town",
                "capcom classics",
                "konami collector",
                "namco museum",
                "disney classic games",
                "aladdin compact cartridge",
                "nintendo power",
            ]),
            revision_markers: strings(&["rev b", "rev 2"]),
            non_original_markers: strings(&["rev", "beta", "alpha", "proto", "sample"]),
        }
    }
}

impl RuleTables {
    /// Parse rule tables from TOML text. Keys that are absent keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        let mut rules: RuleTables = toml::from_str(text)?;
        rules.normalize();
        Ok(rules)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Borrowed when the marker lists are already lowercase, otherwise a
    /// normalized copy.
    pub fn normalized(&self) -> Cow<'_, RuleTables> {
        if self.is_normalized() {
            Cow::Borrowed(self)
        } else {
            let mut rules = self.clone();
            rules.normalize();
            Cow::Owned(rules)
        }
    }

    fn is_normalized(&self) -> bool {
        let clean = |s: &String| !s.is_empty() && *s == s.to_lowercase();
        [
            &self.release_codes,
            &self.special_editions,
            &self.revision_markers,
            &self.non_original_markers,
        ]
        .iter()
        .all(|list| list.iter().all(clean))
            && self.top_build_marker == self.top_build_marker.to_lowercase()
    }

    /// Matching against these lists is done on lowercased tags.
    pub fn normalize(&mut self) {
        for list in [
            &mut self.release_codes,
            &mut self.special_editions,
            &mut self.revision_markers,
            &mut self.non_original_markers,
        ] {
            list.iter_mut().for_each(|s| *s = s.to_lowercase());
            list.retain(|s| !s.is_empty());
        }
        self.top_build_marker = self.top_build_marker.to_lowercase();
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
