use crate::model::{BuildRank, Regions, RomAttributes};
use crate::rules::RuleTables;
use regex::Regex;
use std::borrow::Cow;

lazy_static::lazy_static! {
    static ref DISC_TAG: Regex = Regex::new(r"(?i)(disk|disc|side|volume)\s+(\w+)").unwrap();
    static ref DISC_KEYWORD: Regex = Regex::new(r"(?i)(disk|disc|side|volume)").unwrap();
    static ref VERSION_NUMBER: Regex = Regex::new(r"(\d+\.?\d*)").unwrap();
}

/// Derives region, build and disc attributes from an ordered tag list.
///
/// All methods are total: bad input degrades to the documented defaults.
pub struct AttributeClassifier<'a> {
    rules: Cow<'a, RuleTables>,
}

impl<'a> AttributeClassifier<'a> {
    pub fn new(rules: &'a RuleTables) -> Self {
        Self {
            rules: rules.normalized(),
        }
    }

    pub fn attributes(&self, tags: &[String]) -> RomAttributes {
        RomAttributes {
            regions: self.regions(tags),
            build: self.build_rank(tags),
            disc_number: disc_number(tags),
        }
    }

    pub fn regions(&self, tags: &[String]) -> Regions {
        let codes = tags
            .iter()
            .filter_map(|tag| {
                if self.rules.region_codes.contains_key(tag) {
                    return Some(tag.clone());
                }
                self.rules
                    .region_aliases
                    .iter()
                    .find(|alias| tag.contains(alias.pattern.as_str()))
                    .map(|alias| alias.code.clone())
            })
            .collect();
        Regions::from_codes(codes)
    }

    /// The first tag (in filename order) matching any release code decides the
    /// score, except that the top build marker anywhere overrides everything.
    pub fn build_rank(&self, tags: &[String]) -> BuildRank {
        let lowered: Vec<String> = tags.iter().map(|t| t.to_lowercase()).collect();

        let marker = self.rules.top_build_marker.as_str();
        if !marker.is_empty() && lowered.iter().any(|t| t.contains(marker)) {
            return BuildRank::unversioned(BuildRank::MAX_SCORE);
        }

        for (tag, lower) in tags.iter().zip(&lowered) {
            if lower.is_empty() {
                continue;
            }
            let hit = self
                .rules
                .release_codes
                .iter()
                .position(|code| lower.contains(code.as_str()));
            if let Some(index) = hit {
                return BuildRank {
                    score: BuildRank::MAX_SCORE - index as i32,
                    version: version_number(tag).unwrap_or(f64::INFINITY),
                };
            }
        }

        BuildRank::default()
    }

    /// True when no tag carries a revision/pre-release marker.
    pub fn is_original(&self, tags: &[String]) -> bool {
        !self.any_tag_contains(tags, &self.rules.non_original_markers)
    }

    /// True when some tag carries an explicit "Rev B"/"Rev 2" marker.
    pub fn has_revision_marker(&self, tags: &[String]) -> bool {
        self.any_tag_contains(tags, &self.rules.revision_markers)
    }

    fn any_tag_contains(&self, tags: &[String], markers: &[String]) -> bool {
        tags.iter().any(|tag| {
            let lower = tag.to_lowercase();
            markers.iter().any(|m| lower.contains(m.as_str()))
        })
    }
}

/// `Some(0.0)` for a numeric fragment that does not parse, `None` when absent.
fn version_number(tag: &str) -> Option<f64> {
    VERSION_NUMBER
        .captures(tag)
        .map(|cap| cap[1].parse::<f64>().unwrap_or(0.0))
}

/// Disc/side/volume number from the first tag that names one, 0 otherwise.
/// Letters count from `A = 1`.
pub fn disc_number(tags: &[String]) -> u32 {
    tags.iter()
        .find_map(|tag| DISC_TAG.captures(tag))
        .map(|cap| disc_token_value(&cap[2]))
        .unwrap_or(0)
}

fn disc_token_value(token: &str) -> u32 {
    match token.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => c.to_ascii_uppercase() as u32 - 'A' as u32 + 1,
        Some(c) if c.is_ascii_digit() => {
            let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
            // Only overflow can fail here.
            digits.parse().unwrap_or(u32::MAX)
        }
        _ => 0,
    }
}

/// Tags that name a disc/side/volume, ignored when comparing set members.
pub fn is_disc_tag(tag: &str) -> bool {
    DISC_KEYWORD.is_match(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_regions_exact_code_and_alias() {
        let rules = RuleTables::default();
        let classifier = AttributeClassifier::new(&rules);
        let regions = classifier.regions(&tags(&["J", "USA, Canada", "Europe", "!"]));
        assert_eq!(regions.to_string(), "J, U, E");
    }

    #[test]
    fn test_regions_long_form_united_kingdom() {
        let rules = RuleTables::default();
        let classifier = AttributeClassifier::new(&rules);
        assert!(classifier.regions(&tags(&["United Kingdom"])).contains("UK"));
    }

    #[test]
    fn test_regions_default_unknown() {
        let rules = RuleTables::default();
        let classifier = AttributeClassifier::new(&rules);
        assert!(classifier.regions(&tags(&["Japan", ""])).is_unknown());
        assert!(classifier.regions(&[]).is_unknown());
    }

    #[test]
    fn test_build_rank_default() {
        let rules = RuleTables::default();
        let classifier = AttributeClassifier::new(&rules);
        let rank = classifier.build_rank(&tags(&["USA"]));
        assert_eq!(rank.score, 50);
        assert!(rank.version.is_infinite());
    }

    #[test]
    fn test_build_rank_rev_b_unversioned() {
        let rules = RuleTables::default();
        let classifier = AttributeClassifier::new(&rules);
        let rank = classifier.build_rank(&tags(&["USA", "Rev B"]));
        assert_eq!(rank.score, 98);
        assert!(rank.version.is_infinite());
    }

    #[test]
    fn test_build_rank_parses_version() {
        let rules = RuleTables::default();
        let classifier = AttributeClassifier::new(&rules);
        let rank = classifier.build_rank(&tags(&["Rev 2"]));
        assert_eq!(rank.score, 97);
        assert_eq!(rank.version, 2.0);

        let rank = classifier.build_rank(&tags(&["v1.1"]));
        assert_eq!(rank.score, 93);
        assert_eq!(rank.version, 1.1);
    }

    #[test]
    fn test_build_rank_first_matching_tag_wins() {
        let rules = RuleTables::default();
        let classifier = AttributeClassifier::new(&rules);
        // "Beta" (89) comes before "!" (99) and still decides.
        let rank = classifier.build_rank(&tags(&["Beta", "!"]));
        assert_eq!(rank.score, 89);
    }

    #[test]
    fn test_build_rank_gamecube_overrides_earlier_match() {
        let rules = RuleTables::default();
        let classifier = AttributeClassifier::new(&rules);
        let rank = classifier.build_rank(&tags(&["Rev 1", "GameCube Edition"]));
        assert_eq!(rank.score, 100);
        assert!(rank.version.is_infinite());
    }

    #[test]
    fn test_build_rank_substitute_tables() {
        let rules = RuleTables {
            release_codes: vec!["final".into(), "beta".into()],
            top_build_marker: String::new(),
            ..RuleTables::default()
        };
        let classifier = AttributeClassifier::new(&rules);
        assert_eq!(classifier.build_rank(&tags(&["Beta 3"])).score, 99);
        assert_eq!(classifier.build_rank(&tags(&["Beta 3"])).version, 3.0);
        assert_eq!(classifier.build_rank(&tags(&["GameCube Edition"])).score, 50);
    }

    #[test]
    fn test_mixed_case_tables_built_in_code() {
        let rules = RuleTables {
            release_codes: vec!["Final".into(), "Beta".into()],
            non_original_markers: vec!["Rev".into()],
            revision_markers: vec!["Rev B".into()],
            ..RuleTables::default()
        };
        let classifier = AttributeClassifier::new(&rules);
        let rank = classifier.build_rank(&tags(&["USA", "Beta 3"]));
        assert_eq!(rank.score, 99);
        assert_eq!(rank.version, 3.0);
        assert!(classifier.is_original(&tags(&["USA"])));
        assert!(!classifier.is_original(&tags(&["USA", "Rev A"])));
        assert!(classifier.has_revision_marker(&tags(&["USA", "Rev B"])));
    }

    #[test]
    fn test_version_number_malformed_is_zero() {
        assert_eq!(version_number("v1"), Some(1.0));
        assert_eq!(version_number("Rev B"), None);
        // Unicode digits match the pattern but do not parse as f64.
        assert_eq!(version_number("v١"), Some(0.0));
    }

    #[test]
    fn test_disc_number_digits_and_letters() {
        assert_eq!(disc_number(&tags(&["USA", "Disc 2"])), 2);
        assert_eq!(disc_number(&tags(&["Side B"])), 2);
        assert_eq!(disc_number(&tags(&["volume c"])), 3);
        assert_eq!(disc_number(&tags(&["Disk 1 of 3"])), 1);
        assert_eq!(disc_number(&tags(&["USA"])), 0);
        assert_eq!(disc_number(&tags(&[""])), 0);
    }

    #[test]
    fn test_disc_number_oversized_token_saturates() {
        assert_eq!(disc_number(&tags(&["Disc 99999999999"])), u32::MAX);
        assert_eq!(disc_number(&tags(&["Disc 99999999999of2"])), u32::MAX);
    }

    #[test]
    fn test_disc_number_first_tag_wins() {
        assert_eq!(disc_number(&tags(&["Disc 3", "Side A"])), 3);
    }

    #[test]
    fn test_revision_markers() {
        let rules = RuleTables::default();
        let classifier = AttributeClassifier::new(&rules);
        assert!(classifier.is_original(&tags(&["USA"])));
        assert!(!classifier.is_original(&tags(&["USA", "Beta"])));
        assert!(classifier.has_revision_marker(&tags(&["Rev B"])));
        assert!(classifier.has_revision_marker(&tags(&["REV 2"])));
        assert!(!classifier.has_revision_marker(&tags(&["Rev A"])));
    }
}
