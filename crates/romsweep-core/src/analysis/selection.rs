use crate::classify::attributes::is_disc_tag;
use crate::classify::AttributeClassifier;
use crate::model::{Regions, RomRecord};
use crate::rules::RuleTables;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepReason {
    BestVersion,
    MultiDiscSet,
    RevisionPair,
    OnlyVersion,
}

impl fmt::Display for KeepReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            KeepReason::BestVersion => "Best version",
            KeepReason::MultiDiscSet => "Multi-disc set",
            KeepReason::RevisionPair => "Original + Rev B pair",
            KeepReason::OnlyVersion => "Only version",
        };
        f.write_str(text)
    }
}

/// Keep/remove verdict for one record. A record is kept iff it has a reason.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub record: RomRecord,
    pub reason: Option<KeepReason>,
}

impl Decision {
    pub fn is_kept(&self) -> bool {
        self.reason.is_some()
    }

    /// Reason text, empty for removed records.
    pub fn reason_text(&self) -> String {
        self.reason.map(|r| r.to_string()).unwrap_or_default()
    }
}

/// Ranks the variants of one title and decides which survive.
pub struct SelectionPolicy<'a> {
    rules: &'a RuleTables,
    attributes: AttributeClassifier<'a>,
}

impl<'a> SelectionPolicy<'a> {
    pub fn new(rules: &'a RuleTables) -> Self {
        Self {
            rules,
            attributes: AttributeClassifier::new(rules),
        }
    }

    /// Score of the highest region tier present in `regions`.
    pub fn region_rank(&self, regions: &Regions) -> i32 {
        self.rules
            .region_tiers
            .iter()
            .filter(|tier| regions.contains(&tier.code))
            .map(|tier| tier.score)
            .max()
            .unwrap_or(self.rules.region_fallback_score)
    }

    /// `Greater` when `a` is the better variant.
    fn compare(&self, a: &RomRecord, b: &RomRecord) -> Ordering {
        let (a_attr, b_attr) = (&a.attributes, &b.attributes);
        self.region_rank(&a_attr.regions)
            .cmp(&self.region_rank(&b_attr.regions))
            .then(a_attr.build.score.cmp(&b_attr.build.score))
            .then(a_attr.build.version.total_cmp(&b_attr.build.version))
            .then(b_attr.disc_number.cmp(&a_attr.disc_number))
    }

    /// Best first. Ties keep their input order.
    pub fn order(&self, mut records: Vec<RomRecord>) -> Vec<RomRecord> {
        records.sort_by(|a, b| self.compare(b, a));
        records
    }

    /// Both numbered discs of one title whose other tags match as sets.
    pub fn is_multi_disc_set(&self, a: &RomRecord, b: &RomRecord) -> bool {
        if a.disc_number() == 0 || b.disc_number() == 0 {
            return false;
        }
        a.canonical_title == b.canonical_title && non_disc_tags(a) == non_disc_tags(b)
    }

    /// One side is an original release, the other an explicit "Rev B"/"Rev 2".
    pub fn is_revision_pair(&self, a: &RomRecord, b: &RomRecord) -> bool {
        if a.canonical_title != b.canonical_title {
            return false;
        }
        let original_and_rev = |x: &RomRecord, y: &RomRecord| {
            self.attributes.is_original(&x.tags) && self.attributes.has_revision_marker(&y.tags)
        };
        original_and_rev(a, b) || original_and_rev(b, a)
    }

    /// Order the group and walk it best-first, keeping the best record, any
    /// disc that completes a kept set, and at most one original/revision partner.
    pub fn decide(&self, records: Vec<RomRecord>) -> Vec<Decision> {
        if records.len() == 1 {
            return records
                .into_iter()
                .map(|record| Decision {
                    record,
                    reason: Some(KeepReason::OnlyVersion),
                })
                .collect();
        }

        let mut decisions: Vec<Decision> = Vec::with_capacity(records.len());
        let mut kept: Vec<usize> = Vec::new();

        for (index, record) in self.order(records).into_iter().enumerate() {
            let reason = if index == 0 {
                Some(KeepReason::BestVersion)
            } else if kept
                .iter()
                .any(|&k| self.is_multi_disc_set(&record, &decisions[k].record))
            {
                Some(KeepReason::MultiDiscSet)
            } else if kept.len() < 2
                && kept
                    .iter()
                    .any(|&k| self.is_revision_pair(&record, &decisions[k].record))
            {
                Some(KeepReason::RevisionPair)
            } else {
                None
            };

            if reason.is_some() {
                kept.push(index);
            }
            decisions.push(Decision { record, reason });
        }

        decisions
    }
}

fn non_disc_tags(record: &RomRecord) -> BTreeSet<&str> {
    record
        .tags
        .iter()
        .filter(|tag| !is_disc_tag(tag))
        .map(String::as_str)
        .collect()
}
