pub mod attributes;
pub mod tags;

pub use attributes::AttributeClassifier;

use crate::model::{DiscoveredFile, RomRecord};
use crate::rules::RuleTables;
use rayon::prelude::*;
use std::borrow::Cow;

/// Turns discovered files into classified [`RomRecord`]s.
pub struct Classifier<'a> {
    rules: Cow<'a, RuleTables>,
    attributes: AttributeClassifier<'a>,
}

impl<'a> Classifier<'a> {
    pub fn new(rules: &'a RuleTables) -> Self {
        Self {
            rules: rules.normalized(),
            attributes: AttributeClassifier::new(rules),
        }
    }

    pub fn classify(&self, file: &DiscoveredFile) -> RomRecord {
        let tags = tags::extract_tags(&file.filename);
        let canonical_title =
            tags::canonical_title(&file.filename, &tags, &self.rules.special_editions);
        let attributes = self.attributes.attributes(&tags);

        RomRecord {
            path: file.path.clone(),
            filename: file.filename.clone(),
            size_bytes: file.size_bytes,
            canonical_title,
            tags,
            attributes,
        }
    }

    /// Classify a bare filename; the path is the filename itself.
    pub fn classify_name(&self, filename: &str, size_bytes: u64) -> RomRecord {
        self.classify(&DiscoveredFile::new(filename, filename, size_bytes))
    }

    /// Parallel classification. Output order matches input order.
    pub fn classify_all(&self, files: &[DiscoveredFile]) -> Vec<RomRecord> {
        files.par_iter().map(|file| self.classify(file)).collect()
    }
}
