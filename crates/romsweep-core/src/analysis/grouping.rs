use crate::model::RomRecord;
use std::collections::BTreeMap;

/// Partition records by canonical title. Titles iterate in sorted order and
/// records keep their first-seen order within a title.
pub fn group_by_title(records: Vec<RomRecord>) -> BTreeMap<String, Vec<RomRecord>> {
    let mut groups: BTreeMap<String, Vec<RomRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.canonical_title.clone())
            .or_default()
            .push(record);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::rules::RuleTables;

    #[test]
    fn test_group_by_title_partitions_input() {
        let rules = RuleTables::default();
        let classifier = Classifier::new(&rules);
        let names = [
            "Tetris (World).gb",
            "Metroid (USA).nes",
            "Tetris (Japan).gb",
            "Metroid (Europe).nes",
            "Tetris (USA) (Rev 1).gb",
            "Zelda.nes",
        ];
        let records: Vec<RomRecord> = names.iter().map(|n| classifier.classify_name(n, 1)).collect();

        let groups = group_by_title(records);

        assert_eq!(groups.len(), 3);
        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, names.len());

        let tetris: Vec<&str> = groups["Tetris.gb"].iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(
            tetris,
            vec!["Tetris (World).gb", "Tetris (Japan).gb", "Tetris (USA) (Rev 1).gb"]
        );
        assert_eq!(groups["Zelda.nes"].len(), 1);

        let titles: Vec<&String> = groups.keys().collect();
        assert_eq!(titles, vec!["Metroid.nes", "Tetris.gb", "Zelda.nes"]);
    }

    #[test]
    fn test_group_by_title_empty() {
        assert!(group_by_title(Vec::new()).is_empty());
    }
}
