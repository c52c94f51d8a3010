use crate::model::DiscoveredFile;
use crate::progress::ProgressReporter;
use glob::Pattern;
use std::path::Path;
use tracing::{error, warn};
use walkdir::{DirEntry, WalkDir};

/// Filters applied while walking. All strings are expected lowercase except
/// `ignore_patterns`, which are globs matched against full paths.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub extensions: Vec<String>,
    pub skip_dirs: Vec<String>,
    pub skip_file_prefixes: Vec<String>,
    pub ignore_patterns: Vec<String>,
}

/// Walk every root and collect candidate ROM files in a stable order
/// (roots in the given order, entries sorted by file name).
///
/// A missing root is logged and contributes no files; unreadable entries
/// are logged and skipped.
pub fn discover_roms(
    root_paths: &[String],
    options: &ScanOptions,
    reporter: &dyn ProgressReporter,
) -> Vec<DiscoveredFile> {
    let ignore_patterns: Vec<Pattern> = options
        .ignore_patterns
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect();

    let mut found = Vec::new();
    for root in root_paths {
        let root_path = Path::new(root);
        if !root_path.is_dir() {
            error!("Directory not found: {}", root);
            continue;
        }

        let walker = WalkDir::new(root_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_pruned(entry, options, &ignore_patterns));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable entry: {}", err);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let filename = entry.file_name().to_string_lossy().into_owned();
            if !is_candidate(&filename, options) {
                continue;
            }

            let size_bytes = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(err) => {
                    warn!("Error reading metadata for {}: {}", entry.path().display(), err);
                    continue;
                }
            };

            found.push(DiscoveredFile::new(entry.path(), filename, size_bytes));
            reporter.on_scan_progress(found.len(), &entry.path().to_string_lossy());
        }
    }

    found
}

fn is_pruned(entry: &DirEntry, options: &ScanOptions, ignore_patterns: &[Pattern]) -> bool {
    if ignore_patterns.iter().any(|p| p.matches_path(entry.path())) {
        return true;
    }
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy().to_lowercase();
    options.skip_dirs.iter().any(|skip| *skip == name)
}

fn is_candidate(filename: &str, options: &ScanOptions) -> bool {
    let lower = filename.to_lowercase();
    if options
        .skip_file_prefixes
        .iter()
        .any(|prefix| lower.starts_with(prefix.as_str()))
    {
        return false;
    }
    options.extensions.iter().any(|ext| lower.ends_with(ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::progress::SilentReporter;
    use std::fs;
    use tempfile::tempdir;

    fn names(files: &[DiscoveredFile]) -> Vec<&str> {
        files.iter().map(|f| f.filename.as_str()).collect()
    }

    #[test]
    fn test_discover_filters_extensions_dirs_and_system_files() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("snes")).unwrap();
        fs::create_dir_all(root.join("Manuals")).unwrap();
        fs::write(root.join("snes").join("Zelda (USA).SFC"), b"1234").unwrap();
        fs::write(root.join("snes").join("Zelda (USA).txt"), b"x").unwrap();
        fs::write(root.join("Manuals").join("Zelda.pdf.zip"), b"x").unwrap();
        fs::write(root.join("Thumbs.db.zip"), b"x").unwrap();
        fs::write(root.join("Metroid (USA).nes"), b"12").unwrap();

        let options = AppConfig::default().scan_options();
        let files = discover_roms(&[root.to_string_lossy().into_owned()], &options, &SilentReporter);

        assert_eq!(names(&files), vec!["Metroid (USA).nes", "Zelda (USA).SFC"]);
        assert_eq!(files[0].size_bytes, 2);
        assert_eq!(files[1].size_bytes, 4);
        assert!(files[1].path.ends_with("snes/Zelda (USA).SFC"));
    }

    #[test]
    fn test_discover_missing_root_is_empty() {
        let options = AppConfig::default().scan_options();
        let files = discover_roms(&["/no/such/rom/dir".to_string()], &options, &SilentReporter);
        assert!(files.is_empty());
    }

    #[test]
    fn test_discover_respects_ignore_globs() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("hacks")).unwrap();
        fs::write(root.join("hacks").join("Mario (Hack).nes"), b"x").unwrap();
        fs::write(root.join("Mario (USA).nes"), b"x").unwrap();

        let mut options = AppConfig::default().scan_options();
        options.ignore_patterns = vec![root.join("hacks").to_string_lossy().into_owned()];
        let files = discover_roms(&[root.to_string_lossy().into_owned()], &options, &SilentReporter);

        assert_eq!(names(&files), vec!["Mario (USA).nes"]);
    }
}
