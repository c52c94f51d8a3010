use regex::Regex;

lazy_static::lazy_static! {
    /// Contents of one non-nested `(...)` or `[...]` group.
    static ref TAG_GROUP: Regex = Regex::new(r"[\[\(]([^\[\]()]+)[\]\)]").unwrap();
    /// Whole bracket spans, removed when building the title.
    static ref BRACKET_SPAN: Regex = Regex::new(r"[\[\(].*?[\]\)]").unwrap();
    static ref SPACE_BEFORE_DOT: Regex = Regex::new(r"\s+\.").unwrap();
}

/// Split every bracket/parenthesis group on commas, in filename order.
///
/// Empty items survive as empty strings.
pub fn extract_tags(filename: &str) -> Vec<String> {
    TAG_GROUP
        .captures_iter(filename)
        .flat_map(|cap| {
            cap[1]
                .split(',')
                .map(|tag| tag.trim().to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Grouping key for a filename: bracket content stripped, special-edition
/// tags re-attached before the extension so those editions group apart.
///
/// `special_editions` must be lowercase.
pub fn canonical_title(filename: &str, tags: &[String], special_editions: &[String]) -> String {
    if !BRACKET_SPAN.is_match(filename) {
        return filename.to_string();
    }

    let stripped = BRACKET_SPAN.replace_all(filename, "");
    let stripped = SPACE_BEFORE_DOT
        .replace_all(stripped.trim(), ".")
        .into_owned();

    let edition_tags: Vec<&str> = tags
        .iter()
        .filter(|tag| {
            let lower = tag.to_lowercase();
            special_editions.iter().any(|marker| lower.contains(marker.as_str()))
        })
        .map(String::as_str)
        .collect();

    if edition_tags.is_empty() {
        return stripped;
    }

    let (stem, ext) = split_extension(&stripped);
    format!("{} - {}{}", stem, edition_tags.join(" + "), ext)
}

/// Split at the last dot, keeping the dot with the extension. Leading dots
/// belong to the stem, so ".hidden" has no extension.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if !name[..idx].trim_start_matches('.').is_empty() => name.split_at(idx),
        _ => (name, ""),
    }
}
