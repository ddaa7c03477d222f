//! Section ids and blob names.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

fn id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^0-9a-zA-Z_-]").expect("valid id regex"))
}

/// Turn a key into an index id: every character outside `[0-9a-zA-Z_-]`
/// becomes `_`, then leading underscores are dropped.
pub fn sanitize_id(key: &str) -> String {
    id_pattern()
        .replace_all(key, "_")
        .trim_start_matches('_')
        .to_string()
}

/// Id of the section starting at `start` in a document.
pub fn section_id(blob_name: &str, start: usize) -> String {
    sanitize_id(&format!("{}-{}", blob_name, start))
}

fn stem_and_extension(blob_name: &str) -> (String, String) {
    let path = Path::new(blob_name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    (stem, extension)
}

/// Blob name of a single page: `report.pdf`, page 3 gives `report-3.pdf`.
///
/// Page 0 names the document itself (its file name without directories).
pub fn page_blob_name(blob_name: &str, page_number: u32) -> String {
    if page_number == 0 {
        return Path::new(blob_name)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    let (stem, extension) = stem_and_extension(blob_name);
    format!("{}-{}{}", stem, page_number, extension)
}

/// Name of the text blob holding pages `from..=to`: `report-3to4.txt`.
pub fn corpus_name(blob_name: &str, from_page: u32, to_page: u32) -> String {
    let (stem, _) = stem_and_extension(blob_name);
    format!("{}-{}to{}.txt", stem, from_page, to_page)
}
