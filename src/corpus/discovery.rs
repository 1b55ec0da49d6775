//! Recursive corpus file discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Recursively collect files under `root` whose extension matches one of
/// `extensions` (case-insensitive, no leading dot). The result is sorted and
/// deduplicated so downstream stages see a stable order.
///
/// A missing root is not an error: it yields an empty list.
pub fn discover_files(root: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    if !root.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| has_extension(p, extensions))
        .collect();

    files.sort();
    files.dedup();
    files
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|want| e.eq_ignore_ascii_case(want)))
        .unwrap_or(false)
}
