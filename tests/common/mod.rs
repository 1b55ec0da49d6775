//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Write an ABC file with exactly `chars` characters of content.
pub fn create_abc_file(dir: &Path, name: &str, chars: usize) -> PathBuf {
    let path = dir.join(name);
    let header = "X:1\nK:C\n";
    let mut content = String::from(header);
    while content.chars().count() < chars {
        content.push('C');
    }
    content.truncate_to_chars(chars);
    fs::write(&path, &content).expect("Failed to write ABC file");
    path
}

/// Write an ABC file with the given literal content.
pub fn create_abc_with(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write ABC file");
    path
}

/// Write an index file listing the given paths.
pub fn create_index(dir: &Path, name: &str, paths: &[PathBuf]) -> PathBuf {
    let index_path = dir.join(name);
    let body: String = paths
        .iter()
        .map(|p| format!("{}\n", p.display()))
        .collect();
    fs::write(&index_path, body).expect("Failed to write index");
    index_path
}

trait TruncateChars {
    fn truncate_to_chars(&mut self, n: usize);
}

impl TruncateChars for String {
    fn truncate_to_chars(&mut self, n: usize) {
        if let Some((idx, _)) = self.char_indices().nth(n) {
            self.truncate(idx);
        }
    }
}
