//! Character vocabulary: parallel extraction, set-union reduce, and the
//! persisted one-character-per-line format with `\n` escaped.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{CorpusError, Result};

/// The literal two characters written in place of a newline.
const NEWLINE_ESCAPE: &str = "\\n";

/// Distinct characters of one file. Lossy decode; a failed read contributes
/// the empty set.
pub fn extract_chars(path: &Path) -> BTreeSet<char> {
    match std::fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).chars().collect(),
        Err(_) => BTreeSet::new(),
    }
}

/// Union of per-file character sets across the population. Set union is
/// commutative and associative, so the result is identical for any worker
/// count or completion order.
pub fn build_char_set(files: &[PathBuf]) -> BTreeSet<char> {
    files
        .par_iter()
        .map(|p| extract_chars(p))
        .reduce(BTreeSet::new, |mut acc, local| {
            acc.extend(local);
            acc
        })
}

/// Sorted character vocabulary with a stable char <-> id mapping.
pub struct CharVocab {
    chars: Vec<char>,
    stoi: HashMap<char, u16>,
}

impl CharVocab {
    /// Build from a character set. Ids are assigned by the natural character
    /// ordering and are fixed from here on.
    pub fn from_chars(set: &BTreeSet<char>) -> Result<Self> {
        if set.len() > u16::MAX as usize + 1 {
            return Err(CorpusError::VocabTooLarge { size: set.len() });
        }

        let chars: Vec<char> = set.iter().copied().collect();
        let stoi = chars
            .iter()
            .enumerate()
            .map(|(i, &ch)| (ch, i as u16))
            .collect();

        Ok(Self { chars, stoi })
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Code for a character; `None` for anything outside the vocabulary.
    /// Encoders drop unknown characters silently.
    pub fn id(&self, ch: char) -> Option<u16> {
        self.stoi.get(&ch).copied()
    }

    /// Character for a code.
    pub fn char(&self, id: u16) -> Option<char> {
        self.chars.get(id as usize).copied()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Persist: one character per line, newline written as the literal `\n`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| CorpusError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut writer = BufWriter::new(file);

        for &ch in &self.chars {
            let line = if ch == '\n' {
                NEWLINE_ESCAPE.to_string()
            } else {
                ch.to_string()
            };
            writeln!(writer, "{}", line).map_err(|e| CorpusError::FileWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
        writer.flush().map_err(|e| CorpusError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(())
    }

    /// Load a persisted vocabulary, reversing the newline escape. Entries are
    /// re-sorted and deduplicated, so loading is idempotent even over a
    /// hand-edited file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CorpusError::VocabNotFound(path.to_path_buf()));
        }

        let text = std::fs::read_to_string(path).map_err(|e| CorpusError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut set = BTreeSet::new();
        for line in text.lines() {
            if line == NEWLINE_ESCAPE {
                set.insert('\n');
            } else if let Some(ch) = single_char(line) {
                set.insert(ch);
            }
        }

        Self::from_chars(&set)
    }
}

fn single_char(line: &str) -> Option<char> {
    let mut chars = line.chars();
    let first = chars.next()?;
    if chars.next().is_none() {
        Some(first)
    } else {
        None
    }
}
