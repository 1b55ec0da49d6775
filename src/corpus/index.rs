//! Index files: newline-delimited path lists, token tables and the
//! repetition-based token-budget index.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::TokenPolicy;
use crate::error::{CorpusError, Result};

/// Read an index file: one path per line, blank lines skipped.
pub fn read_index(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(CorpusError::IndexNotFound(path.to_path_buf()));
    }

    let text = std::fs::read_to_string(path).map_err(|e| CorpusError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(PathBuf::from)
        .collect())
}

/// Write an index file: one path per line, newline-terminated.
pub fn write_index(path: &Path, entries: &[PathBuf]) -> Result<()> {
    let file = File::create(path).map_err(|e| CorpusError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);

    for entry in entries {
        writeln!(writer, "{}", entry.display()).map_err(|e| CorpusError::FileWrite {
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

/// Per-file token counts plus the corpus total.
pub struct TokenTable {
    pub entries: Vec<(PathBuf, usize)>,
    pub total_tokens: usize,
}

/// Count tokens for every file under the given policy. Unreadable files
/// count 0 and stay in the table; the repeated-index walk skips nothing.
pub fn count_tokens(files: &[PathBuf], policy: TokenPolicy) -> TokenTable {
    let mut entries = Vec::with_capacity(files.len());
    let mut total_tokens = 0usize;

    for path in files {
        let tok = policy.count_file(path);
        if tok == 0 {
            tracing::warn!(path = %path.display(), "file counts zero tokens");
        }
        entries.push((path.clone(), tok));
        total_tokens += tok;
    }

    TokenTable {
        entries,
        total_tokens,
    }
}

/// Build the repetition-based index: cycle the token table from the start,
/// appending each path and accumulating its count, and stop the instant the
/// running total meets or exceeds `target_tokens` -- mid-scan, not at a list
/// boundary. Paths repeat when the corpus is smaller than the target; the
/// guarantee is token volume, not file uniqueness.
pub fn build_repeated_index(
    table: &TokenTable,
    target_tokens: usize,
) -> Result<(Vec<PathBuf>, usize)> {
    // A zero-token corpus would cycle forever.
    if table.total_tokens == 0 {
        return Err(CorpusError::ZeroTokenCorpus);
    }

    let mut index = Vec::new();
    let mut running = 0usize;

    'outer: while running < target_tokens {
        for (path, tok) in &table.entries {
            index.push(path.clone());
            running += tok;

            if running >= target_tokens {
                break 'outer;
            }
        }
    }

    Ok((index, running))
}
