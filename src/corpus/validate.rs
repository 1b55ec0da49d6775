//! Per-file validation and clean-index construction.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::config::TokenPolicy;

/// Outcome of validating a file population.
pub struct ValidationOutcome {
    /// Paths that passed, sorted so the persisted index is reproducible
    /// regardless of worker scheduling.
    pub valid: Vec<PathBuf>,
    pub invalid: usize,
}

/// Decide validity of a single file: readable, non-empty after trim, and
/// token count within `[min_tokens, max_tokens]` inclusive. Decode problems
/// never propagate -- the read is lossy and a failed read is simply invalid.
pub fn is_valid_file(
    path: &Path,
    min_tokens: usize,
    max_tokens: usize,
    policy: TokenPolicy,
) -> bool {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(_) => return false,
    };
    let text = String::from_utf8_lossy(&bytes);

    if text.trim().is_empty() {
        return false;
    }

    let tok = match policy {
        TokenPolicy::Chars => text.chars().count(),
        TokenPolicy::Bytes => bytes.len(),
    };

    tok >= min_tokens && tok <= max_tokens
}

/// Validate a file population in parallel. Membership in the partition
/// depends only on each file's own predicate, so unordered completion is
/// harmless; the valid list is sorted before it is returned.
pub fn validate_batch(
    files: &[PathBuf],
    min_tokens: usize,
    max_tokens: usize,
    policy: TokenPolicy,
) -> ValidationOutcome {
    let flags: Vec<bool> = files
        .par_iter()
        .map(|path| is_valid_file(path, min_tokens, max_tokens, policy))
        .collect();

    let mut valid: Vec<PathBuf> = files
        .iter()
        .zip(flags.iter())
        .filter(|(_, &ok)| ok)
        .map(|(p, _)| p.clone())
        .collect();
    let invalid = files.len() - valid.len();

    valid.sort();

    ValidationOutcome { valid, invalid }
}
