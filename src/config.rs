//! Stage Configuration
//!
//! Every pipeline stage takes an explicit config value built from CLI flags.
//! Defaults mirror the paths and thresholds the pipeline has always used.

use std::path::{Path, PathBuf};

use clap::ValueEnum;

/// How a file's token count is measured.
///
/// `Chars` counts decoded characters (lossy UTF-8, invalid bytes ignored).
/// `Bytes` takes the size on disk. A pipeline run must use one policy
/// consistently: budgets computed under one policy are meaningless under the
/// other.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenPolicy {
    Chars,
    Bytes,
}

impl TokenPolicy {
    /// Token count for a file under this policy. Unreadable files count 0.
    pub fn count_file(&self, path: &Path) -> usize {
        match self {
            TokenPolicy::Chars => match std::fs::read(path) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).chars().count(),
                Err(_) => 0,
            },
            TokenPolicy::Bytes => match std::fs::metadata(path) {
                Ok(meta) => meta.len() as usize,
                Err(_) => 0,
            },
        }
    }

    /// Token count for already-decoded text.
    pub fn count_text(&self, text: &str) -> usize {
        match self {
            TokenPolicy::Chars => text.chars().count(),
            TokenPolicy::Bytes => text.len(),
        }
    }
}

/// MIDI → ABC batch conversion.
pub struct ConvertConfig {
    pub midi_dir: PathBuf,
    pub abc_dir: PathBuf,
    pub converter: PathBuf,
    pub failed_log: PathBuf,
    /// Outputs at or below this many bytes are treated as failed conversions.
    pub min_abc_len: u64,
    pub workers: usize,
}

/// Clean-index validation.
pub struct ValidateConfig {
    pub abc_dir: PathBuf,
    pub out_index: PathBuf,
    pub min_tokens: usize,
    pub max_tokens: usize,
    pub policy: TokenPolicy,
    pub workers: usize,
}

/// Destructive on-disk prune. Always byte-sized: it runs before any decode.
pub struct PruneConfig {
    pub abc_dir: PathBuf,
    pub min_bytes: u64,
    pub max_bytes: u64,
    pub dry_run: bool,
}

/// Character vocabulary build.
pub struct VocabConfig {
    pub abc_dir: PathBuf,
    pub out_path: PathBuf,
    pub workers: usize,
}

/// Repetition-based token-budget index.
pub struct IndexConfig {
    pub clean_index: PathBuf,
    pub out_index: PathBuf,
    pub target_tokens: usize,
    pub policy: TokenPolicy,
}

/// Train/val/test ratios. Must sum to 1.0 within tolerance.
#[derive(Clone, Copy, Debug)]
pub struct SplitRatios {
    pub train: f64,
    pub val: f64,
    pub test: f64,
}

impl SplitRatios {
    pub fn sum(&self) -> f64 {
        self.train + self.val + self.test
    }
}

/// Disjoint split construction.
pub struct SplitConfig {
    pub clean_index: PathBuf,
    pub out_dir: PathBuf,
    pub target_total_tokens: usize,
    pub ratios: SplitRatios,
    pub min_train_tokens: usize,
    pub policy: TokenPolicy,
}

/// Corpus statistics over a validated index.
pub struct StatsConfig {
    pub index: PathBuf,
    pub report_dir: PathBuf,
    pub workers: usize,
}

/// Parallel binary encoding.
pub struct EncodeConfig {
    pub splits_dir: PathBuf,
    pub vocab_path: PathBuf,
    pub out_dir: PathBuf,
    /// Files per worker chunk.
    pub chunk_files: usize,
    /// Buffered codes per chunk before flushing to the part file.
    pub flush_codes: usize,
    pub workers: usize,
}
