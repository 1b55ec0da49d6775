use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorpusError {
    // --- I/O ---
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    // --- Indices ---
    #[error("Index file not found: {0}")]
    IndexNotFound(PathBuf),

    #[error("No files selected for splitting. Check index or token counts")]
    NoFilesSelected,

    #[error("Corpus has zero tokens under the current policy; repeated index would never terminate")]
    ZeroTokenCorpus,

    // --- Vocabulary ---
    #[error("Vocabulary file not found: {0}")]
    VocabNotFound(PathBuf),

    #[error("Vocabulary has {size} entries, more than a u16 code can address")]
    VocabTooLarge { size: usize },

    // --- Splits ---
    #[error("Split ratios must sum to 1.0, got {sum}")]
    RatioSum { sum: f64 },

    #[error("Train target {target} tokens below the configured floor of {floor}")]
    TrainBelowFloor { target: usize, floor: usize },

    #[error("Split overlap detected between {a} and {b}")]
    SplitOverlap { a: &'static str, b: &'static str },

    // --- Encoded streams ---
    #[error("Metadata not found: {0}. Build train/val first")]
    MetaNotFound(PathBuf),

    #[error("Metadata error: {0}")]
    MetaError(String),

    #[error("Encoded stream {path} has odd byte length {len}")]
    StreamCorrupt { path: PathBuf, len: usize },

    // --- Config ---
    #[error("Invalid config: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, CorpusError>;
