//! ABC-Corpus: character-level ABC music corpus pipeline
//!
//! Discovers raw MIDI/ABC files, converts MIDI to ABC through an external
//! binary, filters by token count, builds the character vocabulary and the
//! token-budget indices, produces disjoint train/val/test splits and encodes
//! them into flat u16 binary streams for downstream model training.

pub mod commands;
pub mod config;
pub mod corpus;
pub mod error;
pub mod logger;
pub mod utils;

// Main re-exports
pub use config::{
    ConvertConfig, EncodeConfig, IndexConfig, PruneConfig, SplitConfig, SplitRatios, StatsConfig,
    TokenPolicy, ValidateConfig, VocabConfig,
};
pub use corpus::{
    build_char_set, build_repeated_index, convert_batch, count_tokens, discover_files,
    encode_split, partition, prune_by_size, read_index, select_within_budget, tokenize_text,
    validate_batch, write_index, CharVocab, EncodedView, SplitPlan, TokenTable, VocabMeta,
};
pub use error::{CorpusError, Result};
