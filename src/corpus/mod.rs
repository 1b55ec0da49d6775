// src/corpus/mod.rs

mod convert;
mod discovery;
mod encode;
mod index;
mod prune;
mod split;
mod stream;
mod tokenize;
mod validate;
mod vocab;

pub use convert::{
    abc_output_path, convert_batch, convert_one, scan_failures, write_failure_log, ConvertOutcome,
};
pub use discovery::discover_files;
pub use encode::{encode_split, EncodeReport, VocabMeta};
pub use index::{build_repeated_index, count_tokens, read_index, write_index, TokenTable};
pub use prune::{prune_by_size, PruneOutcome};
pub use split::{partition, select_within_budget, SplitList, SplitPlan};
pub use stream::EncodedView;
pub use tokenize::{token_count, tokenize_line, tokenize_text};
pub use validate::{is_valid_file, validate_batch, ValidationOutcome};
pub use vocab::{build_char_set, extract_chars, CharVocab};
