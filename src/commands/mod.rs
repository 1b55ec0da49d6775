//! Commands Module
//!
//! All CLI subcommand implementations.

pub mod build_index;
pub mod build_vocab;
pub mod convert;
pub mod encode;
pub mod prune;
pub mod split;
pub mod stats;
pub mod validate;

use crate::error::{CorpusError, Result};

/// Run a closure inside a dedicated rayon pool of `workers` threads
/// (0 = one per core).
pub(crate) fn run_with_workers<T: Send>(
    workers: usize,
    f: impl FnOnce() -> T + Send,
) -> Result<T> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| CorpusError::ConfigError(format!("thread pool: {}", e)))?;
    Ok(pool.install(f))
}

pub(crate) const BANNER: &str =
    "═══════════════════════════════════════════════════════════";
