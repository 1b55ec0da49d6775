//! Destructive on-disk prune of out-of-bounds ABC files.
//!
//! Unlike the validator this deletes files instead of writing an index. It
//! measures raw byte size: it runs on freshly converted output, before any
//! decode-based stage.

use std::path::PathBuf;

use crate::config::PruneConfig;
use crate::corpus::discovery::discover_files;

pub struct PruneOutcome {
    pub scanned: usize,
    pub kept: usize,
    pub removed: usize,
    /// Paths that should have been deleted but could not be.
    pub delete_failures: Vec<PathBuf>,
}

/// Walk the ABC tree and delete every file whose byte size falls outside
/// `[min_bytes, max_bytes]`. Deletion failures are recorded and skipped,
/// never fatal. With `dry_run` nothing is deleted; the accounting reports
/// what would happen.
pub fn prune_by_size(cfg: &PruneConfig) -> PruneOutcome {
    let files = discover_files(&cfg.abc_dir, &["abc"]);

    let mut outcome = PruneOutcome {
        scanned: 0,
        kept: 0,
        removed: 0,
        delete_failures: Vec::new(),
    };

    for path in files {
        let size = match std::fs::metadata(&path) {
            Ok(m) => m.len(),
            Err(_) => continue,
        };

        outcome.scanned += 1;

        if size >= cfg.min_bytes && size <= cfg.max_bytes {
            outcome.kept += 1;
            continue;
        }

        if cfg.dry_run {
            outcome.removed += 1;
            continue;
        }

        match std::fs::remove_file(&path) {
            Ok(()) => outcome.removed += 1,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to delete");
                outcome.delete_failures.push(path);
            }
        }
    }

    outcome
}
