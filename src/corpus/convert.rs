//! MIDI -> ABC batch conversion through an external converter binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use rayon::prelude::*;

use crate::config::ConvertConfig;
use crate::corpus::index::write_index;
use crate::error::Result;

/// Batch accounting. A skipped already-converted file counts as success.
pub struct ConvertOutcome {
    pub success: usize,
    pub failed: usize,
}

/// Canonical output path: same base name under the ABC directory, `.abc`
/// extension.
pub fn abc_output_path(abc_dir: &Path, midi_path: &Path) -> PathBuf {
    let stem = midi_path
        .file_stem()
        .unwrap_or_else(|| midi_path.as_os_str());
    abc_dir.join(stem).with_extension("abc")
}

fn output_is_valid(out_path: &Path, min_abc_len: u64) -> bool {
    std::fs::metadata(out_path)
        .map(|m| m.len() > min_abc_len)
        .unwrap_or(false)
}

/// Convert a single file. Never panics and never aborts the batch: every
/// failure mode (converter missing, non-zero exit, undersized or missing
/// output) is a `false`.
pub fn convert_one(midi_path: &Path, cfg: &ConvertConfig) -> bool {
    let out_path = abc_output_path(&cfg.abc_dir, midi_path);

    // Idempotent skip: an output above the size floor is a prior success.
    if output_is_valid(&out_path, cfg.min_abc_len) {
        return true;
    }

    if !cfg.converter.exists() {
        return false;
    }

    let status = Command::new(&cfg.converter)
        .arg(midi_path)
        .arg("-o")
        .arg(&out_path)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(s) if s.success() => {}
        Ok(_) | Err(_) => {
            tracing::warn!(path = %midi_path.display(), "converter invocation failed");
            return false;
        }
    }

    // The converter can exit 0 and still produce nothing useful.
    output_is_valid(&out_path, cfg.min_abc_len)
}

/// Embarrassingly parallel conversion over the MIDI population.
pub fn convert_batch(midi_files: &[PathBuf], cfg: &ConvertConfig) -> ConvertOutcome {
    let flags: Vec<bool> = midi_files
        .par_iter()
        .map(|path| convert_one(path, cfg))
        .collect();

    let success = flags.iter().filter(|&&ok| ok).count();
    ConvertOutcome {
        success,
        failed: flags.len() - success,
    }
}

/// Recompute failures from a full scan of expected outputs, not from the
/// in-flight flags: a file is failed iff its output is still missing or
/// undersized after the batch. This is what makes re-runs over the failure
/// log safe.
pub fn scan_failures(midi_files: &[PathBuf], cfg: &ConvertConfig) -> Vec<PathBuf> {
    midi_files
        .iter()
        .filter(|midi| !output_is_valid(&abc_output_path(&cfg.abc_dir, midi), cfg.min_abc_len))
        .cloned()
        .collect()
}

/// Persist the failure log, one source path per line.
pub fn write_failure_log(path: &Path, failures: &[PathBuf]) -> Result<()> {
    write_index(path, failures)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_swaps_extension() {
        let out = abc_output_path(Path::new("data/abc_raw"), Path::new("data/midi_raw/a/tune.mid"));
        assert_eq!(out, PathBuf::from("data/abc_raw/tune.abc"));
    }

    #[test]
    fn test_output_path_uppercase_extension() {
        let out = abc_output_path(Path::new("abc"), Path::new("midi/SONG.MID"));
        assert_eq!(out, PathBuf::from("abc/SONG.abc"));
    }
}
