//! Build Vocab Command
//!
//! Character-level vocabulary over the ABC corpus.

use std::time::Instant;

use crate::commands::{run_with_workers, BANNER};
use crate::config::VocabConfig;
use crate::corpus::{build_char_set, discover_files, CharVocab};
use crate::error::Result;
use crate::logger::{PipelineLogger, StageCsv};
use crate::utils::format_number;

pub fn execute(cfg: &VocabConfig) -> Result<()> {
    println!("{}", BANNER);
    println!("  🔤 Building char-level vocab");
    println!("{}", BANNER);
    println!("  Input: {:?}", cfg.abc_dir);
    println!("  Workers: {}", cfg.workers);
    println!();

    let files = discover_files(&cfg.abc_dir, &["abc"]);
    println!("  Total files: {}", format_number(files.len()));

    let start = Instant::now();
    let set = run_with_workers(cfg.workers, || build_char_set(&files))?;
    let vocab = CharVocab::from_chars(&set)?;

    if let Some(parent) = cfg.out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    vocab.save(&cfg.out_path)?;

    let report_dir = cfg
        .out_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("."));
    let secs = start.elapsed().as_secs();
    let mut logger = PipelineLogger::new(report_dir)?;
    logger.log_stage(
        "build-vocab",
        &format!("files={} vocab_size={}", files.len(), vocab.len()),
    );
    StageCsv::open_append(report_dir)?.record(
        "build-vocab",
        files.len(),
        files.len(),
        0,
        vocab.len(),
        secs,
    );

    println!();
    println!("{}", BANNER);
    println!("  ✅ Vocab done!");
    println!("  Final vocab size: {}", vocab.len());
    println!("  Saved to: {:?}", cfg.out_path);
    println!("{}", BANNER);

    Ok(())
}
