//! Validate Command
//!
//! Builds the clean index of files whose token count sits inside the
//! configured bounds. Writes an index, never touches the files themselves.

use std::time::Instant;

use crate::commands::{run_with_workers, BANNER};
use crate::config::ValidateConfig;
use crate::corpus::{discover_files, validate_batch, write_index};
use crate::error::Result;
use crate::logger::{PipelineLogger, StageCsv};
use crate::utils::format_number;

pub fn execute(cfg: &ValidateConfig) -> Result<()> {
    println!("{}", BANNER);
    println!("  🔍 Validating ABC corpus");
    println!("{}", BANNER);
    println!("  Input: {:?}", cfg.abc_dir);
    println!("  Bounds: [{}, {}] ({:?})", cfg.min_tokens, cfg.max_tokens, cfg.policy);
    println!("  Workers: {}", cfg.workers);
    println!();

    let files = discover_files(&cfg.abc_dir, &["abc"]);
    println!("  Raw files: {}", format_number(files.len()));

    let start = Instant::now();
    let outcome = run_with_workers(cfg.workers, || {
        validate_batch(&files, cfg.min_tokens, cfg.max_tokens, cfg.policy)
    })?;

    if let Some(parent) = cfg.out_index.parent() {
        std::fs::create_dir_all(parent)?;
    }
    write_index(&cfg.out_index, &outcome.valid)?;

    let report_dir = cfg
        .out_index
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("."));
    let secs = start.elapsed().as_secs();
    let mut logger = PipelineLogger::new(report_dir)?;
    logger.log_stage(
        "validate",
        &format!(
            "raw={} kept={} removed={}",
            files.len(),
            outcome.valid.len(),
            outcome.invalid
        ),
    );
    StageCsv::open_append(report_dir)?.record(
        "validate",
        files.len(),
        outcome.valid.len(),
        outcome.invalid,
        0,
        secs,
    );

    println!();
    println!("{}", BANNER);
    println!("  ✅ Clean index done!");
    println!("  Total raw files  : {}", format_number(files.len()));
    println!("  Valid (kept)     : {}", format_number(outcome.valid.len()));
    println!("  Invalid (removed): {}", format_number(outcome.invalid));
    println!("  Index file saved : {:?}", cfg.out_index);
    println!("{}", BANNER);

    Ok(())
}
