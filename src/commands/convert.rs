//! Convert Command
//!
//! Batch MIDI -> ABC conversion through the external converter binary.

use std::time::Instant;

use crate::commands::{run_with_workers, BANNER};
use crate::config::ConvertConfig;
use crate::corpus::{convert_batch, discover_files, scan_failures, write_failure_log};
use crate::error::Result;
use crate::logger::{PipelineLogger, StageCsv};
use crate::utils::format_number;

pub fn execute(cfg: &ConvertConfig) -> Result<()> {
    println!("{}", BANNER);
    println!("  🎼 Converting MIDI → ABC");
    println!("{}", BANNER);
    println!("  Input: {:?}", cfg.midi_dir);
    println!("  Output: {:?}", cfg.abc_dir);
    println!("  Converter: {:?}", cfg.converter);
    println!("  Workers: {}", cfg.workers);
    println!();

    std::fs::create_dir_all(&cfg.abc_dir)?;

    let midi_files = discover_files(&cfg.midi_dir, &["mid", "midi"]);
    println!("  MIDI files: {}", format_number(midi_files.len()));

    if !cfg.converter.exists() {
        println!("  ⚠ Converter binary not found: {:?}", cfg.converter);
    }

    let report_dir = cfg
        .failed_log
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("."));
    let mut logger = PipelineLogger::new(report_dir)?;
    let start = Instant::now();

    let outcome = run_with_workers(cfg.workers, || convert_batch(&midi_files, cfg))?;

    // Failure log from a full post-pass scan, so re-runs see the truth on
    // disk rather than this batch's flags.
    let failures = scan_failures(&midi_files, cfg);
    if !failures.is_empty() {
        write_failure_log(&cfg.failed_log, &failures)?;
        println!(
            "  ⚠ Logged {} failures to {:?}",
            format_number(failures.len()),
            cfg.failed_log
        );
    } else {
        println!("  All ABC outputs valid.");
    }

    let secs = start.elapsed().as_secs();
    logger.log_stage(
        "convert",
        &format!(
            "midi={} success={} failed={}",
            midi_files.len(),
            outcome.success,
            outcome.failed
        ),
    );
    StageCsv::open_append(report_dir)?.record(
        "convert",
        midi_files.len(),
        outcome.success,
        outcome.failed,
        0,
        secs,
    );

    println!();
    println!("{}", BANNER);
    println!("  ✅ Conversion done!");
    println!("  Success: {}", format_number(outcome.success));
    println!("  Failed : {}", format_number(outcome.failed));
    println!("{}", BANNER);

    Ok(())
}
