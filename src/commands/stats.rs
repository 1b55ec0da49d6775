//! Stats Command
//!
//! Regex-tokenizer statistics over a validated index: token totals and the
//! extremes of the distribution. Read-only; useful before picking filter
//! bounds or a token budget.

use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;

use crate::commands::{run_with_workers, BANNER};
use crate::config::StatsConfig;
use crate::corpus::{read_index, token_count};
use crate::error::Result;
use crate::logger::{PipelineLogger, StageCsv};
use crate::utils::{format_bytes, format_number};

pub fn execute(cfg: &StatsConfig) -> Result<()> {
    println!("{}", BANNER);
    println!("  📊 Corpus statistics (ABC tokenizer)");
    println!("{}", BANNER);
    println!("  Index: {:?}", cfg.index);
    println!("  Workers: {}", cfg.workers);
    println!();

    let files = read_index(&cfg.index)?;
    println!("  Files listed: {}", format_number(files.len()));

    let start = Instant::now();

    // (tokens, bytes) per file; unreadable files count (0, 0).
    let counts: Vec<(usize, usize)> = run_with_workers(cfg.workers, || {
        files
            .par_iter()
            .map(|path| match std::fs::read(path) {
                Ok(bytes) => {
                    let text = String::from_utf8_lossy(&bytes);
                    (token_count(&text), bytes.len())
                }
                Err(_) => (0, 0),
            })
            .collect()
    })?;

    let total_tokens: usize = counts.iter().map(|(t, _)| t).sum();
    let total_bytes: usize = counts.iter().map(|(_, b)| b).sum();
    let unreadable = counts.iter().filter(|(t, b)| *t == 0 && *b == 0).count();

    let longest = counts
        .iter()
        .enumerate()
        .max_by_key(|(_, (t, _))| *t)
        .map(|(i, (t, _))| (files[i].clone(), *t));
    let shortest = counts
        .iter()
        .enumerate()
        .filter(|(_, (t, _))| *t > 0)
        .min_by_key(|(_, (t, _))| *t)
        .map(|(i, (t, _))| (files[i].clone(), *t));

    let secs = start.elapsed().as_secs();
    let mut logger = PipelineLogger::new(&cfg.report_dir)?;
    logger.log_stage(
        "stats",
        &format!(
            "files={} tokens={} bytes={}",
            files.len(),
            total_tokens,
            total_bytes
        ),
    );
    StageCsv::open_append(&cfg.report_dir)?.record(
        "stats",
        files.len(),
        files.len() - unreadable,
        unreadable,
        total_tokens,
        secs,
    );

    println!();
    println!("{}", BANNER);
    println!("  ✅ Scan complete!");
    println!("  Total tokens: {}", format_number(total_tokens));
    println!("  Total size  : {}", format_bytes(total_bytes));
    if let Some((path, tok)) = longest {
        println!("  Longest : {} tokens  {:?}", format_number(tok), file_name(&path));
    }
    if let Some((path, tok)) = shortest {
        println!("  Shortest: {} tokens  {:?}", format_number(tok), file_name(&path));
    }
    if unreadable > 0 {
        println!("  ⚠ Unreadable files: {}", format_number(unreadable));
    }
    println!("{}", BANNER);

    Ok(())
}

fn file_name(path: &PathBuf) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
