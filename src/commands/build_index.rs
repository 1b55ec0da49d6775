//! Build Index Command
//!
//! Repetition-based token-budget index over the clean corpus. Paths repeat
//! until the cumulative token count reaches the target; the guarantee is
//! volume, not uniqueness.

use crate::commands::BANNER;
use crate::config::IndexConfig;
use crate::corpus::{build_repeated_index, count_tokens, read_index, write_index};
use crate::error::Result;
use crate::utils::format_number;

pub fn execute(cfg: &IndexConfig) -> Result<()> {
    println!("{}", BANNER);
    println!("  📇 Building repeated token-budget index");
    println!("{}", BANNER);
    println!("  Clean index: {:?}", cfg.clean_index);
    println!("  Target tokens: {}", format_number(cfg.target_tokens));
    println!("  Policy: {:?}", cfg.policy);
    println!();

    let files = read_index(&cfg.clean_index)?;
    println!("  Total valid files listed: {}", format_number(files.len()));

    println!("  Counting tokens for each file...");
    let table = count_tokens(&files, cfg.policy);
    println!(
        "  Total tokens in clean corpus ≈ {}",
        format_number(table.total_tokens)
    );

    let (index, running) = build_repeated_index(&table, cfg.target_tokens)?;

    if let Some(parent) = cfg.out_index.parent() {
        std::fs::create_dir_all(parent)?;
    }
    write_index(&cfg.out_index, &index)?;

    println!();
    println!("{}", BANNER);
    println!("  ✅ Index done!");
    println!("  Target tokens: {}", format_number(cfg.target_tokens));
    println!("  Actual tokens: {}", format_number(running));
    println!("  Total index rows: {}", format_number(index.len()));
    println!("  Index file saved: {:?}", cfg.out_index);
    println!("{}", BANNER);

    Ok(())
}
