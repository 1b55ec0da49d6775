//! Split Command
//!
//! Budget-capped, disjoint train/val/test index files. Nothing is written
//! unless every invariant holds.

use std::path::PathBuf;
use std::time::Instant;

use crate::commands::BANNER;
use crate::config::SplitConfig;
use crate::corpus::{partition, read_index, select_within_budget, write_index};
use crate::error::Result;
use crate::logger::{PipelineLogger, StageCsv};
use crate::utils::format_number;

pub fn execute(cfg: &SplitConfig) -> Result<()> {
    println!("{}", BANNER);
    println!("  ✂️ Splitting corpus by token count");
    println!("{}", BANNER);
    println!("  Clean index: {:?}", cfg.clean_index);
    println!("  Target total: {}", format_number(cfg.target_total_tokens));
    println!(
        "  Ratios: train={} val={} test={}",
        cfg.ratios.train, cfg.ratios.val, cfg.ratios.test
    );
    println!("  Min train tokens: {}", format_number(cfg.min_train_tokens));
    println!("  Policy: {:?}", cfg.policy);
    println!();

    let start = Instant::now();

    // Paths that vanished since validation are dropped here, like any
    // zero-count entry.
    let files: Vec<PathBuf> = read_index(&cfg.clean_index)?
        .into_iter()
        .filter(|p| p.exists())
        .collect();
    println!("  Total clean valid files listed: {}", format_number(files.len()));

    println!("  Counting tokens and selecting files up to the budget...");
    let entries: Vec<(PathBuf, usize)> = files
        .iter()
        .map(|p| (p.clone(), cfg.policy.count_file(p)))
        .collect();

    let (selected, selected_tokens) = select_within_budget(&entries, cfg.target_total_tokens);
    println!(
        "  Total tokens used for splitting ≈ {}",
        format_number(selected_tokens)
    );

    let plan = partition(&selected, selected_tokens, cfg.ratios, cfg.min_train_tokens)?;

    println!("  Token targets:");
    println!("    Train target: {}", format_number(plan.train_target));
    println!("    Val target  : {}", format_number(plan.val_target));
    println!("    Test target : {}", format_number(plan.test_target));

    // All invariants held; only now touch the filesystem.
    std::fs::create_dir_all(&cfg.out_dir)?;
    write_index(&cfg.out_dir.join("train.txt"), &plan.train.files)?;
    write_index(&cfg.out_dir.join("val.txt"), &plan.val.files)?;
    write_index(&cfg.out_dir.join("test.txt"), &plan.test.files)?;

    let secs = start.elapsed().as_secs();
    let mut logger = PipelineLogger::new(&cfg.out_dir)?;
    logger.log_stage(
        "split",
        &format!(
            "train={}/{} val={}/{} test={}/{}",
            plan.train.files.len(),
            plan.train.tokens,
            plan.val.files.len(),
            plan.val.tokens,
            plan.test.files.len(),
            plan.test.tokens
        ),
    );
    StageCsv::open_append(&cfg.out_dir)?.record(
        "split",
        files.len(),
        plan.train.files.len() + plan.val.files.len() + plan.test.files.len(),
        0,
        selected_tokens,
        secs,
    );

    println!();
    println!("{}", BANNER);
    println!("  ✅ Split done (disjoint)!");
    println!(
        "  Train: files={}, tokens={}",
        format_number(plan.train.files.len()),
        format_number(plan.train.tokens)
    );
    println!(
        "  Val  : files={}, tokens={}",
        format_number(plan.val.files.len()),
        format_number(plan.val.tokens)
    );
    println!(
        "  Test : files={}, tokens={}",
        format_number(plan.test.files.len()),
        format_number(plan.test.tokens)
    );
    println!("  No overlap between splits.");
    println!("  Saved to: {:?}", cfg.out_dir);
    println!("{}", BANNER);

    Ok(())
}
