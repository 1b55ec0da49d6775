//! Prune Command
//!
//! Destructively deletes ABC files outside the byte-size bounds. No copying,
//! no new directory.

use crate::commands::BANNER;
use crate::config::PruneConfig;
use crate::corpus::prune_by_size;
use crate::error::Result;
use crate::utils::format_number;

pub fn execute(cfg: &PruneConfig) -> Result<()> {
    println!("{}", BANNER);
    println!("  🧹 Pruning ABC corpus by size");
    println!("{}", BANNER);
    println!("  Dir: {:?}", cfg.abc_dir);
    println!("  Bounds: [{}, {}] bytes", cfg.min_bytes, cfg.max_bytes);
    if cfg.dry_run {
        println!("  Mode: DRY RUN (nothing deleted)");
    }
    println!();

    let outcome = prune_by_size(cfg);

    for path in &outcome.delete_failures {
        println!("  ⚠ Failed to delete {:?}", path);
    }

    println!();
    println!("{}", BANNER);
    println!("  ✅ Pruning done!");
    println!("  Total files scanned : {}", format_number(outcome.scanned));
    println!("  Kept valid files    : {}", format_number(outcome.kept));
    println!("  Deleted invalid     : {}", format_number(outcome.removed));
    println!("{}", BANNER);

    Ok(())
}
