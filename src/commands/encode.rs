//! Encode Command
//!
//! Encodes split file lists into flat u16 binary streams plus meta.json.
//! Default run builds train and val and writes the metadata; `--split test`
//! encodes one extra list against the metadata from that earlier run.

use std::path::PathBuf;
use std::time::Instant;

use crate::commands::{run_with_workers, BANNER};
use crate::config::EncodeConfig;
use crate::corpus::{encode_split, read_index, CharVocab, EncodeReport, VocabMeta};
use crate::error::{CorpusError, Result};
use crate::logger::{PipelineLogger, StageCsv};
use crate::utils::format_number;

const META_DESC: &str = "Character-level ABC music dataset (parallel, nanoGPT compatible)";

pub fn execute(cfg: &EncodeConfig, only_split: Option<&str>) -> Result<()> {
    println!("{}", BANNER);
    println!("  🔢 Encoding splits to binary");
    println!("{}", BANNER);
    println!("  Splits dir: {:?}", cfg.splits_dir);
    println!("  Vocab: {:?}", cfg.vocab_path);
    println!("  Output: {:?}", cfg.out_dir);
    println!("  Chunk: {} files | Flush: {} codes", cfg.chunk_files, cfg.flush_codes);
    println!("  Workers: {}", cfg.workers);
    println!();

    let vocab = CharVocab::load(&cfg.vocab_path)?;
    println!("  Loaded char vocab, size = {}", vocab.len());

    std::fs::create_dir_all(&cfg.out_dir)?;
    let tmp_dir = cfg.out_dir.join("tmp_parts");

    let start = Instant::now();
    let mut logger = PipelineLogger::new(&cfg.out_dir)?;
    let mut csv = StageCsv::open_append(&cfg.out_dir)?;

    let splits: Vec<&str> = match only_split {
        // Encoding an extra split presumes the metadata from the main run.
        Some(name) => {
            let meta_path = cfg.out_dir.join("meta.json");
            if !meta_path.exists() {
                return Err(CorpusError::MetaNotFound(meta_path));
            }
            vec![name]
        }
        None => vec!["train", "val"],
    };

    for name in &splits {
        let list_path = cfg.splits_dir.join(format!("{}.txt", name));
        let files: Vec<PathBuf> = read_index(&list_path)?
            .into_iter()
            .filter(|p| p.exists())
            .collect();

        println!("  Building {} with {} workers...", name, cfg.workers);
        let out_bin = cfg.out_dir.join(format!("{}.bin", name));

        let report: EncodeReport = run_with_workers(cfg.workers, || {
            encode_split(
                &files,
                &vocab,
                &out_bin,
                &tmp_dir,
                cfg.chunk_files,
                cfg.flush_codes,
            )
        })??;

        println!(
            "  [OK] {} files={} parts={} tokens={}",
            name,
            format_number(report.files),
            report.parts,
            format_number(report.tokens)
        );

        logger.log_stage(
            "encode",
            &format!("split={} files={} tokens={}", name, report.files, report.tokens),
        );
        csv.record(
            "encode",
            report.files,
            report.files,
            0,
            report.tokens,
            start.elapsed().as_secs(),
        );
    }

    if only_split.is_none() {
        let meta = VocabMeta::from_vocab(&vocab, META_DESC);
        meta.save(&cfg.out_dir.join("meta.json"))?;
    }

    let _ = std::fs::remove_dir(&tmp_dir);

    println!();
    println!("{}", BANNER);
    println!("  ✅ Encoding done!");
    match only_split {
        Some(name) => println!("  Saved {}.bin under {:?}", name, cfg.out_dir),
        None => println!("  Saved train.bin, val.bin, meta.json under {:?}", cfg.out_dir),
    }
    println!("{}", BANNER);

    Ok(())
}
