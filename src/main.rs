use clap::{Parser, Subcommand};
use std::path::PathBuf;

use abc_corpus::{
    commands, ConvertConfig, EncodeConfig, IndexConfig, PruneConfig, SplitConfig, SplitRatios,
    StatsConfig, TokenPolicy, ValidateConfig, VocabConfig,
};

// ============ CLI ============
#[derive(Parser)]
#[command(name = "abc-corpus")]
#[command(author = "Caike Costa")]
#[command(version = "1.0.0")]
#[command(about = "Character-level ABC music corpus pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Converts MIDI files to ABC via the external converter
    Convert {
        #[arg(short, long, default_value = "data/midi_raw")]
        input: PathBuf,
        #[arg(short, long, default_value = "data/abc_raw")]
        output: PathBuf,
        #[arg(long, default_value = "midi2abc")]
        converter: PathBuf,
        #[arg(long, default_value = "data/failed_midi.txt")]
        failed_log: PathBuf,
        #[arg(long, default_value = "10")]
        min_abc_len: u64,
        #[arg(long, default_value = "16")]
        workers: usize,
    },

    /// Builds the clean index of valid ABC files
    Validate {
        #[arg(short, long, default_value = "data/abc_raw")]
        input: PathBuf,
        #[arg(short, long, default_value = "data/abc_clean_index.txt")]
        out: PathBuf,
        #[arg(long, default_value = "200")]
        min_tokens: usize,
        #[arg(long, default_value = "100000")]
        max_tokens: usize,
        #[arg(long, value_enum, default_value = "chars")]
        policy: TokenPolicy,
        #[arg(long, default_value = "16")]
        workers: usize,
    },

    /// Deletes ABC files outside the byte-size bounds (destructive)
    Prune {
        #[arg(short, long, default_value = "data/abc_raw")]
        input: PathBuf,
        #[arg(long, default_value = "200")]
        min_bytes: u64,
        #[arg(long, default_value = "500000")]
        max_bytes: u64,
        #[arg(long)]
        dry_run: bool,
    },

    /// Builds the character vocabulary
    BuildVocab {
        #[arg(short, long, default_value = "data/abc_raw")]
        input: PathBuf,
        #[arg(short, long, default_value = "data/vocab_charlevel.txt")]
        out: PathBuf,
        #[arg(long, default_value = "16")]
        workers: usize,
    },

    /// Builds the repetition-based token-budget index
    BuildIndex {
        #[arg(short, long, default_value = "data/abc_clean_index.txt")]
        index: PathBuf,
        #[arg(short, long, default_value = "data/abc_1b_index.txt")]
        out: PathBuf,
        #[arg(long, default_value = "1000000000")]
        target_tokens: usize,
        #[arg(long, value_enum, default_value = "chars")]
        policy: TokenPolicy,
    },

    /// Splits the clean index into disjoint train/val/test lists
    Split {
        #[arg(short, long, default_value = "data/abc_clean_index.txt")]
        index: PathBuf,
        #[arg(short, long, default_value = "data/splits_unique")]
        out_dir: PathBuf,
        #[arg(long, default_value = "1000000000")]
        target_tokens: usize,
        #[arg(long, default_value_t = 0.98)]
        train_ratio: f64,
        #[arg(long, default_value_t = 0.01)]
        val_ratio: f64,
        #[arg(long, default_value_t = 0.01)]
        test_ratio: f64,
        #[arg(long, default_value = "100000000")]
        min_train_tokens: usize,
        #[arg(long, value_enum, default_value = "chars")]
        policy: TokenPolicy,
    },

    /// Encodes split lists into u16 binary streams + meta.json
    Encode {
        #[arg(short, long, default_value = "data/splits_unique")]
        splits_dir: PathBuf,
        #[arg(long, default_value = "data/vocab_charlevel.txt")]
        vocab: PathBuf,
        #[arg(short, long, default_value = "data/abc_char")]
        out_dir: PathBuf,
        #[arg(long, default_value = "200")]
        chunk_files: usize,
        #[arg(long, default_value = "500000")]
        flush_codes: usize,
        #[arg(long, default_value = "16")]
        workers: usize,
        /// Encode a single split (e.g. "test") against existing meta.json
        #[arg(long)]
        split: Option<String>,
    },

    /// Prints regex-tokenizer statistics over an index
    Stats {
        #[arg(short, long, default_value = "data/abc_clean_index.txt")]
        index: PathBuf,
        #[arg(long, default_value = "data")]
        report_dir: PathBuf,
        #[arg(long, default_value = "16")]
        workers: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            converter,
            failed_log,
            min_abc_len,
            workers,
        } => commands::convert::execute(&ConvertConfig {
            midi_dir: input,
            abc_dir: output,
            converter,
            failed_log,
            min_abc_len,
            workers,
        }),

        Commands::Validate {
            input,
            out,
            min_tokens,
            max_tokens,
            policy,
            workers,
        } => commands::validate::execute(&ValidateConfig {
            abc_dir: input,
            out_index: out,
            min_tokens,
            max_tokens,
            policy,
            workers,
        }),

        Commands::Prune {
            input,
            min_bytes,
            max_bytes,
            dry_run,
        } => commands::prune::execute(&PruneConfig {
            abc_dir: input,
            min_bytes,
            max_bytes,
            dry_run,
        }),

        Commands::BuildVocab {
            input,
            out,
            workers,
        } => commands::build_vocab::execute(&VocabConfig {
            abc_dir: input,
            out_path: out,
            workers,
        }),

        Commands::BuildIndex {
            index,
            out,
            target_tokens,
            policy,
        } => commands::build_index::execute(&IndexConfig {
            clean_index: index,
            out_index: out,
            target_tokens,
            policy,
        }),

        Commands::Split {
            index,
            out_dir,
            target_tokens,
            train_ratio,
            val_ratio,
            test_ratio,
            min_train_tokens,
            policy,
        } => commands::split::execute(&SplitConfig {
            clean_index: index,
            out_dir,
            target_total_tokens: target_tokens,
            ratios: SplitRatios {
                train: train_ratio,
                val: val_ratio,
                test: test_ratio,
            },
            min_train_tokens,
            policy,
        }),

        Commands::Encode {
            splits_dir,
            vocab,
            out_dir,
            chunk_files,
            flush_codes,
            workers,
            split,
        } => commands::encode::execute(
            &EncodeConfig {
                splits_dir,
                vocab_path: vocab,
                out_dir,
                chunk_files,
                flush_codes,
                workers,
            },
            split.as_deref(),
        ),

        Commands::Stats {
            index,
            report_dir,
            workers,
        } => commands::stats::execute(&StatsConfig {
            index,
            report_dir,
            workers,
        }),
    };

    if let Err(e) = result {
        eprintln!("[FATAL] {}", e);
        std::process::exit(1);
    }
}
