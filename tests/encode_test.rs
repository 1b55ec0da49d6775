//! Encoder Integration Tests
//!
//! Chunk-ordered concatenation, worker-count independence and metadata.

mod common;

use std::collections::BTreeSet;
use std::path::PathBuf;

use abc_corpus::{encode_split, CharVocab, EncodedView, VocabMeta};
use tempfile::tempdir;

fn vocab_of(text: &str) -> CharVocab {
    let set: BTreeSet<char> = text.chars().collect();
    CharVocab::from_chars(&set).unwrap()
}

fn encode_with_workers(
    files: &[PathBuf],
    vocab: &CharVocab,
    out_dir: &std::path::Path,
    tag: &str,
    chunk_files: usize,
    workers: usize,
) -> Vec<u8> {
    let out_bin = out_dir.join(format!("{}.bin", tag));
    let tmp_dir = out_dir.join(format!("tmp_{}", tag));

    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .unwrap()
        .install(|| encode_split(files, vocab, &out_bin, &tmp_dir, chunk_files, 8))
        .unwrap();

    std::fs::read(&out_bin).unwrap()
}

#[test]
fn test_codes_follow_file_then_character_order() {
    let dir = tempdir().expect("Failed to create temp dir");

    let files = vec![
        common::create_abc_with(dir.path(), "1.abc", "ab"),
        common::create_abc_with(dir.path(), "2.abc", "ba"),
    ];
    let vocab = vocab_of("ab");

    let out_bin = dir.path().join("train.bin");
    let report = encode_split(&files, &vocab, &out_bin, &dir.path().join("tmp"), 200, 500_000)
        .unwrap();
    assert_eq!(report.tokens, 4);

    let view = EncodedView::open(&out_bin).unwrap();
    let codes: Vec<u16> = view.iter().collect();
    // a=0, b=1: "ab" then "ba"
    assert_eq!(codes, vec![0, 1, 1, 0]);
}

#[test]
fn test_unknown_characters_silently_dropped() {
    let dir = tempdir().expect("Failed to create temp dir");

    let files = vec![common::create_abc_with(dir.path(), "1.abc", "aXbXc")];
    let vocab = vocab_of("abc");

    let out_bin = dir.path().join("train.bin");
    let report = encode_split(&files, &vocab, &out_bin, &dir.path().join("tmp"), 200, 500_000)
        .unwrap();

    assert_eq!(report.tokens, 3, "the two X's must not be encoded");
    let view = EncodedView::open(&out_bin).unwrap();
    assert_eq!(view.iter().collect::<Vec<u16>>(), vec![0, 1, 2]);
}

#[test]
fn test_worker_count_never_changes_the_stream() {
    let dir = tempdir().expect("Failed to create temp dir");

    // Enough files for several chunks of 2
    let files: Vec<PathBuf> = (0..17)
        .map(|i| {
            common::create_abc_with(
                dir.path(),
                &format!("f{:02}.abc", i),
                &format!("X:{}\nK:C\n{}|\n", i, "CDEFGAB".repeat(i % 5 + 1)),
            )
        })
        .collect();

    let all_text: String = files
        .iter()
        .map(|p| std::fs::read_to_string(p).unwrap())
        .collect();
    let vocab = vocab_of(&all_text);

    let single = encode_with_workers(&files, &vocab, dir.path(), "w1", 2, 1);
    let quad = encode_with_workers(&files, &vocab, dir.path(), "w4", 2, 4);
    let eight = encode_with_workers(&files, &vocab, dir.path(), "w8", 3, 8);

    assert_eq!(single, quad, "1 vs 4 workers must be byte-identical");
    assert_eq!(single, eight, "chunk size must not change content either");
}

#[test]
fn test_temporaries_are_removed() {
    let dir = tempdir().expect("Failed to create temp dir");

    let files = vec![
        common::create_abc_with(dir.path(), "1.abc", "abcabc"),
        common::create_abc_with(dir.path(), "2.abc", "cba"),
    ];
    let vocab = vocab_of("abc");
    let tmp_dir = dir.path().join("tmp_parts");

    encode_split(&files, &vocab, &dir.path().join("train.bin"), &tmp_dir, 1, 4).unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(&tmp_dir)
        .map(|rd| rd.filter_map(|e| e.ok()).collect())
        .unwrap_or_default();
    assert!(leftovers.is_empty(), "part files must be deleted after concat");
}

#[test]
fn test_unreadable_input_skipped_not_fatal() {
    let dir = tempdir().expect("Failed to create temp dir");

    let files = vec![
        common::create_abc_with(dir.path(), "1.abc", "ab"),
        dir.path().join("missing.abc"),
        common::create_abc_with(dir.path(), "3.abc", "ba"),
    ];
    let vocab = vocab_of("ab");

    let report = encode_split(
        &files,
        &vocab,
        &dir.path().join("train.bin"),
        &dir.path().join("tmp"),
        200,
        500_000,
    )
    .unwrap();
    assert_eq!(report.tokens, 4);
}

#[test]
fn test_meta_round_trip() {
    let dir = tempdir().expect("Failed to create temp dir");

    let vocab = vocab_of("ab\n");
    let meta = VocabMeta::from_vocab(&vocab, "Character-level ABC music dataset");
    let path = dir.path().join("meta.json");
    meta.save(&path).unwrap();

    let loaded = VocabMeta::load(&path).unwrap();
    assert_eq!(loaded.vocab_size, 3);
    assert_eq!(loaded.stoi.get("a"), Some(&1));
    assert_eq!(loaded.stoi.get("\n"), Some(&0));
    assert_eq!(loaded.itos.get("2").map(String::as_str), Some("b"));
    assert_eq!(loaded.desc, "Character-level ABC music dataset");
}

#[test]
fn test_odd_length_stream_is_corrupt() {
    let dir = tempdir().expect("Failed to create temp dir");

    let path = dir.path().join("bad.bin");
    std::fs::write(&path, [1u8, 2, 3]).unwrap();

    assert!(EncodedView::open(&path).is_err());
}
