//! Vocabulary Integration Tests
//!
//! Union determinism, the newline escape and the persisted format.

mod common;

use abc_corpus::{build_char_set, CharVocab};
use std::collections::BTreeSet;
use tempfile::tempdir;

#[test]
fn test_vocab_over_two_files() {
    let dir = tempdir().expect("Failed to create temp dir");

    let a = common::create_abc_with(dir.path(), "a.abc", "ab\n");
    let b = common::create_abc_with(dir.path(), "b.abc", "bc");

    let set = build_char_set(&[a, b]);
    let vocab = CharVocab::from_chars(&set).unwrap();

    assert_eq!(vocab.chars(), &['\n', 'a', 'b', 'c']);
}

#[test]
fn test_union_is_order_independent() {
    let dir = tempdir().expect("Failed to create temp dir");

    let files = vec![
        common::create_abc_with(dir.path(), "1.abc", "X:1\nK:C\nCDE|"),
        common::create_abc_with(dir.path(), "2.abc", "z2 [CEG]"),
        common::create_abc_with(dir.path(), "3.abc", "M:4/4"),
    ];

    let forward = build_char_set(&files);

    let mut reversed_files = files.clone();
    reversed_files.reverse();
    let reversed = build_char_set(&reversed_files);

    assert_eq!(forward, reversed);
}

#[test]
fn test_worker_count_does_not_change_vocab() {
    let dir = tempdir().expect("Failed to create temp dir");

    let files: Vec<_> = (0..20)
        .map(|i| {
            common::create_abc_with(
                dir.path(),
                &format!("f{}.abc", i),
                &format!("X:{}\nK:C\nC{}|\n", i, "DEF".repeat(i)),
            )
        })
        .collect();

    let single = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap()
        .install(|| build_char_set(&files));
    let many = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .unwrap()
        .install(|| build_char_set(&files));

    assert_eq!(single, many);
}

#[test]
fn test_unreadable_file_contributes_empty_set() {
    let dir = tempdir().expect("Failed to create temp dir");

    let real = common::create_abc_with(dir.path(), "real.abc", "abc");
    let missing = dir.path().join("missing.abc");

    let set = build_char_set(&[real, missing]);
    let expected: BTreeSet<char> = ['a', 'b', 'c'].into_iter().collect();
    assert_eq!(set, expected);
}

#[test]
fn test_persisted_format_escapes_newline() {
    let dir = tempdir().expect("Failed to create temp dir");
    let vocab_path = dir.path().join("vocab_charlevel.txt");

    let set: BTreeSet<char> = "ab\n".chars().collect();
    let vocab = CharVocab::from_chars(&set).unwrap();
    vocab.save(&vocab_path).unwrap();

    let raw = std::fs::read_to_string(&vocab_path).unwrap();
    // One entry per line: escaped newline first (it sorts lowest), then a, b
    assert_eq!(raw, "\\n\na\nb\n");

    let loaded = CharVocab::load(&vocab_path).unwrap();
    assert_eq!(loaded.chars(), &['\n', 'a', 'b']);
    assert_eq!(loaded.id('\n'), Some(0));
}
