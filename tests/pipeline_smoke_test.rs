//! Pipeline Smoke Test
//!
//! Runs validate -> vocab -> split -> encode end to end over a tiny corpus
//! and checks the artifacts agree with each other.

mod common;

use std::collections::BTreeSet;
use std::path::PathBuf;

use abc_corpus::{
    build_char_set, discover_files, encode_split, partition, read_index, select_within_budget,
    validate_batch, write_index, CharVocab, EncodedView, SplitRatios, TokenPolicy,
};
use tempfile::tempdir;

#[test]
fn test_full_pipeline_on_tiny_corpus() {
    let dir = tempdir().expect("Failed to create temp dir");
    let abc_dir = dir.path().join("abc_raw");
    std::fs::create_dir_all(&abc_dir).unwrap();

    // Ten tunes of 40 chars, one too-short reject, one empty reject
    for i in 0..10 {
        common::create_abc_file(&abc_dir, &format!("tune{:02}.abc", i), 40);
    }
    common::create_abc_file(&abc_dir, "reject_short.abc", 5);
    common::create_abc_with(&abc_dir, "reject_empty.abc", "");

    // Validate
    let raw = discover_files(&abc_dir, &["abc"]);
    assert_eq!(raw.len(), 12);
    let outcome = validate_batch(&raw, 10, 100, TokenPolicy::Chars);
    assert_eq!(outcome.valid.len(), 10);
    assert_eq!(outcome.invalid, 2);

    let clean_index = dir.path().join("abc_clean_index.txt");
    write_index(&clean_index, &outcome.valid).unwrap();

    // Vocabulary over the validated population
    let valid = read_index(&clean_index).unwrap();
    let set = build_char_set(&valid);
    let vocab = CharVocab::from_chars(&set).unwrap();
    let vocab_path = dir.path().join("vocab_charlevel.txt");
    vocab.save(&vocab_path).unwrap();

    // Split: 400 tokens total, 0.8/0.1/0.1 -> 320/40/40
    let entries: Vec<(PathBuf, usize)> = valid
        .iter()
        .map(|p| (p.clone(), TokenPolicy::Chars.count_file(p)))
        .collect();
    let (selected, total) = select_within_budget(&entries, 400);
    assert_eq!(total, 400);

    let ratios = SplitRatios {
        train: 0.8,
        val: 0.1,
        test: 0.1,
    };
    let plan = partition(&selected, total, ratios, 100).unwrap();
    assert_eq!(plan.train.files.len(), 8);
    assert_eq!(plan.val.files.len(), 1);
    assert_eq!(plan.test.files.len(), 1);

    // Encode each split and cross-check token counts against the plan
    let loaded = CharVocab::load(&vocab_path).unwrap();
    let out_dir = dir.path().join("abc_char");
    std::fs::create_dir_all(&out_dir).unwrap();

    for (name, list, expect_tokens) in [
        ("train", &plan.train.files, plan.train.tokens),
        ("val", &plan.val.files, plan.val.tokens),
        ("test", &plan.test.files, plan.test.tokens),
    ] {
        let out_bin = out_dir.join(format!("{}.bin", name));
        let report = encode_split(
            list,
            &loaded,
            &out_bin,
            &out_dir.join("tmp_parts"),
            3,
            16,
        )
        .unwrap();

        // Every character is in the vocabulary, so encoded tokens equal the
        // split's char-policy token count
        assert_eq!(report.tokens, expect_tokens);

        let view = EncodedView::open(&out_bin).unwrap();
        assert_eq!(view.len(), expect_tokens);
    }

    // Decoding the val split reproduces its file contents
    let val_bin = EncodedView::open(&out_dir.join("val.bin")).unwrap();
    let decoded = val_bin.decode(&loaded, 0, val_bin.len());
    let original = std::fs::read_to_string(&plan.val.files[0]).unwrap();
    assert_eq!(decoded, original);

    // The three splits never share a file
    let train_set: BTreeSet<_> = plan.train.files.iter().collect();
    let val_set: BTreeSet<_> = plan.val.files.iter().collect();
    let test_set: BTreeSet<_> = plan.test.files.iter().collect();
    assert!(train_set.is_disjoint(&val_set));
    assert!(train_set.is_disjoint(&test_set));
    assert!(val_set.is_disjoint(&test_set));
}
