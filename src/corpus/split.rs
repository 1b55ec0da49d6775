//! Disjoint train/val/test split construction under a total token budget.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::SplitRatios;
use crate::error::{CorpusError, Result};

const RATIO_TOLERANCE: f64 = 1e-9;

/// One split's file list and accumulated token count.
#[derive(Debug, Default)]
pub struct SplitList {
    pub files: Vec<PathBuf>,
    pub tokens: usize,
}

/// The three disjoint splits plus the targets they were built against.
#[derive(Debug)]
pub struct SplitPlan {
    pub train: SplitList,
    pub val: SplitList,
    pub test: SplitList,
    pub train_target: usize,
    pub val_target: usize,
    pub test_target: usize,
    pub selected_tokens: usize,
}

/// Single forward pass selecting a prefix of `entries` whose cumulative
/// token count stays within `budget`. A file that would overshoot is
/// skipped, not deferred; the pass stops the moment the budget is met.
pub fn select_within_budget(
    entries: &[(PathBuf, usize)],
    budget: usize,
) -> (Vec<(PathBuf, usize)>, usize) {
    let mut selected = Vec::new();
    let mut total = 0usize;

    for (path, tok) in entries {
        if *tok == 0 {
            continue;
        }
        if total + tok > budget {
            continue;
        }

        selected.push((path.clone(), *tok));
        total += tok;

        if total >= budget {
            break;
        }
    }

    (selected, total)
}

/// Partition the selected files into train/val/test by token targets.
///
/// Targets: `train = floor(total * r_train)`, `val = floor(total * r_val)`,
/// `test = total - train - val` -- the three always sum exactly to the
/// selected total despite integer truncation. The walk assigns files in
/// order, advancing to the next split the moment the current one's running
/// count meets its target; everything after the val target is met lands in
/// test, overshoot and all.
///
/// Fatal (nothing written by callers): empty selection, ratios not summing
/// to 1.0, train target below `min_train_tokens`, or overlap between the
/// resulting sets.
pub fn partition(
    selected: &[(PathBuf, usize)],
    selected_tokens: usize,
    ratios: SplitRatios,
    min_train_tokens: usize,
) -> Result<SplitPlan> {
    if selected.is_empty() {
        return Err(CorpusError::NoFilesSelected);
    }

    let sum = ratios.sum();
    if (sum - 1.0).abs() > RATIO_TOLERANCE {
        return Err(CorpusError::RatioSum { sum });
    }

    let train_target = (selected_tokens as f64 * ratios.train) as usize;
    let val_target = (selected_tokens as f64 * ratios.val) as usize;
    let test_target = selected_tokens - train_target - val_target;

    if train_target < min_train_tokens {
        return Err(CorpusError::TrainBelowFloor {
            target: train_target,
            floor: min_train_tokens,
        });
    }

    let mut train = SplitList::default();
    let mut val = SplitList::default();
    let mut test = SplitList::default();

    #[derive(PartialEq)]
    enum Phase {
        Train,
        Val,
        Test,
    }
    let mut phase = Phase::Train;

    for (path, tok) in selected {
        match phase {
            Phase::Train => {
                train.files.push(path.clone());
                train.tokens += tok;
                if train.tokens >= train_target {
                    phase = Phase::Val;
                }
            }
            Phase::Val => {
                val.files.push(path.clone());
                val.tokens += tok;
                if val.tokens >= val_target {
                    phase = Phase::Test;
                }
            }
            Phase::Test => {
                test.files.push(path.clone());
                test.tokens += tok;
            }
        }
    }

    check_disjoint(&train, &val, &test)?;

    Ok(SplitPlan {
        train,
        val,
        test,
        train_target,
        val_target,
        test_target,
        selected_tokens,
    })
}

/// Sanity assertion: the single forward pass assigns each entry to exactly
/// one split, so overlap can only come from duplicate paths in the input.
fn check_disjoint(train: &SplitList, val: &SplitList, test: &SplitList) -> Result<()> {
    let train_set: HashSet<&Path> = train.files.iter().map(PathBuf::as_path).collect();
    let val_set: HashSet<&Path> = val.files.iter().map(PathBuf::as_path).collect();
    let test_set: HashSet<&Path> = test.files.iter().map(PathBuf::as_path).collect();

    if train_set.intersection(&val_set).next().is_some() {
        return Err(CorpusError::SplitOverlap {
            a: "train",
            b: "val",
        });
    }
    if train_set.intersection(&test_set).next().is_some() {
        return Err(CorpusError::SplitOverlap {
            a: "train",
            b: "test",
        });
    }
    if val_set.intersection(&test_set).next().is_some() {
        return Err(CorpusError::SplitOverlap { a: "val", b: "test" });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(counts: &[usize]) -> Vec<(PathBuf, usize)> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &c)| (PathBuf::from(format!("f{}.abc", i)), c))
            .collect()
    }

    #[test]
    fn test_budget_selection_skips_overshooting_files() {
        let e = entries(&[60, 50, 30]);
        // 60 fits, 50 would overshoot 100 and is skipped, 30 fits
        let (selected, total) = select_within_budget(&e, 100);
        assert_eq!(total, 90);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[1].0, PathBuf::from("f2.abc"));
    }

    #[test]
    fn test_budget_selection_stops_once_met() {
        let e = entries(&[50, 50, 10]);
        let (selected, total) = select_within_budget(&e, 100);
        assert_eq!(total, 100);
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_targets_sum_exactly_despite_truncation() {
        let e = entries(&[34, 33, 33]);
        let ratios = SplitRatios {
            train: 0.5,
            val: 0.25,
            test: 0.25,
        };
        let plan = partition(&e, 100, ratios, 0).unwrap();
        assert_eq!(
            plan.train_target + plan.val_target + plan.test_target,
            plan.selected_tokens
        );
    }
}
