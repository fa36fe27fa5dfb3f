//! Integration tests for the bundled splitting strategies.

use xval_evaluation::data_handling::{Dataset, Labels};
use xval_evaluation::error::SplitError;
use xval_evaluation::splitting::{
    Bootstrap, KFold, LeaveOneOut, PartitionPlan, SplittingStrategy, StratifiedKFold,
};

fn labels_only(n: usize) -> Dataset {
    Dataset::labels_only(Labels::from_vec((0..n).map(|i| i as f64).collect()))
}

fn assert_disjoint_within_folds(plan: &PartitionPlan) {
    for fold in plan {
        for idx in &fold.test {
            assert!(!fold.train.contains(idx), "index {idx} in train and test");
        }
    }
}

// ---------------------------------------------------------------------------
// K-fold
// ---------------------------------------------------------------------------

#[test]
fn kfold_covers_every_example_once() {
    let data = labels_only(23);
    let mut split = KFold::with_seed(5, 4);
    let plan = split.build_subsets(&data).unwrap();

    assert_eq!(plan.len(), 5);
    assert!(plan.covers_exactly_once(23));
    assert_disjoint_within_folds(&plan);
    let sizes: Vec<usize> = plan.iter().map(|f| f.test.len()).collect();
    assert_eq!(sizes, vec![5, 5, 5, 4, 4]);
}

#[test]
fn kfold_same_seed_same_plans() {
    let data = labels_only(30);
    let mut a = KFold::with_seed(3, 17);
    let mut b = KFold::with_seed(3, 17);
    for _ in 0..3 {
        let pa = a.build_subsets(&data).unwrap();
        let pb = b.build_subsets(&data).unwrap();
        for (fa, fb) in pa.iter().zip(pb.iter()) {
            assert_eq!(fa.test, fb.test);
        }
    }
}

#[test]
fn kfold_successive_plans_differ() {
    let data = labels_only(30);
    let mut split = KFold::with_seed(3, 17);
    let first = split.build_subsets(&data).unwrap();
    let second = split.build_subsets(&data).unwrap();
    assert!(first.iter().zip(second.iter()).any(|(a, b)| a.test != b.test));
}

#[test]
fn kfold_rejects_more_folds_than_examples() {
    let mut split = KFold::new(10);
    let err = split.build_subsets(&labels_only(4)).unwrap_err();
    assert!(matches!(err, SplitError::TooFewExamples { needed: 10, available: 4, .. }));
}

// ---------------------------------------------------------------------------
// Stratified k-fold
// ---------------------------------------------------------------------------

#[test]
fn stratified_keeps_class_proportions() {
    // 12 of class 0, 6 of class 1.
    let y: Vec<f64> = (0..18).map(|i| if i % 3 == 0 { 1.0 } else { 0.0 }).collect();
    let data = Dataset::labels_only(Labels::from_vec(y.clone()));
    let mut split = StratifiedKFold::with_seed(3, 5);
    let plan = split.build_subsets(&data).unwrap();

    assert!(plan.covers_exactly_once(18));
    assert_disjoint_within_folds(&plan);
    for fold in &plan {
        let positives = fold.test.iter().filter(|&&i| y[i] == 1.0).count();
        assert_eq!(fold.test.len(), 6);
        assert_eq!(positives, 2);
    }
}

// ---------------------------------------------------------------------------
// Leave-one-out and bootstrap
// ---------------------------------------------------------------------------

#[test]
fn leave_one_out_tests_each_example_alone() {
    let mut split = LeaveOneOut::new(6);
    let plan = split.build_subsets(&labels_only(6)).unwrap();
    assert_eq!(plan.len(), 6);
    for (i, fold) in plan.iter().enumerate() {
        assert_eq!(fold.test, vec![i]);
        assert_eq!(fold.train.len(), 5);
    }
    assert!(split.check(7).is_err());
}

#[test]
fn bootstrap_tests_out_of_bag() {
    let mut split = Bootstrap::with_seed(8, 21);
    let plan = split.build_subsets(&labels_only(30)).unwrap();
    assert_eq!(plan.len(), 8);
    assert!(plan.check_bounds(30).is_ok());
    assert_disjoint_within_folds(&plan);
    for fold in &plan {
        assert_eq!(fold.train.len(), 30);
        assert!(!fold.test.is_empty());
    }
}
