use costwise::prelude::*;
use costwise::{Attribute, Error, Schema};


fn schema() -> Schema {
    Schema::new(vec![
        Attribute::numeric("x"),
        Attribute::nominal("class", ["A", "B"]),
    ]).with_class_index(1).unwrap()
}


/// 6 examples of `A` below 6, 4 of `B` above.
fn sample() -> Dataset {
    let rows = (0..10)
        .map(|i| vec![i as f64, if i < 6 { 0.0 } else { 1.0 }])
        .collect();
    Dataset::new(schema(), rows).unwrap()
}


#[test]
fn majority_baseline_report() {
    let data = sample();
    let model = ZeroRule::init().fit(&data).unwrap();
    let costs = "0,1;5,0".parse::<CostMatrix>().unwrap();

    let report = evaluate(&model, &data, Some(&costs)).unwrap();

    let rows = report.confusion().rows().to_vec();
    assert_eq!(rows, vec![vec![6, 0], vec![4, 0]]);
    assert!((report.accuracy() - 0.6).abs() < 1e-12);
    assert!((report.precision(0) - 0.6).abs() < 1e-12);
    assert!((report.recall(0) - 1.0).abs() < 1e-12);
    assert_eq!(report.precision(1), 0.0);
    assert_eq!(report.recall(1), 0.0);
    assert_eq!(report.f_measure(1), 0.0);
    assert_eq!(report.correct(), 6);
    assert_eq!(report.incorrect(), 4);
    assert_eq!(report.total_cost(), Some(20.0));
    assert_eq!(report.average_cost(), Some(2.0));
    assert_eq!(report.kappa(), 0.0);
}


#[test]
fn row_sums_match_class_counts() {
    let data = sample();
    let model = NaiveBayes::init().fit(&data).unwrap();
    let report = evaluate(&model, &data, None).unwrap();

    let counts = data.class_counts().unwrap();
    for (c, &n) in counts.iter().enumerate() {
        assert_eq!(report.confusion().row_sum(c), n);
    }
    assert_eq!(report.total(), 10);
    assert_eq!(report.total_cost(), None);
}


#[test]
fn unlabeled_examples_are_skipped() {
    let data = sample();
    let model = ZeroRule::init().fit(&data).unwrap();

    let rows = vec![vec![1.0, 0.0], vec![2.0, f64::NAN], vec![8.0, 1.0]];
    let test = Dataset::new(schema(), rows).unwrap();
    let report = evaluate(&model, &test, None).unwrap();
    assert_eq!(report.total(), 2);
}


#[test]
fn empty_test_set() {
    let data = sample();
    let model = ZeroRule::init().fit(&data).unwrap();

    let empty = Dataset::new(schema(), Vec::new()).unwrap();
    let report = evaluate(&model, &empty, None).unwrap();
    assert_eq!(report.total(), 0);
    assert_eq!(report.accuracy(), 0.0);
    assert_eq!(report.precision(0), 0.0);
    assert_eq!(report.recall(0), 0.0);
}


#[test]
fn evaluate_is_idempotent() {
    let data = sample();
    let model = RandomForest::init().n_trees(5).fit(&data).unwrap();
    let costs = "0,1;5,0".parse::<CostMatrix>().unwrap();

    let first = evaluate(&model, &data, Some(&costs)).unwrap();
    let second = evaluate(&model, &data, Some(&costs)).unwrap();
    assert_eq!(first, second);
}


#[test]
fn schema_mismatch_is_rejected() {
    let data = sample();
    let model = ZeroRule::init().fit(&data).unwrap();

    let other = Schema::new(vec![
        Attribute::numeric("x"),
        Attribute::numeric("y"),
        Attribute::nominal("class", ["A", "B"]),
    ]).with_class_index(2).unwrap();
    let test = Dataset::new(other, vec![vec![0.0, 0.0, 0.0]]).unwrap();
    let err = evaluate(&model, &test, None).unwrap_err();
    assert!(matches!(err, Error::SchemaMismatch(_)));

    let relabeled = Schema::new(vec![
        Attribute::numeric("x"),
        Attribute::nominal("class", ["A", "B", "C"]),
    ]).with_class_index(1).unwrap();
    let test = Dataset::new(relabeled, vec![vec![0.0, 2.0]]).unwrap();
    let err = evaluate(&model, &test, None).unwrap_err();
    assert!(matches!(err, Error::SchemaMismatch(_)));
}


#[test]
fn cost_matrix_size_is_checked() {
    let data = sample();
    let model = ZeroRule::init().fit(&data).unwrap();
    let costs = CostMatrix::zero_one(3);
    let err = evaluate(&model, &data, Some(&costs)).unwrap_err();
    assert!(matches!(err, Error::InvalidCostMatrix(_)));
}


#[test]
fn report_renders_confusion_matrix() {
    let data = sample();
    let model = ZeroRule::init().fit(&data).unwrap();
    let report = evaluate(&model, &data, None).unwrap();

    let text = report.to_string();
    assert!(text.contains("<-- classified as"));
    assert!(text.contains("a = A"));
    assert!(text.contains("Weighted Avg."));
    assert!(text.contains("Correctly Classified Instances"));
}
