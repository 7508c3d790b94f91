use costwise::prelude::*;
use costwise::{Attribute, Error, Schema};


fn sample() -> Dataset {
    let schema = Schema::new(vec![
        Attribute::numeric("x"),
        Attribute::nominal("class", ["A", "B"]),
    ]).with_class_index(1).unwrap();
    let rows = (0..10)
        .map(|i| vec![i as f64, if i < 6 { 0.0 } else { 1.0 }])
        .collect();
    Dataset::new(schema, rows).unwrap()
}


#[test]
fn predict_before_fit_fails() {
    let data = sample();
    let estimator = Estimator::new(Algorithm::default());

    assert!(!estimator.is_fitted());
    assert!(matches!(estimator.predict(&data, 0), Err(Error::NotFitted)));
    assert!(matches!(estimator.model(), Err(Error::NotFitted)));
    assert!(matches!(estimator.into_model(), Err(Error::NotFitted)));
}


#[test]
fn fit_then_predict() {
    let data = sample();
    let mut estimator = Estimator::new(Algorithm::ZeroRule);
    estimator.fit(&data).unwrap();

    assert!(estimator.is_fitted());
    let prediction = estimator.predict(&data, 9).unwrap();
    assert_eq!(prediction.label, 0);
    let p = prediction.distribution.unwrap();
    assert!((p[0] - 0.6).abs() < 1e-9);
    assert!((p[1] - 0.4).abs() < 1e-9);
}


#[test]
fn cost_sensitive_estimator() {
    let data = sample();
    let costs = "0,1;5,0".parse::<CostMatrix>().unwrap();
    let mut estimator = Estimator::new(Algorithm::ZeroRule)
        .cost_sensitive(costs, CostMode::MinimizeExpectedCost);
    estimator.fit(&data).unwrap();

    assert_eq!(estimator.predict(&data, 0).unwrap().label, 1);
    assert!(matches!(estimator.model().unwrap(), Model::CostSensitive(_)));
}


#[test]
fn failed_fit_keeps_the_estimator_unfitted() {
    let schema = Schema::new(vec![
        Attribute::numeric("x"),
        Attribute::nominal("class", ["A", "B"]),
    ]).with_class_index(1).unwrap();
    let rows = vec![vec![1.0, f64::NAN], vec![2.0, f64::NAN]];
    let unlabeled = Dataset::new(schema, rows).unwrap();

    let mut estimator = Estimator::new(Algorithm::default());
    let err = estimator.fit(&unlabeled).unwrap_err();
    assert!(matches!(err, Error::InsufficientData(_)));
    assert!(!estimator.is_fitted());
}


#[test]
fn algorithm_names() {
    assert_eq!("zero-rule".parse::<Algorithm>().unwrap(), Algorithm::ZeroRule);
    assert_eq!(
        "random_forest".parse::<Algorithm>().unwrap().default_file_name(),
        "RANDOMFOREST.model"
    );
    assert!(matches!("svm".parse::<Algorithm>(), Err(Error::Argument(_))));
}
