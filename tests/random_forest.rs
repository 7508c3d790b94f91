use costwise::prelude::*;
use costwise::{Attribute, Schema};


/// Two well separated clusters on `x`; `z` is noise.
fn clusters() -> Dataset {
    let schema = Schema::new(vec![
        Attribute::numeric("x"),
        Attribute::numeric("z"),
        Attribute::nominal("class", ["low", "high"]),
    ]).with_class_index(2).unwrap();

    let rows = (0..20)
        .map(|i| {
            let high = i % 2 == 1;
            let x = if high { 10.0 + i as f64 * 0.1 } else { i as f64 * 0.1 };
            let z = ((i * 7) % 5) as f64;
            vec![x, z, if high { 1.0 } else { 0.0 }]
        })
        .collect::<Vec<_>>();
    Dataset::new(schema, rows).unwrap()
}


#[test]
fn forest_separates_clusters() {
    let sample = clusters();
    let forest = RandomForest::init()
        .n_trees(10)
        .max_features(2)
        .seed(7)
        .fit(&sample)
        .unwrap();

    assert_eq!(forest.trees().len(), 10);

    let expected = (0..20).map(|i| i % 2).collect::<Vec<usize>>();
    assert_eq!(forest.predict_all(&sample), expected);

    let p = forest.distribution(&sample, 0).unwrap();
    assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-9);
}


#[test]
fn forest_is_deterministic_per_seed() {
    let sample = clusters();
    let learner = RandomForest::init().n_trees(8).seed(42);

    let f = learner.fit(&sample).unwrap();
    let g = learner.fit(&sample).unwrap();
    assert_eq!(f, g);
}


#[test]
fn single_class_training_set() {
    let schema = Schema::new(vec![
        Attribute::numeric("x"),
        Attribute::nominal("class", ["a", "b"]),
    ]).with_class_index(1).unwrap();
    let rows = vec![vec![1.0, 1.0], vec![2.0, 1.0], vec![3.0, 1.0]];
    let sample = Dataset::new(schema, rows).unwrap();

    let forest = RandomForest::init().n_trees(3).fit(&sample).unwrap();
    assert_eq!(forest.predict_all(&sample), vec![1, 1, 1]);
}


#[test]
fn tree_respects_max_depth() {
    let sample = clusters();
    let tree = DTree::init()
        .max_depth(1)
        .criterion(Criterion::Entropy)
        .fit(&sample)
        .unwrap();

    assert!(tree.root().depth() <= 1);
    let expected = (0..20).map(|i| i % 2).collect::<Vec<usize>>();
    assert_eq!(tree.predict_all(&sample), expected);
}


#[test]
fn missing_labels_are_ignored() {
    let schema = Schema::new(vec![
        Attribute::numeric("x"),
        Attribute::nominal("class", ["a", "b"]),
    ]).with_class_index(1).unwrap();
    let rows = vec![
        vec![0.0, 0.0],
        vec![0.5, 0.0],
        vec![9.0, 1.0],
        vec![9.5, 1.0],
        vec![5.0, f64::NAN],
    ];
    let sample = Dataset::new(schema, rows).unwrap();
    let tree = DTree::init().fit(&sample).unwrap();
    assert_eq!(tree.predict(&sample, 0), 0);
    assert_eq!(tree.predict(&sample, 3), 1);
}


#[test]
fn zero_trees_is_a_config_error() {
    let sample = clusters();
    let forest: RandomForest = serde_json::from_str(r#"{ "n_trees": 0 }"#)
        .unwrap();

    let err = forest.fit(&sample).unwrap_err();
    assert!(matches!(err, costwise::Error::Config(_)));

    let depth: RandomForest = serde_json::from_str(r#"{ "max_depth": 0 }"#)
        .unwrap();
    let err = depth.fit(&sample).unwrap_err();
    assert!(matches!(err, costwise::Error::Config(_)));
}
