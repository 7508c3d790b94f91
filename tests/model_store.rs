use costwise::prelude::*;
use costwise::{Attribute, Error, Schema};

use std::fs;


fn generate<I: Iterator<Item = usize>>(indices: I) -> Dataset {
    let schema = Schema::new(vec![
        Attribute::numeric("x"),
        Attribute::nominal("color", ["red", "blue"]),
        Attribute::nominal("class", ["A", "B"]),
    ]).with_class_index(2).unwrap();

    let rows = indices
        .map(|i| {
            let x = (i as f64 * 0.37).sin() * 10.0;
            let color = (i % 3 == 0) as usize as f64;
            let class = if x + 3.0 * color > 1.0 { 1.0 } else { 0.0 };
            vec![x, color, class]
        })
        .collect();
    Dataset::new(schema, rows).unwrap()
}


fn sample() -> Dataset {
    generate(0..30)
}


/// Examples the models never saw, one of them with a missing value.
fn held_out() -> Dataset {
    let data = generate(30..50);
    let schema = data.schema().clone();
    let mut rows = (0..data.shape().0)
        .map(|r| data.at(r))
        .collect::<Vec<_>>();
    rows[0][0] = f64::NAN;
    Dataset::new(schema, rows).unwrap()
}


fn assert_same_predictions(a: &Model, b: &Model, data: &Dataset) {
    for row in 0..data.shape().0 {
        assert_eq!(a.prediction(data, row), b.prediction(data, row));
    }
}


#[test]
fn round_trip_reproduces_predictions() {
    let dir = tempfile::tempdir().unwrap();
    let data = sample();
    let costs = "0,1;5,0".parse::<CostMatrix>().unwrap();

    let models = vec![
        Algorithm::ZeroRule.fit(&data).unwrap(),
        Algorithm::NaiveBayes(NaiveBayes::init()).fit(&data).unwrap(),
        Algorithm::RandomForest(RandomForest::init().n_trees(7))
            .fit(&data)
            .unwrap(),
        Model::from(
            CostSensitive::new(Algorithm::default(), costs)
                .fit(&data)
                .unwrap()
        ),
    ];

    for (i, model) in models.iter().enumerate() {
        let store = ModelStore::new("TEST.model");
        let path = dir.path().join(format!("model-{i}.model"));
        store.save(model, &path).unwrap();

        let loaded = store.load(&path).unwrap();
        assert_eq!(&loaded, model);
        assert_same_predictions(model, &loaded, &data);
    }
}


#[test]
fn round_trip_on_held_out_set() {
    let dir = tempfile::tempdir().unwrap();
    let train = sample();
    let test = held_out();
    let costs = "0,2;1,0".parse::<CostMatrix>().unwrap();

    let models = vec![
        Algorithm::NaiveBayes(NaiveBayes::init()).fit(&train).unwrap(),
        Algorithm::RandomForest(RandomForest::init().n_trees(9).seed(4))
            .fit(&train)
            .unwrap(),
        Model::from(
            CostSensitive::new(Algorithm::default(), costs)
                .mode(CostMode::Reweight)
                .fit(&train)
                .unwrap()
        ),
    ];

    let store = ModelStore::new("HELDOUT.model");
    for model in models {
        let path = store.resolve(dir.path()).unwrap();
        store.save(&model, &path).unwrap();
        let loaded = store.load(&path).unwrap();

        assert_same_predictions(&model, &loaded, &test);
        assert_eq!(
            evaluate(&model, &test, None).unwrap().confusion(),
            evaluate(&loaded, &test, None).unwrap().confusion(),
        );
    }
}


#[test]
fn save_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let data = sample();
    let store = ModelStore::new("NAIVEBAYES.model");
    let path = dir.path().join("NAIVEBAYES.model");

    let first = Algorithm::ZeroRule.fit(&data).unwrap();
    let second = Algorithm::default().fit(&data).unwrap();
    store.save(&first, &path).unwrap();
    store.save(&second, &path).unwrap();
    assert_eq!(store.load(&path).unwrap(), second);
}


#[test]
fn resolve_existing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = ModelStore::new("NAIVEBAYES.model");

    let path = store.resolve(dir.path()).unwrap();
    assert_eq!(path, dir.path().join("NAIVEBAYES.model"));
}


#[test]
fn resolve_model_file_creates_parents() {
    let dir = tempfile::tempdir().unwrap();
    let store = ModelStore::new("NAIVEBAYES.model");

    let target = dir.path().join("a").join("b").join("out.MODEL");
    let path = store.resolve(&target).unwrap();
    assert_eq!(path, target);
    assert!(dir.path().join("a").join("b").is_dir());
    assert!(!target.exists());
}


#[test]
fn resolve_new_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = ModelStore::new("RANDOMFOREST.model");

    let target = dir.path().join("fresh");
    let path = store.resolve(&target).unwrap();
    assert!(target.is_dir());
    assert_eq!(path, target.join("RANDOMFOREST.model"));
}


#[test]
fn resolve_normalizes_the_target() {
    let dir = tempfile::tempdir().unwrap();
    let store = ModelStore::new("NAIVEBAYES.model");

    let target = dir.path().join("runs").join(".").join("..").join("out");
    let path = store.resolve(&target).unwrap();
    assert!(path.is_absolute());
    assert_eq!(path, dir.path().join("out").join("NAIVEBAYES.model"));
    assert!(dir.path().join("out").is_dir());
    assert!(!dir.path().join("runs").exists());
}


#[test]
fn resolve_custom_extension() {
    let dir = tempfile::tempdir().unwrap();
    let store = ModelStore::new("model.json").extension("json");

    let target = dir.path().join("x.json");
    assert_eq!(store.resolve(&target).unwrap(), target);
}


#[test]
fn resolve_fails_under_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("plain");
    fs::write(&file, "not a directory").unwrap();

    let store = ModelStore::new("NAIVEBAYES.model");
    let err = store.resolve(file.join("nested")).unwrap_err();
    assert!(matches!(err, Error::Persistence { .. }));
}


#[test]
fn load_rejects_foreign_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = ModelStore::new("NAIVEBAYES.model");

    let missing = dir.path().join("missing.model");
    assert!(matches!(store.load(&missing), Err(Error::Persistence { .. })));

    let garbage = dir.path().join("garbage.model");
    fs::write(&garbage, "{ not json").unwrap();
    assert!(matches!(store.load(&garbage), Err(Error::Persistence { .. })));

    let foreign = dir.path().join("foreign.model");
    fs::write(&foreign, r#"{"format": "other", "version": 1, "model": null}"#)
        .unwrap();
    assert!(matches!(store.load(&foreign), Err(Error::Persistence { .. })));
}
