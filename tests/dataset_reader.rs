use costwise::{AttributeKind, DatasetReader, Error, Format};

use std::fs;
use std::path::{Path, PathBuf};


const WEATHER: &str = "\
% The classic weather data.
@relation weather

@attribute outlook {sunny, overcast, rainy}
@attribute temperature numeric
@attribute 'wind speed' real
@attribute play {yes, no}

@data
sunny,85,3.5,no
overcast,?,1,yes
% a comment inside the data
'rainy',70,2,yes
sunny,72,?,?
";


fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}


#[test]
fn reads_arff() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "weather.arff", WEATHER);

    let data = DatasetReader::default().file(&path).read().unwrap();
    assert_eq!(data.shape(), (4, 4));

    let schema = data.schema();
    assert_eq!(schema.class_index(), Some(3));
    assert_eq!(schema.class_values().unwrap(), &["yes", "no"]);
    assert_eq!(schema.attributes()[2].name(), "wind speed");
    assert_eq!(schema.attributes()[1].kind(), &AttributeKind::Numeric);

    assert_eq!(data.value(0, 0), 0.0);
    assert_eq!(data.value(2, 0), 2.0);
    assert!(data.value(1, 1).is_nan());
    assert_eq!(data.label(0), Some(1));
    assert_eq!(data.label(3), None);
    assert_eq!(data.labeled_rows().unwrap(), vec![0, 1, 2]);
    assert_eq!(data.class_counts().unwrap(), vec![2, 1]);
}


#[test]
fn reads_arff_with_named_class() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "weather.arff", WEATHER);

    let data = DatasetReader::default()
        .file(&path)
        .target_feature("outlook")
        .read()
        .unwrap();
    assert_eq!(data.schema().class_index(), Some(0));
    assert_eq!(data.n_classes().unwrap(), 3);
}


#[test]
fn reads_csv() {
    let dir = tempfile::tempdir().unwrap();
    let csv = "x,color,class\n\
               1.5,red,1\n\
               2.5,blue,0\n\
               ?,red,1\n";
    let path = write(dir.path(), "train.csv", csv);

    let data = DatasetReader::default().file(&path).read().unwrap();
    assert_eq!(data.shape(), (3, 3));

    let schema = data.schema();
    assert_eq!(schema.attributes()[0].kind(), &AttributeKind::Numeric);
    assert_eq!(
        schema.attributes()[1].values().unwrap(),
        &["blue".to_string(), "red".to_string()]
    );
    assert_eq!(schema.class_values().unwrap(), &["0", "1"]);
    assert!(data.value(2, 0).is_nan());
    assert_eq!(data.label(0), Some(1));
}


#[test]
fn explicit_format_overrides_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "weather.txt", WEATHER);

    let err = DatasetReader::default().file(&path).read().unwrap_err();
    assert!(matches!(err, Error::DatasetLoad { .. }));

    let data = DatasetReader::default()
        .file(&path)
        .format(Format::Arff)
        .read()
        .unwrap();
    assert_eq!(data.shape(), (4, 4));
}


#[test]
fn load_failures() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.arff");
    let err = DatasetReader::default().file(&missing).read().unwrap_err();
    assert!(matches!(err, Error::DatasetLoad { .. }));

    let sparse = write(
        dir.path(),
        "sparse.arff",
        "@relation r\n@attribute a numeric\n@attribute c {x,y}\n\
         @data\n{0 1, 1 x}\n",
    );
    let err = DatasetReader::default().file(&sparse).read().unwrap_err();
    assert!(matches!(err, Error::DatasetLoad { .. }));

    let strings = write(
        dir.path(),
        "strings.arff",
        "@relation r\n@attribute a string\n@attribute c {x,y}\n\
         @data\nfoo,x\n",
    );
    let err = DatasetReader::default().file(&strings).read().unwrap_err();
    assert!(matches!(err, Error::DatasetLoad { .. }));

    let ragged = write(
        dir.path(),
        "ragged.arff",
        "@relation r\n@attribute a numeric\n@attribute c {x,y}\n\
         @data\n1,x,3\n",
    );
    let err = DatasetReader::default().file(&ragged).read().unwrap_err();
    assert!(matches!(err, Error::DatasetLoad { .. }));

    let undeclared = write(
        dir.path(),
        "undeclared.arff",
        "@relation r\n@attribute a numeric\n@attribute c {x,y}\n\
         @data\n1,z\n",
    );
    let err = DatasetReader::default().file(&undeclared).read().unwrap_err();
    assert!(matches!(err, Error::DatasetLoad { .. }));

    let path = write(dir.path(), "weather.arff", WEATHER);
    let err = DatasetReader::default()
        .file(&path)
        .target_feature("humidity")
        .read()
        .unwrap_err();
    assert!(matches!(err, Error::DatasetLoad { .. }));
}


#[test]
fn csv_test_set_reads_against_training_schema() {
    let dir = tempfile::tempdir().unwrap();
    let train = write(
        dir.path(),
        "train.csv",
        "x,color,class\n\
         1.0,red,no\n\
         2.0,green,yes\n\
         3.0,blue,yes\n",
    );
    let test = write(
        dir.path(),
        "test.csv",
        "x,color,class\n\
         4.0,red,no\n\
         5.0,?,no\n",
    );
    let train = DatasetReader::default().file(&train).read().unwrap();

    let inferred = DatasetReader::default().file(&test).read().unwrap();
    assert!(train.schema().check_compatible(inferred.schema()).is_err());

    let data = DatasetReader::default()
        .file(&test)
        .schema(train.schema().clone())
        .read()
        .unwrap();
    assert_eq!(data.schema(), train.schema());
    assert_eq!(data.schema().class_values().unwrap(), &["no", "yes"]);
    assert_eq!(data.value(0, 1), 2.0);
    assert!(data.value(1, 1).is_nan());
    assert_eq!(data.label(0), Some(0));
    assert_eq!(data.class_counts().unwrap(), vec![2, 0]);
}


#[test]
fn arff_test_set_is_remapped_by_value_name() {
    let dir = tempfile::tempdir().unwrap();
    let train = write(dir.path(), "weather.arff", WEATHER);
    let test = write(
        dir.path(),
        "test.arff",
        "@relation weather-test\n\
         @attribute outlook {foggy, rainy, sunny}\n\
         @attribute temperature numeric\n\
         @attribute 'wind speed' numeric\n\
         @attribute play {no, yes}\n\
         @data\n\
         rainy,60,1,no\n\
         sunny,80,2,yes\n",
    );
    let train = DatasetReader::default().file(&train).read().unwrap();

    let data = DatasetReader::default()
        .file(&test)
        .schema(train.schema().clone())
        .read()
        .unwrap();
    assert_eq!(data.schema(), train.schema());
    assert_eq!(data.value(0, 0), 2.0);
    assert_eq!(data.value(1, 0), 0.0);
    assert_eq!(data.label(0), Some(1));
    assert_eq!(data.label(1), Some(0));
}


#[test]
fn values_outside_the_training_schema_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let train = write(dir.path(), "weather.arff", WEATHER);
    let schema = DatasetReader::default()
        .file(&train)
        .read()
        .unwrap()
        .schema()
        .clone();
    let read_as = |path: &Path| {
        DatasetReader::default()
            .file(path)
            .schema(schema.clone())
            .read()
    };

    let foggy = write(
        dir.path(),
        "foggy.arff",
        "@relation w\n\
         @attribute outlook {sunny, foggy}\n\
         @attribute temperature numeric\n\
         @attribute wind numeric\n\
         @attribute play {yes, no}\n\
         @data\nfoggy,60,1,no\n",
    );
    assert!(matches!(read_as(&foggy), Err(Error::DatasetLoad { .. })));

    let short = write(
        dir.path(),
        "short.arff",
        "@relation w\n\
         @attribute outlook {sunny}\n\
         @attribute play {yes, no}\n\
         @data\nsunny,no\n",
    );
    assert!(matches!(read_as(&short), Err(Error::SchemaMismatch(_))));

    let numeric = write(
        dir.path(),
        "numeric.arff",
        "@relation w\n\
         @attribute outlook numeric\n\
         @attribute temperature numeric\n\
         @attribute wind numeric\n\
         @attribute play {yes, no}\n\
         @data\n1,60,1,no\n",
    );
    assert!(matches!(read_as(&numeric), Err(Error::SchemaMismatch(_))));

    let unseen = write(
        dir.path(),
        "unseen.csv",
        "outlook,temperature,wind,play\nsunny,60,1,maybe\n",
    );
    assert!(matches!(read_as(&unseen), Err(Error::DatasetLoad { .. })));

    let narrow = write(dir.path(), "narrow.csv", "outlook,play\nsunny,no\n");
    assert!(matches!(read_as(&narrow), Err(Error::SchemaMismatch(_))));
}
