use clap::{error::ErrorKind, Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;

use std::path::PathBuf;
use std::process::ExitCode;

use costwise::{
    Algorithm,
    CostMatrix,
    CostMode,
    Error,
    Learner,
    Pipeline,
    PipelineConfig,
    Result,
};


fn cli() -> Command {
    Command::new("costwise")
        .version(clap::crate_version!())
        .about("Train a classifier, evaluate it on a test set \
                and save the trained model")
        .arg(
            Arg::new("train")
                .help("Path to the training set (.arff or .csv)")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("test")
                .help("Path to the test set (.arff or .csv)")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("output")
                .help(
                    "Directory to write the model into, \
                     or a file path ending in .model",
                )
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::AnyPath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help(
                    "JSON pipeline configuration. \
                     The other options override its values.",
                )
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("classifier")
                .short('c')
                .long("classifier")
                .help("Classifier family to train")
                .value_parser(["zero-rule", "naive-bayes", "random-forest"]),
        )
        .arg(
            Arg::new("cost_matrix")
                .long("cost-matrix")
                .help(
                    "Misclassification costs cost[true][predicted], \
                     rows separated by ';', e.g. \"0,1;5,0\"",
                )
                .value_parser(|s: &str| s.parse::<CostMatrix>()),
        )
        .arg(
            Arg::new("cost_mode")
                .long("cost-mode")
                .help("How the cost matrix is applied")
                .value_parser(["expected-cost", "reweight"]),
        )
        .arg(
            Arg::new("class_attribute")
                .long("class-attribute")
                .help("Name of the class attribute. Default is the last one.")
                .value_parser(clap::builder::NonEmptyStringValueParser::new()),
        )
        .arg(
            Arg::new("trees")
                .long("trees")
                .help("Number of trees of the random forest")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Random seed of the random forest")
                .value_parser(clap::value_parser!(u64)),
        )
}


/// Build the run configuration: the config file first, then the flags.
fn config(matches: &ArgMatches) -> Result<PipelineConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(name) = matches.get_one::<String>("classifier") {
        config.classifier = name.parse::<Algorithm>()?;
    }
    if let Some(costs) = matches.get_one::<CostMatrix>("cost_matrix") {
        config.cost_matrix = Some(costs.clone());
    }
    if let Some(mode) = matches.get_one::<String>("cost_mode") {
        if config.cost_matrix.is_none() {
            return Err(Error::Argument(
                "--cost-mode needs a cost matrix".into()
            ));
        }
        config.cost_mode = match mode.as_str() {
            "reweight" => CostMode::Reweight,
            _ => CostMode::MinimizeExpectedCost,
        };
    }
    if let Some(name) = matches.get_one::<String>("class_attribute") {
        config.class_attribute = Some(name.clone());
    }

    let trees = matches.get_one::<u64>("trees").copied();
    let seed = matches.get_one::<u64>("seed").copied();
    if trees.is_some() || seed.is_some() {
        let Algorithm::RandomForest(forest) = &mut config.classifier else {
            return Err(Error::Argument(
                "--trees and --seed only apply to the random forest".into()
            ));
        };
        if let Some(n) = trees {
            *forest = forest.n_trees(n as usize);
        }
        if let Some(seed) = seed {
            *forest = forest.seed(seed);
        }
    }
    Ok(config)
}


fn main() -> ExitCode {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(
            env_logger::Env::default()
                .filter_or("COSTWISE_LOG", "error,costwise=info")
        )
        .init();

    let matches = match cli().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    ExitCode::SUCCESS
                },
                _ => ExitCode::from(1),
            };
        },
    };

    let config = match config(&matches) {
        Ok(config) => config,
        Err(e @ Error::Argument(_)) => {
            eprintln!("{e}");
            eprintln!("{}", cli().render_usage());
            return ExitCode::from(1);
        },
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        },
    };

    // Required arguments are present once parsing succeeded.
    let path = |id: &str| {
        matches.get_one::<PathBuf>(id).cloned().unwrap_or_default()
    };
    let (train, test, output) = (path("train"), path("test"), path("output"));

    let name = config.classifier.name().to_string();
    match Pipeline::new(config).run(&train, &test, &output) {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("Failed to build {name} model: {e}");
            ExitCode::from(2)
        },
    }
}
