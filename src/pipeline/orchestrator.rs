use colored::Colorize;
use log::info;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::{
    evaluate,
    Dataset,
    DatasetReader,
    Learner,
    Report,
    Result,
    Schema,
};
use super::config::PipelineConfig;


/// Wires loading, training, evaluation and persistence for one run.
///
/// # Example
/// ```no_run
/// use costwise::{Pipeline, PipelineConfig, CostMatrix};
///
/// let costs = "0,1;5,0".parse::<CostMatrix>().unwrap();
/// let config = PipelineConfig::default().cost_matrix(costs);
/// let summary = Pipeline::new(config)
///     .run("train.arff", "test.arff", "out/")
///     .unwrap();
/// println!("{summary}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}


/// What a successful [`Pipeline::run`] produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Name of the trained classifier family.
    pub classifier: String,
    /// Where the model was written, as an absolute normalized path.
    pub model_path: PathBuf,
    /// Wall-clock time spent in `fit`.
    pub train_millis: u128,
    /// Evaluation on the test set.
    pub report: Report,
}


impl Pipeline {
    /// A pipeline for `config`.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }


    /// The configuration of this pipeline.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }


    fn load(&self, path: &Path) -> Result<Dataset> {
        let reader = DatasetReader::default().file(path);
        let reader = match self.config.class_attribute.as_deref() {
            Some(name) => reader.target_feature(name),
            None => reader,
        };
        reader.read()
    }


    /// The test set shares the attribute domains of the training set.
    fn load_as(&self, path: &Path, schema: &Schema) -> Result<Dataset> {
        DatasetReader::default()
            .file(path)
            .schema(schema.clone())
            .read()
    }


    /// Train on `train`, evaluate on `test`,
    /// then save the model under `output`.
    ///
    /// The output path is resolved only after training and evaluation
    /// succeed, so a failed run leaves the file system untouched.
    pub fn run<P, Q, R>(&self, train: P, test: Q, output: R)
        -> Result<RunSummary>
        where P: AsRef<Path>,
              Q: AsRef<Path>,
              R: AsRef<Path>,
    {
        let name = self.config.classifier.name().to_string();

        info!("loading training set {}", train.as_ref().display());
        let train = self.load(train.as_ref())?;
        info!("loading test set {}", test.as_ref().display());
        let test = self.load_as(test.as_ref(), train.schema())?;

        if let Some(params) = self.config.classifier.info() {
            for (key, value) in params {
                info!("{name}: {key} = {value}");
            }
        }

        let mut estimator = self.config.estimator();
        let now = Instant::now();
        estimator.fit(&train)?;
        let train_millis = now.elapsed().as_millis();
        info!("{name} trained in {train_millis} ms");

        let costs = self.config.cost_matrix.as_ref();
        let report = evaluate(estimator.model()?, &test, costs)?;
        info!(
            "{name} evaluated on {} examples, accuracy {:.4}",
            report.total(),
            report.accuracy()
        );

        let store = self.config.store();
        let model_path = store.resolve(output)?;
        store.save(estimator.model()?, &model_path)?;

        Ok(RunSummary { classifier: name, model_path, train_millis, report })
    }
}


impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f, "{} {}",
            "Model saved to".bold(),
            self.model_path.display()
        )?;
        writeln!(f, "Training runtime: {} ms", self.train_millis)?;
        writeln!(
            f, "Accuracy on test set: {:.2} %",
            self.report.pct_correct()
        )?;
        if let Some(cost) = self.report.total_cost() {
            writeln!(f, "Total cost: {cost:.2}")?;
        }
        write!(f, "{}", self.report)
    }
}
