use serde::{Serialize, Deserialize};

use std::fs;
use std::path::Path;

use crate::{
    Algorithm,
    CostMatrix,
    CostMode,
    Error,
    Estimator,
    ModelStore,
    Result,
};


/// Everything a [`Pipeline`](super::Pipeline) run needs
/// besides the three paths.
///
/// Read from JSON; every field is optional:
/// ```json
/// {
///     "classifier": { "type": "random_forest", "n_trees": 50, "seed": 7 },
///     "cost_matrix": [[0.0, 1.0], [5.0, 0.0]],
///     "cost_mode": "reweight",
///     "class_attribute": "class"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// The learning algorithm and its hyper-parameters.
    pub classifier: Algorithm,
    /// Misclassification costs; `None` for a cost-blind run.
    pub cost_matrix: Option<CostMatrix>,
    /// How `cost_matrix` is applied.
    pub cost_mode: CostMode,
    /// Overrides the per-classifier default model file name.
    pub model_file_name: Option<String>,
    /// The class attribute; the last attribute if `None`.
    pub class_attribute: Option<String>,
}


impl PipelineConfig {
    /// Parse a configuration from a JSON string
    /// and check the hyper-parameters it sets.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::Config(e.to_string()))?;
        config.classifier.validate()?;
        Ok(config)
    }


    /// Read a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }


    /// Set the learning algorithm.
    pub fn classifier(mut self, classifier: Algorithm) -> Self {
        self.classifier = classifier;
        self
    }


    /// Set the cost matrix.
    pub fn cost_matrix(mut self, costs: CostMatrix) -> Self {
        self.cost_matrix = Some(costs);
        self
    }


    /// Set how the cost matrix is applied.
    pub fn cost_mode(mut self, mode: CostMode) -> Self {
        self.cost_mode = mode;
        self
    }


    /// Set the model file name used inside output directories.
    pub fn model_file_name<S: Into<String>>(mut self, name: S) -> Self {
        self.model_file_name = Some(name.into());
        self
    }


    /// Set the class attribute by name.
    pub fn class_attribute<S: Into<String>>(mut self, name: S) -> Self {
        self.class_attribute = Some(name.into());
        self
    }


    /// An unfitted estimator for this configuration.
    pub fn estimator(&self) -> Estimator {
        let estimator = Estimator::new(self.classifier.clone());
        match &self.cost_matrix {
            Some(costs) => estimator.cost_sensitive(costs.clone(), self.cost_mode),
            None => estimator,
        }
    }


    /// The store trained models are written to.
    pub fn store(&self) -> ModelStore {
        let name = self.model_file_name.as_deref()
            .unwrap_or_else(|| self.classifier.default_file_name());
        ModelStore::new(name)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::learner::RandomForest;

    #[test]
    fn empty_object_gives_defaults() {
        let config = PipelineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.store().file_name(), "NAIVEBAYES.model");
    }


    #[test]
    fn partial_hyper_parameters() {
        let json = r#"{
            "classifier": { "type": "random_forest", "n_trees": 5 },
            "cost_matrix": [[0, 1], [5, 0]],
            "cost_mode": "reweight"
        }"#;
        let config = PipelineConfig::from_json_str(json).unwrap();
        assert_eq!(
            config.classifier,
            Algorithm::RandomForest(RandomForest::init().n_trees(5))
        );
        assert_eq!(config.cost_mode, CostMode::Reweight);
        assert_eq!(config.cost_matrix.as_ref().unwrap().get(1, 0), 5.0);
        assert_eq!(config.store().file_name(), "RANDOMFOREST.model");
    }


    #[test]
    fn malformed_config_is_rejected() {
        let err = PipelineConfig::from_json_str(r#"{ "trees": 3 }"#);
        assert!(matches!(err, Err(Error::Config(_))));

        let err = PipelineConfig::from_json_str(
            r#"{ "cost_matrix": [[0, 1], [-1, 0]] }"#
        );
        assert!(matches!(err, Err(Error::Config(_))));
    }


    #[test]
    fn out_of_range_hyper_parameters_are_rejected() {
        let rejected = [
            r#"{ "classifier": { "type": "naive_bayes", "min_variance": 0 } }"#,
            r#"{ "classifier": { "type": "naive_bayes", "min_variance": -1e-3 } }"#,
            r#"{ "classifier": { "type": "random_forest", "n_trees": 0 } }"#,
            r#"{ "classifier": { "type": "random_forest", "max_features": 0 } }"#,
            r#"{ "classifier": { "type": "random_forest", "max_depth": 0 } }"#,
            r#"{ "classifier": { "type": "random_forest", "min_leaf_weight": -1 } }"#,
        ];
        for json in rejected {
            let err = PipelineConfig::from_json_str(json);
            assert!(matches!(err, Err(Error::Config(_))), "{json}");
        }

        let json = r#"{ "classifier": { "type": "naive_bayes", "min_variance": 0.5 } }"#;
        assert!(PipelineConfig::from_json_str(json).is_ok());
    }
}
