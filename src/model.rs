//! The closed set of classifier families the pipeline can train,
//! and the trained state they produce.
//!
//! [`Algorithm`] is the configuration side (a [`Learner`]),
//! [`Model`] the trained side (a [`Classifier`]).
//! Everything downstream of training works through these two traits,
//! never through a concrete variant.
use serde::{Serialize, Deserialize};

use std::fmt;
use std::str::FromStr;

use crate::{
    Classifier,
    CostSensitiveClassifier,
    Dataset,
    Error,
    Learner,
    Result,
    Schema,
};
use crate::learner::{
    ForestClassifier,
    NBayesClassifier,
    NaiveBayes,
    RandomForest,
    ZeroRule,
    ZeroRuleClassifier,
};


/// A trained classifier of any supported family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Model {
    /// Majority-class baseline.
    ZeroRule(ZeroRuleClassifier),
    /// Probabilistic generative model.
    NaiveBayes(NBayesClassifier),
    /// Ensemble of decision trees.
    RandomForest(ForestClassifier),
    /// Another model under a cost-sensitive decision rule.
    CostSensitive(Box<CostSensitiveClassifier<Model>>),
}


impl Classifier for Model {
    fn schema(&self) -> &Schema {
        match self {
            Self::ZeroRule(m) => m.schema(),
            Self::NaiveBayes(m) => m.schema(),
            Self::RandomForest(m) => m.schema(),
            Self::CostSensitive(m) => m.schema(),
        }
    }


    fn predict(&self, data: &Dataset, row: usize) -> usize {
        match self {
            Self::ZeroRule(m) => m.predict(data, row),
            Self::NaiveBayes(m) => m.predict(data, row),
            Self::RandomForest(m) => m.predict(data, row),
            Self::CostSensitive(m) => m.predict(data, row),
        }
    }


    fn distribution(&self, data: &Dataset, row: usize) -> Option<Vec<f64>> {
        match self {
            Self::ZeroRule(m) => m.distribution(data, row),
            Self::NaiveBayes(m) => m.distribution(data, row),
            Self::RandomForest(m) => m.distribution(data, row),
            Self::CostSensitive(m) => m.distribution(data, row),
        }
    }
}


impl From<ZeroRuleClassifier> for Model {
    fn from(model: ZeroRuleClassifier) -> Self {
        Self::ZeroRule(model)
    }
}


impl From<NBayesClassifier> for Model {
    fn from(model: NBayesClassifier) -> Self {
        Self::NaiveBayes(model)
    }
}


impl From<ForestClassifier> for Model {
    fn from(model: ForestClassifier) -> Self {
        Self::RandomForest(model)
    }
}


impl From<CostSensitiveClassifier<Model>> for Model {
    fn from(model: CostSensitiveClassifier<Model>) -> Self {
        Self::CostSensitive(Box::new(model))
    }
}


/// A learning algorithm together with its hyper-parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Algorithm {
    /// See [`ZeroRule`].
    ZeroRule,
    /// See [`NaiveBayes`].
    NaiveBayes(NaiveBayes),
    /// See [`RandomForest`].
    RandomForest(RandomForest),
}


impl Default for Algorithm {
    fn default() -> Self {
        Self::NaiveBayes(NaiveBayes::default())
    }
}


impl Algorithm {
    /// The file name a trained model of this family is saved under
    /// when the output target is a directory.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::ZeroRule => "ZEROR.model",
            Self::NaiveBayes(_) => "NAIVEBAYES.model",
            Self::RandomForest(_) => "RANDOMFOREST.model",
        }
    }


    /// Check the hyper-parameters of the learner.
    /// Fails with [`Error::Config`].
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::ZeroRule => Ok(()),
            Self::NaiveBayes(l) => l.validate(),
            Self::RandomForest(l) => l.validate(),
        }
    }
}


impl Learner for Algorithm {
    type Model = Model;


    fn name(&self) -> &str {
        match self {
            Self::ZeroRule => "ZeroRule",
            Self::NaiveBayes(l) => l.name(),
            Self::RandomForest(l) => l.name(),
        }
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        match self {
            Self::ZeroRule => None,
            Self::NaiveBayes(l) => l.info(),
            Self::RandomForest(l) => l.info(),
        }
    }


    fn fit_weighted(&self, train: &Dataset, dist: &[f64])
        -> Result<Self::Model>
    {
        match self {
            Self::ZeroRule => ZeroRule.fit_weighted(train, dist).map(Model::from),
            Self::NaiveBayes(l) => l.fit_weighted(train, dist).map(Model::from),
            Self::RandomForest(l) => l.fit_weighted(train, dist).map(Model::from),
        }
    }
}


impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "zero-rule" | "zeror" => Ok(Self::ZeroRule),
            "naive-bayes" | "nb" => Ok(Self::NaiveBayes(NaiveBayes::default())),
            "random-forest" | "rf" => {
                Ok(Self::RandomForest(RandomForest::default()))
            },
            _ => Err(Error::Argument(format!(
                "unknown classifier `{s}`; \
                 expected zero-rule, naive-bayes or random-forest"
            ))),
        }
    }
}


impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
