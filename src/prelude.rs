//! Exports the standard learners, traits and pipeline pieces.
//!
pub use crate::dataset::{
    Dataset,
    DatasetReader,
    Format,
};


pub use crate::learner::{
    // Learner trait
    Learner,


    // Baseline
    ZeroRule,
    ZeroRuleClassifier,


    // Naive Bayes
    NaiveBayes,
    NBayesClassifier,


    // Trees
    DTree,
    DTreeClassifier,
    Criterion,
    RandomForest,
    ForestClassifier,
};


pub use crate::classifier::{
    Classifier,
    Prediction,
};


pub use crate::cost::{
    CostMatrix,
    CostMode,
    CostSensitive,
    CostSensitiveClassifier,
};


pub use crate::evaluation::{
    evaluate,
    Report,
};


pub use crate::{
    Algorithm,
    Estimator,
    Model,
    ModelStore,
    Pipeline,
    PipelineConfig,
};
