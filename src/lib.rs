#![warn(missing_docs)]

//!
//! A crate that trains a classifier on a labeled dataset,
//! evaluates it on a held-out test set under an optional
//! misclassification cost matrix, and persists the trained model.
//!
//! The pieces compose as follows.
//!
//! - [`DatasetReader`] loads an ARFF or CSV file into a [`Dataset`].
//! - A [`Learner`] fits a [`Classifier`] on a dataset.
//!     This crate ships [`ZeroRule`](learner::ZeroRule),
//!     [`NaiveBayes`](learner::NaiveBayes) and
//!     [`RandomForest`](learner::RandomForest).
//! - [`CostSensitive`] composes any learner with a [`CostMatrix`],
//!     predicting the label of minimal expected cost.
//! - [`evaluate`] produces a [`Report`]: confusion matrix,
//!     per-class precision/recall/F-measure, accuracy and total cost.
//! - [`ModelStore`] writes and reads trained [`Model`]s.
//! - [`Pipeline`] runs all of the above for one
//!     train/test/output triple.
//!
//! # Example
//! ```no_run
//! use costwise::prelude::*;
//!
//! let train = DatasetReader::default()
//!     .file("train.arff")
//!     .read()
//!     .unwrap();
//! let test = DatasetReader::default()
//!     .file("test.arff")
//!     .read()
//!     .unwrap();
//!
//! let costs = "0,1;5,0".parse::<CostMatrix>().unwrap();
//! let model = CostSensitive::new(NaiveBayes::init(), costs.clone())
//!     .fit(&train)
//!     .unwrap();
//!
//! let report = evaluate(&model, &test, Some(&costs)).unwrap();
//! println!("{report}");
//! ```

pub mod error;
pub mod dataset;
pub mod classifier;
pub mod learner;
pub mod cost;
pub mod evaluation;
pub mod model;
pub mod estimator;
pub mod model_store;
pub mod pipeline;
pub mod prelude;

mod common;


pub use error::{Error, Result};

pub use dataset::{
    Attribute,
    AttributeKind,
    Dataset,
    DatasetReader,
    Format,
    Schema,
};

pub use classifier::{Classifier, Prediction};
pub use learner::Learner;

pub use cost::{
    CostMatrix,
    CostMode,
    CostSensitive,
    CostSensitiveClassifier,
};

pub use evaluation::{
    evaluate,
    ClassMetrics,
    ConfusionMatrix,
    Report,
};

pub use model::{Algorithm, Model};
pub use estimator::Estimator;
pub use model_store::ModelStore;
pub use pipeline::{Pipeline, PipelineConfig, RunSummary};
