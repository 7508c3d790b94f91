/// Defines Naive Bayes learner.
mod nbayes;
/// Defines Naive Bayes Classifiers returned by `NaiveBayes`.
mod nbayes_classifier;

/// Defines probability density/mass functions.
mod probability;

pub use nbayes::NaiveBayes;
pub use nbayes_classifier::NBayesClassifier;
pub use probability::{Probability, Density, Gaussian, Categorical};
