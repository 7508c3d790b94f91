use crate::{Classifier, Dataset, Result};


/// A trait that defines the behavior of a learning algorithm.
///
/// Given a training set and a distribution over its examples,
/// a learner returns a trained classifier.
/// Implementations vary in algorithm; the rest of the crate only
/// relies on this contract.
///
/// # Required Methods
/// - [`Learner::name`]
/// - [`Learner::fit_weighted`]
///
/// # Provided Methods
/// - [`Learner::fit`]
/// - [`Learner::info`]
pub trait Learner {
    /// The classifier returned by this learner.
    type Model: Classifier;


    /// Returns the name of the learner.
    fn name(&self) -> &str;


    /// Returns the hyper-parameters of the learner as `String`s.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// Fits a classifier on `train` where example `i` carries weight
    /// `dist[i]`.
    ///
    /// Fails with [`Error::IncompatibleSchema`](crate::Error) if the class
    /// attribute is unset or not nominal, and with
    /// [`Error::InsufficientData`](crate::Error) if no labeled example
    /// carries weight.
    fn fit_weighted(&self, train: &Dataset, dist: &[f64])
        -> Result<Self::Model>;


    /// Fits a classifier on `train` with uniform weights.
    fn fit(&self, train: &Dataset) -> Result<Self::Model> {
        let n_sample = train.shape().0;
        let dist = vec![1.0 / n_sample.max(1) as f64; n_sample];
        self.fit_weighted(train, &dist)
    }
}
