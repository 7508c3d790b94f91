//! The single-owner handle the pipeline trains, queries and persists.
use log::info;

use crate::{
    Algorithm,
    Classifier,
    CostMatrix,
    CostMode,
    CostSensitive,
    Dataset,
    Error,
    Learner,
    Model,
    Prediction,
    Result,
};


/// An [`Algorithm`], optionally under a cost matrix,
/// together with the [`Model`] it produced once fit.
#[derive(Debug, Clone)]
pub struct Estimator {
    algorithm: Algorithm,
    costs: Option<(CostMatrix, CostMode)>,
    model: Option<Model>,
}


impl Estimator {
    /// An unfitted estimator for `algorithm`.
    pub fn new(algorithm: Algorithm) -> Self {
        Self { algorithm, costs: None, model: None }
    }


    /// Make the estimator cost-sensitive.
    pub fn cost_sensitive(mut self, costs: CostMatrix, mode: CostMode) -> Self {
        self.costs = Some((costs, mode));
        self
    }


    /// The configured algorithm.
    pub fn algorithm(&self) -> &Algorithm {
        &self.algorithm
    }


    /// Fit on `train`, replacing any previous model.
    pub fn fit(&mut self, train: &Dataset) -> Result<()> {
        let model = match &self.costs {
            None => self.algorithm.fit(train)?,
            Some((costs, mode)) => {
                let learner = CostSensitive::new(
                    self.algorithm.clone(), costs.clone()
                ).mode(*mode);
                Model::from(learner.fit(train)?)
            },
        };
        info!("{} fit on {} examples", self.algorithm, train.shape().0);
        self.model = Some(model);
        Ok(())
    }


    /// Returns `true` once [`Estimator::fit`] succeeded.
    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }


    /// The trained model, or [`Error::NotFitted`].
    pub fn model(&self) -> Result<&Model> {
        self.model.as_ref().ok_or(Error::NotFitted)
    }


    /// Consumes the estimator and returns the trained model.
    pub fn into_model(self) -> Result<Model> {
        self.model.ok_or(Error::NotFitted)
    }


    /// Predict the `row`-th example of `data`.
    pub fn predict(&self, data: &Dataset, row: usize) -> Result<Prediction> {
        Ok(self.model()?.prediction(data, row))
    }
}
