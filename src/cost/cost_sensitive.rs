//! Composes a learner with a [`CostMatrix`].
use log::debug;
use serde::{Serialize, Deserialize};

use crate::{Classifier, Dataset, Learner, Result, Schema};
use crate::classifier::one_hot;
use crate::common::checker;

use super::cost_matrix::CostMatrix;


/// How the cost matrix is taken into account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostMode {
    /// Predict the label with the minimal expected cost under the
    /// base classifier's distribution.
    #[default]
    MinimizeExpectedCost,
    /// Reweight the training examples by the cost of misclassifying
    /// their class, then predict with the base classifier as is.
    Reweight,
}


/// A learner that makes a base learner cost-sensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSensitive<L> {
    base: L,
    costs: CostMatrix,
    mode: CostMode,
}


impl<L> CostSensitive<L> {
    /// Wrap `base` with `costs`,
    /// minimizing the expected cost at prediction time.
    pub fn new(base: L, costs: CostMatrix) -> Self {
        Self { base, costs, mode: CostMode::default() }
    }


    /// Set how the cost matrix is used.
    pub fn mode(mut self, mode: CostMode) -> Self {
        self.mode = mode;
        self
    }


    /// Returns the cost matrix.
    pub fn costs(&self) -> &CostMatrix {
        &self.costs
    }
}


/// Classifier produced by [`CostSensitive`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSensitiveClassifier<M> {
    base: M,
    costs: CostMatrix,
    mode: CostMode,
}


impl<M> CostSensitiveClassifier<M> {
    /// Wrap an already trained classifier.
    /// No retraining is needed to change the decision rule.
    pub fn new(base: M, costs: CostMatrix, mode: CostMode) -> Self {
        Self { base, costs, mode }
    }


    /// Returns the wrapped classifier.
    pub fn base(&self) -> &M {
        &self.base
    }


    /// Returns the cost matrix.
    pub fn costs(&self) -> &CostMatrix {
        &self.costs
    }


    /// Returns the decision mode.
    pub fn cost_mode(&self) -> CostMode {
        self.mode
    }
}


impl<L: Learner> Learner for CostSensitive<L> {
    type Model = CostSensitiveClassifier<L::Model>;


    fn name(&self) -> &str {
        self.base.name()
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let mut info = self.base.info().unwrap_or_default();
        info.push(("Cost mode", format!("{:?}", self.mode)));
        Some(info)
    }


    fn fit_weighted(&self, train: &Dataset, dist: &[f64])
        -> Result<Self::Model>
    {
        let rows = checker::check_sample(train)?;
        checker::check_distribution(train, dist)?;
        self.costs.check_classes(train.n_classes()?)?;

        let base = match self.mode {
            CostMode::MinimizeExpectedCost => {
                self.base.fit_weighted(train, dist)?
            },
            CostMode::Reweight => {
                let mut weights = vec![0.0; dist.len()];
                for &i in &rows {
                    if let Some(y) = train.label(i) {
                        weights[i] = dist[i] * self.costs.row_cost(y);
                    }
                }
                let total = checker::check_mass(&weights, &rows)?;
                weights.iter_mut().for_each(|w| *w /= total);
                debug!("training examples reweighted by misclassification cost");
                self.base.fit_weighted(train, &weights)?
            },
        };

        Ok(CostSensitiveClassifier::new(base, self.costs.clone(), self.mode))
    }
}


impl<M> CostSensitiveClassifier<M>
    where M: Classifier
{
    /// Class distribution of the base classifier, or a one-hot
    /// distribution on its prediction if it cannot produce probabilities.
    fn base_distribution(&self, data: &Dataset, row: usize) -> Vec<f64> {
        self.base.distribution(data, row)
            .unwrap_or_else(|| {
                one_hot(self.base.predict(data, row), self.costs.n_classes())
            })
    }


    /// Expected cost of each candidate prediction for the `row`-th example.
    pub fn expected_costs(&self, data: &Dataset, row: usize) -> Vec<f64> {
        self.costs.expected_costs(&self.base_distribution(data, row))
    }
}


impl<M> Classifier for CostSensitiveClassifier<M>
    where M: Classifier
{
    fn schema(&self) -> &Schema {
        self.base.schema()
    }


    fn predict(&self, data: &Dataset, row: usize) -> usize {
        match self.mode {
            CostMode::MinimizeExpectedCost => {
                let p = self.base_distribution(data, row);
                self.costs.min_expected_cost(&p)
            },
            CostMode::Reweight => self.base.predict(data, row),
        }
    }


    fn distribution(&self, data: &Dataset, row: usize) -> Option<Vec<f64>> {
        match self.mode {
            CostMode::MinimizeExpectedCost => {
                let label = self.predict(data, row);
                Some(one_hot(label, self.costs.n_classes()))
            },
            CostMode::Reweight => self.base.distribution(data, row),
        }
    }
}
