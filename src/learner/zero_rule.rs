//! The majority-class baseline.
use log::debug;
use serde::{Serialize, Deserialize};

use crate::{Classifier, Dataset, Learner, Result, Schema};
use crate::classifier::argmax;
use crate::common::checker;


/// A learner that ignores the attributes and always predicts
/// the (weighted) majority class of the training set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ZeroRule;


impl ZeroRule {
    /// Initializes the `ZeroRule` instance.
    pub fn init() -> Self {
        Self
    }
}


/// Classifier produced by [`ZeroRule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroRuleClassifier {
    schema: Schema,
    label: usize,
    distribution: Vec<f64>,
}


impl Learner for ZeroRule {
    type Model = ZeroRuleClassifier;


    fn name(&self) -> &str {
        "ZeroRule"
    }


    fn fit_weighted(&self, train: &Dataset, dist: &[f64])
        -> Result<Self::Model>
    {
        let rows = checker::check_sample(train)?;
        checker::check_distribution(train, dist)?;
        let mass = checker::check_mass(dist, &rows)?;

        let mut distribution = vec![0.0; train.n_classes()?];
        for &i in &rows {
            if let Some(y) = train.label(i) {
                distribution[y] += dist[i];
            }
        }
        distribution.iter_mut().for_each(|p| *p /= mass);

        let label = argmax(&distribution);
        debug!("zero rule predicts class #{label} ({distribution:?})");

        Ok(ZeroRuleClassifier {
            schema: train.schema().clone(),
            label,
            distribution,
        })
    }
}


impl Classifier for ZeroRuleClassifier {
    fn schema(&self) -> &Schema {
        &self.schema
    }


    fn predict(&self, _data: &Dataset, _row: usize) -> usize {
        self.label
    }


    fn distribution(&self, _data: &Dataset, _row: usize) -> Option<Vec<f64>> {
        Some(self.distribution.clone())
    }
}
