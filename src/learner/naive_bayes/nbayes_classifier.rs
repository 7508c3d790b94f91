use serde::{
    Serialize,
    Deserialize,
};

use crate::{Classifier, Dataset, Schema};
use crate::classifier::argmax;

use super::probability::{Density, Probability};


/// Naive Bayes classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NBayesClassifier {
    pub(super) schema: Schema,
    pub(super) log_priors: Vec<f64>,
    /// Pairs of attribute index and its density for each class.
    pub(super) densities: Vec<(usize, Vec<Density>)>,
}


impl NBayesClassifier {
    /// Computes the unnormalized logarithmic joint probability
    /// of each class for the given instance.
    pub fn log_probabilities(&self, data: &Dataset, row: usize) -> Vec<f64> {
        let mut log_joint = self.log_priors.clone();

        for (attr, per_class) in &self.densities {
            let x = data.value(row, *attr);
            if x.is_nan() { continue; }
            log_joint.iter_mut()
                .zip(per_class)
                .for_each(|(lp, density)| *lp += density.log_probability(x));
        }
        log_joint
    }


    /// Computes the posterior probability of each class
    /// for the given instance.
    pub fn probabilities(&self, data: &Dataset, row: usize) -> Vec<f64> {
        let log_joint = self.log_probabilities(data, row);
        let max = log_joint.iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        let mut probs = log_joint.into_iter()
            .map(|lp| (lp - max).exp())
            .collect::<Vec<_>>();
        let total = probs.iter().sum::<f64>();
        probs.iter_mut().for_each(|p| *p /= total);
        probs
    }
}


impl Classifier for NBayesClassifier {
    fn schema(&self) -> &Schema {
        &self.schema
    }


    fn predict(&self, data: &Dataset, row: usize) -> usize {
        argmax(&self.log_probabilities(data, row))
    }


    fn distribution(&self, data: &Dataset, row: usize) -> Option<Vec<f64>> {
        Some(self.probabilities(data, row))
    }
}
