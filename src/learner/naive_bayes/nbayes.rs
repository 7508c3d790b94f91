use log::debug;
use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::{AttributeKind, Dataset, Error, Learner, Result};
use crate::common::checker;

use super::probability::{
    Categorical,
    Density,
    Gaussian,
};
use super::nbayes_classifier::*;


/// Smallest variance a Gaussian may take.
const DEFAULT_MIN_VARIANCE: f64 = 1e-6;


/// A factory that produces a [`NBayesClassifier`]
/// for a given distribution over training examples.
///
/// Numeric attributes are modeled by a Gaussian per class,
/// nominal attributes by Laplace-smoothed frequencies per class.
/// Missing values are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaiveBayes {
    min_variance: f64,
}


impl Default for NaiveBayes {
    fn default() -> Self {
        Self { min_variance: DEFAULT_MIN_VARIANCE }
    }
}


impl NaiveBayes {
    /// Initializes the `NaiveBayes` instance.
    pub fn init() -> Self {
        Self::default()
    }


    /// Set the variance floor of the Gaussian densities.
    pub fn min_variance(mut self, var: f64) -> Self {
        assert!(var > 0.0);
        self.min_variance = var;
        self
    }


    /// Check the hyper-parameters.
    /// Deserialized values do not pass through the setters.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_variance.is_finite() && self.min_variance > 0.0) {
            return Err(Error::Config(format!(
                "`min_variance` must be positive, got {}",
                self.min_variance
            )));
        }
        Ok(())
    }
}


impl Learner for NaiveBayes {
    type Model = NBayesClassifier;


    fn name(&self) -> &str {
        "NaiveBayes"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        Some(vec![("Min. variance", format!("{}", self.min_variance))])
    }


    fn fit_weighted(&self, train: &Dataset, dist: &[f64])
        -> Result<Self::Model>
    {
        self.validate()?;
        let rows = checker::check_sample(train)?;
        checker::check_distribution(train, dist)?;
        let mass = checker::check_mass(dist, &rows)?;
        let n_classes = train.n_classes()?;

        // Rescale so that the uniform distribution counts each example once.
        let scale = rows.len() as f64 / mass;
        let weights = rows.iter()
            .filter_map(|&i| {
                train.label(i).map(|y| (i, y, dist[i] * scale))
            })
            .collect::<Vec<(usize, usize, f64)>>();

        let mut class_weight = vec![0.0; n_classes];
        for &(_, y, w) in &weights {
            class_weight[y] += w;
        }
        let total = class_weight.iter().sum::<f64>();
        let log_priors = class_weight.iter()
            .map(|w| ((w + 1.0) / (total + n_classes as f64)).ln())
            .collect::<Vec<_>>();


        let densities = train.schema()
            .feature_indices()
            .into_par_iter()
            .map(|attr| {
                let kind = train.schema().attributes()[attr].kind();
                let column = train.column(attr);
                let per_class = match kind {
                    AttributeKind::Numeric => gaussians(
                        column, &weights, n_classes, self.min_variance
                    ),
                    AttributeKind::Nominal(values) => categoricals(
                        column, &weights, n_classes, values.len()
                    ),
                };
                (attr, per_class)
            })
            .collect::<Vec<_>>();

        debug!(
            "naive bayes fit on {} examples, class weights {class_weight:?}",
            weights.len()
        );

        Ok(NBayesClassifier {
            schema: train.schema().clone(),
            log_priors,
            densities,
        })
    }
}


/// Weighted mean/variance of a numeric column for each class.
fn gaussians(
    column: &[f64],
    weights: &[(usize, usize, f64)],
    n_classes: usize,
    min_variance: f64,
) -> Vec<Density>
{
    let mut sum_w = vec![0.0; n_classes];
    let mut sum_wx = vec![0.0; n_classes];
    for &(i, y, w) in weights {
        let x = column[i];
        if x.is_nan() { continue; }
        sum_w[y] += w;
        sum_wx[y] += w * x;
    }
    let means = sum_w.iter()
        .zip(&sum_wx)
        .map(|(&w, &wx)| if w > 0.0 { wx / w } else { 0.0 })
        .collect::<Vec<_>>();

    let mut sum_wd = vec![0.0; n_classes];
    for &(i, y, w) in weights {
        let x = column[i];
        if x.is_nan() { continue; }
        sum_wd[y] += w * (x - means[y]).powi(2);
    }

    (0..n_classes)
        .map(|c| {
            let var = if sum_w[c] > 0.0 { sum_wd[c] / sum_w[c] } else { 0.0 };
            Density::Gaussian(Gaussian::new(means[c], var.max(min_variance)))
        })
        .collect()
}


/// Laplace-smoothed value frequencies of a nominal column for each class.
fn categoricals(
    column: &[f64],
    weights: &[(usize, usize, f64)],
    n_classes: usize,
    n_values: usize,
) -> Vec<Density>
{
    let mut counts = vec![vec![0.0; n_values]; n_classes];
    for &(i, y, w) in weights {
        let x = column[i];
        if x.is_nan() { continue; }
        counts[y][x as usize] += w;
    }

    counts.into_iter()
        .map(|count| {
            let total = count.iter().sum::<f64>() + n_values as f64;
            let probs = count.into_iter()
                .map(|c| (c + 1.0) / total)
                .collect();
            Density::Categorical(Categorical { probs })
        })
        .collect()
}
