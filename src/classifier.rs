//! The core library for trained classifiers.
//!
//! A classifier is the immutable state a [`Learner`](crate::Learner)
//! produces from a training [`Dataset`].
//! Every classifier remembers the [`Schema`] it was fit on,
//! so that the evaluator can refuse data of another shape.
use crate::{Dataset, Schema};


/// The output of [`Classifier::prediction`].
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Index of the predicted class label.
    pub label: usize,
    /// Per-class probabilities, indexed by class label,
    /// if the classifier can produce them.
    pub distribution: Option<Vec<f64>>,
}


/// A trait that defines the behavior of a trained classifier.
/// You need to implement [`Classifier::schema`] and
/// [`Classifier::predict`]; classifiers that can score every class
/// should also implement [`Classifier::distribution`].
pub trait Classifier {
    /// The schema of the data this classifier was fit on.
    fn schema(&self) -> &Schema;


    /// Predicts the class label of the `row`-th example of `data`.
    fn predict(&self, data: &Dataset, row: usize) -> usize;


    /// Computes the probability of each class label
    /// for the `row`-th example of `data`.
    /// Returns `None` if this classifier cannot produce probabilities.
    fn distribution(&self, _data: &Dataset, _row: usize) -> Option<Vec<f64>> {
        None
    }


    /// Predicts the label together with the distribution, if any.
    fn prediction(&self, data: &Dataset, row: usize) -> Prediction {
        Prediction {
            label: self.predict(data, row),
            distribution: self.distribution(data, row),
        }
    }


    /// Predicts the labels of every example of `data`.
    fn predict_all(&self, data: &Dataset) -> Vec<usize> {
        let n_sample = data.shape().0;
        (0..n_sample).map(|row| self.predict(data, row))
            .collect::<Vec<_>>()
    }
}


/// Returns the index of the largest entry, breaking ties by the lowest index.
pub(crate) fn argmax(values: &[f64]) -> usize {
    values.iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best, max), (i, &v)| {
            if v > max { (i, v) } else { (best, max) }
        })
        .0
}


/// Returns a distribution that puts all mass on `label`.
pub(crate) fn one_hot(label: usize, n_classes: usize) -> Vec<f64> {
    let mut dist = vec![0.0; n_classes];
    if let Some(p) = dist.get_mut(label) {
        *p = 1.0;
    }
    dist
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_prefers_lowest_index_on_ties() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), 1);
        assert_eq!(argmax(&[0.5, 0.5]), 0);
        assert_eq!(one_hot(1, 3), vec![0.0, 1.0, 0.0]);
    }
}
