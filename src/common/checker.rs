//! This file defines some functions that checks some pre-conditions
//! E.g., Shape of data

use crate::{Dataset, Error, Result};


/// Check whether the training sample is valid or not,
/// and return the rows that carry a label.
pub(crate) fn check_sample(sample: &Dataset) -> Result<Vec<usize>> {
    // Resolves the class attribute or fails.
    sample.class_index()?;

    let rows = sample.labeled_rows()?;
    if rows.is_empty() {
        return Err(Error::InsufficientData(
            "the training set has no labeled example".into()
        ));
    }
    Ok(rows)
}


/// Check whether `dist` is a valid weighting of `sample`.
pub(crate) fn check_distribution(sample: &Dataset, dist: &[f64])
    -> Result<()>
{
    let n_sample = sample.shape().0;
    if dist.len() != n_sample {
        return Err(Error::InsufficientData(format!(
            "{} weights given for {n_sample} examples",
            dist.len()
        )));
    }
    if dist.iter().any(|d| !d.is_finite() || *d < 0.0) {
        return Err(Error::InsufficientData(
            "weights must be finite and non-negative".into()
        ));
    }
    Ok(())
}


/// Sum of `dist` over `rows`, failing if nothing carries weight.
pub(crate) fn check_mass(dist: &[f64], rows: &[usize]) -> Result<f64> {
    let mass = rows.iter().map(|&i| dist[i]).sum::<f64>();
    if mass <= 0.0 {
        return Err(Error::InsufficientData(
            "the labeled examples carry no weight".into()
        ));
    }
    Ok(mass)
}
