use log::debug;
use rayon::prelude::*;

use crate::{Classifier, CostMatrix, Dataset, Result};
use super::confusion_matrix::ConfusionMatrix;
use super::report::Report;


/// Evaluate `model` on every labeled example of `test`.
///
/// Fails with [`Error::SchemaMismatch`](crate::Error) if `test` does not
/// conform to the schema `model` was fit on, and with
/// [`Error::InvalidCostMatrix`](crate::Error) if `costs` does not match
/// the number of class labels.
///
/// Examples are scored in parallel; partial confusion matrices are
/// merged cell by cell, so the report equals the one of a sequential pass.
pub fn evaluate<C>(model: &C, test: &Dataset, costs: Option<&CostMatrix>)
    -> Result<Report>
    where C: Classifier + Sync + ?Sized,
{
    model.schema().check_compatible(test.schema())?;

    let labels = test.schema().class_values()?.to_vec();
    if let Some(costs) = costs {
        costs.check_classes(labels.len())?;
    }

    let rows = test.labeled_rows()?;
    let confusion = rows.par_iter()
        .fold(
            || ConfusionMatrix::new(labels.clone()),
            |mut confusion, &row| {
                if let Some(actual) = test.label(row) {
                    confusion.increment(actual, model.predict(test, row));
                }
                confusion
            },
        )
        .reduce(
            || ConfusionMatrix::new(labels.clone()),
            ConfusionMatrix::merge,
        );

    debug!(
        "evaluated {} examples, {} correct",
        confusion.total(),
        confusion.trace()
    );
    Ok(Report::new(confusion, costs))
}
