//! Scores a trained classifier against a held-out dataset.

mod confusion_matrix;
mod evaluator;
mod report;

pub use confusion_matrix::ConfusionMatrix;
pub use evaluator::evaluate;
pub use report::{ClassMetrics, Report};
