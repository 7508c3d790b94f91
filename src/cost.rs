//! Misclassification costs and the cost-sensitive decision rule.

mod cost_matrix;
mod cost_sensitive;

pub use cost_matrix::CostMatrix;
pub use cost_sensitive::{
    CostMode,
    CostSensitive,
    CostSensitiveClassifier,
};
