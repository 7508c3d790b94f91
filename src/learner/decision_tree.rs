/// Defines the decision tree learner.
pub mod dtree;
/// Defines the classifier produced by `DTree`.
pub mod dtree_classifier;

/// Defines the inner representations of `DTreeClassifier`.
pub(crate) mod node;
mod criterion;
mod split_rule;


pub use dtree_classifier::DTreeClassifier;
pub use dtree::DTree;
pub use criterion::Criterion;
pub use node::Node;
pub use split_rule::Splitter;
