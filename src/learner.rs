//! The files in `learner/` directory defines
//! `Learner` trait and the learning algorithms.

/// Provides Learner trait.
pub mod core;

/// Defines the majority-class baseline.
pub mod zero_rule;

/// Defines Naive Bayes.
pub mod naive_bayes;

/// Defines Decision Tree.
pub mod decision_tree;

/// Defines Random Forest.
pub mod random_forest;


pub use self::core::Learner;

pub use self::zero_rule::{
    ZeroRule,
    ZeroRuleClassifier,
};

pub use self::naive_bayes::{
    NaiveBayes,
    NBayesClassifier,
};

pub use self::decision_tree::{
    Criterion,
    DTree,
    DTreeClassifier,
};

pub use self::random_forest::{
    RandomForest,
    ForestClassifier,
};
