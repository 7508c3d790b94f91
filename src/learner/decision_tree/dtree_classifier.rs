//! Defines the decision tree classifier.
use serde::{Serialize, Deserialize};

use crate::{Classifier, Dataset, Schema};
use crate::classifier::argmax;

use super::node::*;


/// Decision tree classifier.
/// This struct is just a wrapper of `Node`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DTreeClassifier {
    schema: Schema,
    root: Node,
}


impl DTreeClassifier {
    pub(super) fn new(schema: Schema, root: Node) -> Self {
        Self { schema, root }
    }


    /// Returns the root node.
    pub fn root(&self) -> &Node {
        &self.root
    }
}


impl Classifier for DTreeClassifier {
    fn schema(&self) -> &Schema {
        &self.schema
    }


    fn predict(&self, data: &Dataset, row: usize) -> usize {
        argmax(self.root.distribution(data, row))
    }


    fn distribution(&self, data: &Dataset, row: usize) -> Option<Vec<f64>> {
        Some(self.root.distribution(data, row).to_vec())
    }
}
