//! Defines the inner representation
//! of the Decision Tree class.
use serde::{Serialize, Deserialize};

use crate::Dataset;
use super::split_rule::*;


/// Enumeration of `BranchNode` and `LeafNode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A node that have two childrens.
    Branch(BranchNode),


    /// A node that have no child.
    Leaf(LeafNode),
}


/// Represents the branch nodes of decision tree.
/// Each `BranchNode` must have two childrens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchNode {
    pub(super) rule: Splitter,
    pub(super) left: Box<Node>,
    pub(super) right: Box<Node>,
}


/// Represents the leaf nodes of decision tree.
/// A leaf stores the class distribution of the training examples
/// that reached it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    pub(super) distribution: Vec<f64>,
}


impl Node {
    /// Returns a leaf whose distribution is `counts` normalized.
    pub(super) fn leaf(counts: Vec<f64>) -> Self {
        let total = counts.iter().sum::<f64>();
        let distribution = if total > 0.0 {
            counts.into_iter().map(|c| c / total).collect()
        } else {
            counts
        };
        Node::Leaf(LeafNode { distribution })
    }


    /// Returns a branch node.
    pub(super) fn branch(rule: Splitter, left: Node, right: Node) -> Self {
        Node::Branch(BranchNode {
            rule,
            left: Box::new(left),
            right: Box::new(right),
        })
    }


    /// Returns the class distribution of the leaf reached by
    /// the `row`-th example of `data`.
    #[inline]
    pub(crate) fn distribution(&self, data: &Dataset, row: usize) -> &[f64] {
        let mut node = self;
        loop {
            match node {
                Node::Branch(b) => {
                    node = match b.rule.split(data, row) {
                        LR::Left => b.left.as_ref(),
                        LR::Right => b.right.as_ref(),
                    };
                },
                Node::Leaf(l) => return &l.distribution[..],
            }
        }
    }


    /// Number of leaves under this node.
    pub fn n_leaves(&self) -> usize {
        match self {
            Node::Branch(b) => b.left.n_leaves() + b.right.n_leaves(),
            Node::Leaf(_) => 1,
        }
    }


    /// Depth of the subtree rooted at this node.
    pub fn depth(&self) -> usize {
        match self {
            Node::Branch(b) => 1 + b.left.depth().max(b.right.depth()),
            Node::Leaf(_) => 0,
        }
    }
}
