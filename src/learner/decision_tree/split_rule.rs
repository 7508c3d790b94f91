//! This file defines split rules for decision tree.
use serde::{Serialize, Deserialize};

use crate::Dataset;


/// The output of the function `split` of `Splitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LR {
    Left,
    Right,
}


/// A test on one attribute.
/// Missing values always go to the right child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Splitter {
    /// `x[attr] < threshold` goes left.
    Numeric {
        /// Attribute index.
        attr: usize,
        /// Split point.
        threshold: f64,
    },
    /// `x[attr] == value` goes left.
    Nominal {
        /// Attribute index.
        attr: usize,
        /// Index into the attribute domain.
        value: usize,
    },
}


impl Splitter {
    /// Defines the splitting.
    #[inline]
    pub(crate) fn split(&self, data: &Dataset, row: usize) -> LR {
        match *self {
            Self::Numeric { attr, threshold } => {
                if data.value(row, attr) < threshold { LR::Left } else { LR::Right }
            },
            Self::Nominal { attr, value } => {
                let x = data.value(row, attr);
                if !x.is_nan() && x as usize == value { LR::Left } else { LR::Right }
            },
        }
    }
}
