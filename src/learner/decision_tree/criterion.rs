//! Impurity measures and the search for the best split of one attribute.
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::{AttributeKind, Dataset};
use super::split_rule::Splitter;


/// Splitting criteria for growing decision tree.
/// * `Criterion::Gini` minimizes the Gini index of the children.
/// * `Criterion::Entropy` minimizes the entropic impurity of the children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// Gini index.
    #[default]
    Gini,
    /// Binary entropy function.
    Entropy,
}


impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Gini => "Gini index",
            Self::Entropy => "Entropy",
        };

        write!(f, "{name}")
    }
}


impl Criterion {
    /// Impurity of a node with the given class weights.
    pub(super) fn impurity(&self, counts: &[f64]) -> f64 {
        let total = counts.iter().sum::<f64>();
        if total <= 0.0 {
            return 0.0;
        }
        match self {
            Criterion::Gini => {
                1.0 - counts.iter()
                    .map(|c| (c / total).powi(2))
                    .sum::<f64>()
            },
            Criterion::Entropy => {
                counts.iter()
                    .filter(|&&c| c > 0.0)
                    .map(|c| {
                        let p = c / total;
                        - p * p.ln()
                    })
                    .sum::<f64>()
            },
        }
    }


    /// Weighted impurity of a pair of children.
    fn score(&self, left: &[f64], right: &[f64]) -> f64 {
        let wl = left.iter().sum::<f64>();
        let wr = right.iter().sum::<f64>();
        let total = wl + wr;
        if total <= 0.0 {
            return 0.0;
        }
        (wl * self.impurity(left) + wr * self.impurity(right)) / total
    }


    /// Returns the best splitting rule on attribute `attr`
    /// together with its score (lower is better),
    /// or `None` if no split leaves `min_leaf` weight on both sides.
    pub(super) fn best_split(
        &self,
        data: &Dataset,
        attr: usize,
        rows: &[(usize, usize, f64)],
        n_classes: usize,
        min_leaf: f64,
    ) -> Option<(Splitter, f64)>
    {
        let column = data.column(attr);
        match data.schema().attributes()[attr].kind() {
            AttributeKind::Numeric => {
                self.best_numeric_split(column, attr, rows, n_classes, min_leaf)
            },
            AttributeKind::Nominal(values) => {
                self.best_nominal_split(
                    column, attr, values.len(), rows, n_classes, min_leaf
                )
            },
        }
    }


    fn best_numeric_split(
        &self,
        column: &[f64],
        attr: usize,
        rows: &[(usize, usize, f64)],
        n_classes: usize,
        min_leaf: f64,
    ) -> Option<(Splitter, f64)>
    {
        let mut left = vec![0.0; n_classes];
        let mut right = vec![0.0; n_classes];
        let mut present = Vec::with_capacity(rows.len());
        for &(i, y, w) in rows {
            right[y] += w;
            let x = column[i];
            if !x.is_nan() {
                present.push((x, y, w));
            }
        }
        present.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut best: Option<(Splitter, f64)> = None;
        for k in 0..present.len().saturating_sub(1) {
            let (x, y, w) = present[k];
            left[y] += w;
            right[y] -= w;

            let next = present[k + 1].0;
            if x >= next {
                continue;
            }
            let wl = left.iter().sum::<f64>();
            let wr = right.iter().sum::<f64>();
            if wl < min_leaf || wr < min_leaf {
                continue;
            }

            let score = self.score(&left, &right);
            if best.as_ref().map_or(true, |(_, s)| score < *s) {
                let mid = x + (next - x) / 2.0;
                let threshold = if mid > x { mid } else { next };
                best = Some((Splitter::Numeric { attr, threshold }, score));
            }
        }
        best
    }


    fn best_nominal_split(
        &self,
        column: &[f64],
        attr: usize,
        n_values: usize,
        rows: &[(usize, usize, f64)],
        n_classes: usize,
        min_leaf: f64,
    ) -> Option<(Splitter, f64)>
    {
        // counts[v][y]: weight of class `y` among the rows with value `v`.
        let mut counts = vec![vec![0.0; n_classes]; n_values];
        let mut total = vec![0.0; n_classes];
        for &(i, y, w) in rows {
            total[y] += w;
            let x = column[i];
            if !x.is_nan() {
                counts[x as usize][y] += w;
            }
        }

        let mut best: Option<(Splitter, f64)> = None;
        for (value, left) in counts.iter().enumerate() {
            let right = total.iter()
                .zip(left)
                .map(|(t, l)| t - l)
                .collect::<Vec<_>>();
            let wl = left.iter().sum::<f64>();
            let wr = right.iter().sum::<f64>();
            if wl < min_leaf || wr < min_leaf || wl <= 0.0 || wr <= 0.0 {
                continue;
            }

            let score = self.score(left, &right);
            if best.as_ref().map_or(true, |(_, s)| score < *s) {
                best = Some((Splitter::Nominal { attr, value }, score));
            }
        }
        best
    }
}
