use serde::{Serialize, Deserialize};

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};


/// Square matrix of misclassification costs,
/// indexed as `cost[true][predicted]`.
///
/// Every cell is finite and non-negative.
/// The diagonal holds the cost of a correct decision,
/// which is conventionally (but not necessarily) zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct CostMatrix {
    cells: Vec<Vec<f64>>,
}


impl CostMatrix {
    /// Construct a cost matrix for `n_classes` labels.
    pub fn build(n_classes: usize, cells: Vec<Vec<f64>>) -> Result<Self> {
        if cells.len() != n_classes {
            return Err(Error::InvalidCostMatrix(format!(
                "expected {n_classes} rows, got {}",
                cells.len()
            )));
        }
        if let Some((i, row)) = cells.iter()
            .enumerate()
            .find(|(_, row)| row.len() != n_classes)
        {
            return Err(Error::InvalidCostMatrix(format!(
                "the matrix is not square: row {i} has {} cells, \
                 expected {n_classes}",
                row.len()
            )));
        }
        for (i, row) in cells.iter().enumerate() {
            for (j, &c) in row.iter().enumerate() {
                if !c.is_finite() || c < 0.0 {
                    return Err(Error::InvalidCostMatrix(format!(
                        "cost[{i}][{j}] = {c} is not a finite \
                         non-negative number"
                    )));
                }
            }
        }
        Ok(Self { cells })
    }


    /// The cost matrix of plain error counting:
    /// `0` on the diagonal, `1` elsewhere.
    pub fn zero_one(n_classes: usize) -> Self {
        let cells = (0..n_classes)
            .map(|i| {
                (0..n_classes)
                    .map(|j| if i == j { 0.0 } else { 1.0 })
                    .collect()
            })
            .collect();
        Self { cells }
    }


    /// Number of class labels.
    pub fn n_classes(&self) -> usize {
        self.cells.len()
    }


    /// Cost of predicting `predicted` when the truth is `actual`.
    #[inline]
    pub fn get(&self, actual: usize, predicted: usize) -> f64 {
        self.cells[actual][predicted]
    }


    /// Returns the rows of the matrix.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.cells[..]
    }


    /// Fails if this matrix cannot be used with `n_classes` labels.
    pub fn check_classes(&self, n_classes: usize) -> Result<()> {
        if self.n_classes() != n_classes {
            return Err(Error::InvalidCostMatrix(format!(
                "the matrix is {m}x{m} but the data has {n_classes} classes",
                m = self.n_classes()
            )));
        }
        Ok(())
    }


    /// Expected cost of each candidate prediction `j`
    /// under the class distribution `p`:
    /// `E[j] = sum_c p[c] * cost[c][j]`.
    pub fn expected_costs(&self, p: &[f64]) -> Vec<f64> {
        let n = self.n_classes();
        (0..n)
            .map(|j| {
                p.iter()
                    .zip(&self.cells)
                    .map(|(pc, row)| pc * row[j])
                    .sum::<f64>()
            })
            .collect()
    }


    /// The prediction that minimizes the expected cost under `p`.
    /// Ties are broken by the lowest label index.
    pub fn min_expected_cost(&self, p: &[f64]) -> usize {
        self.expected_costs(p)
            .into_iter()
            .enumerate()
            .fold((0, f64::INFINITY), |(best, min), (j, e)| {
                if e < min { (j, e) } else { (best, min) }
            })
            .0
    }


    /// Total cost of misclassifying an example of class `actual`,
    /// summed over every prediction.
    pub fn row_cost(&self, actual: usize) -> f64 {
        self.cells[actual].iter().sum()
    }
}


impl TryFrom<Vec<Vec<f64>>> for CostMatrix {
    type Error = Error;

    fn try_from(cells: Vec<Vec<f64>>) -> Result<Self> {
        Self::build(cells.len(), cells)
    }
}


impl From<CostMatrix> for Vec<Vec<f64>> {
    fn from(matrix: CostMatrix) -> Self {
        matrix.cells
    }
}


/// Parses the textual form `"0,1;5,0"`: rows are separated by `;`,
/// cells by `,`.
impl FromStr for CostMatrix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let cells = s.split(';')
            .map(|row| {
                row.split(',')
                    .map(|cell| {
                        let cell = cell.trim();
                        cell.parse::<f64>().map_err(|_| {
                            Error::InvalidCostMatrix(format!(
                                "`{cell}` is not a number"
                            ))
                        })
                    })
                    .collect::<Result<Vec<f64>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Self::try_from(cells)
    }
}


impl fmt::Display for CostMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line = row.iter()
                .map(|c| format!("{c:>8.2}"))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
