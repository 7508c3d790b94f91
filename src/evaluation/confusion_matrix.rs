use serde::{Serialize, Deserialize};

use std::fmt;


/// Cross-tabulation of true against predicted labels,
/// indexed as `count[true][predicted]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    labels: Vec<String>,
    counts: Vec<Vec<usize>>,
}


impl ConfusionMatrix {
    /// An all-zero matrix over the given class labels.
    pub fn new(labels: Vec<String>) -> Self {
        let n = labels.len();
        Self { labels, counts: vec![vec![0; n]; n] }
    }


    /// Number of class labels.
    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }


    /// Class labels, in index order.
    pub fn labels(&self) -> &[String] {
        &self.labels[..]
    }


    /// Record one example of class `actual` predicted as `predicted`.
    #[inline]
    pub fn increment(&mut self, actual: usize, predicted: usize) {
        self.counts[actual][predicted] += 1;
    }


    /// Per-cell sum of two matrices over the same labels.
    pub fn merge(mut self, other: Self) -> Self {
        debug_assert_eq!(self.labels, other.labels);
        self.counts.iter_mut()
            .flatten()
            .zip(other.counts.into_iter().flatten())
            .for_each(|(a, b)| *a += b);
        self
    }


    /// Number of examples of class `actual` predicted as `predicted`.
    #[inline]
    pub fn get(&self, actual: usize, predicted: usize) -> usize {
        self.counts[actual][predicted]
    }


    /// Returns the rows of the matrix.
    pub fn rows(&self) -> &[Vec<usize>] {
        &self.counts[..]
    }


    /// Number of examples whose true class is `actual`.
    pub fn row_sum(&self, actual: usize) -> usize {
        self.counts[actual].iter().sum()
    }


    /// Number of examples predicted as `predicted`.
    pub fn column_sum(&self, predicted: usize) -> usize {
        self.counts.iter().map(|row| row[predicted]).sum()
    }


    /// Number of correctly classified examples.
    pub fn trace(&self) -> usize {
        (0..self.n_classes()).map(|c| self.counts[c][c]).sum()
    }


    /// Number of examples.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}


/// Spreadsheet-like column names: `a, b, ..., z, aa, ab, ...`.
fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'a' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8(name).unwrap_or_default()
}


impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = (0..self.n_classes())
            .map(column_name)
            .collect::<Vec<_>>();
        let width = self.counts.iter()
            .flatten()
            .map(|c| c.to_string().len())
            .chain(names.iter().map(|n| n.len()))
            .max()
            .unwrap_or(1)
            + 1;

        for name in &names {
            write!(f, " {name:>width$}")?;
        }
        writeln!(f, "   <-- classified as")?;

        for (i, row) in self.counts.iter().enumerate() {
            for count in row {
                write!(f, " {count:>width$}")?;
            }
            writeln!(f, " | {:>width$} = {}", names[i], self.labels[i])?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names() {
        assert_eq!(column_name(0), "a");
        assert_eq!(column_name(25), "z");
        assert_eq!(column_name(26), "aa");
        assert_eq!(column_name(27), "ab");
    }
}
