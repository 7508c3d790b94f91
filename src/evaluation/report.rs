use colored::Colorize;
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::CostMatrix;
use super::confusion_matrix::ConfusionMatrix;


const WIDTH: usize = 10;


/// Per-class detail of a [`Report`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    /// Class label (or `Weighted Avg.` for the averaged row).
    pub label: String,
    /// True positive rate (equals recall).
    pub tp_rate: f64,
    /// False positive rate.
    pub fp_rate: f64,
    /// `count[c][c] / columnSum[c]`, `0` if the column is empty.
    pub precision: f64,
    /// `count[c][c] / rowSum[c]`, `0` if the row is empty.
    pub recall: f64,
    /// Harmonic mean of precision and recall, `0` if both are `0`.
    pub f_measure: f64,
    /// Number of test examples of this class.
    pub support: usize,
}


/// Read-only summary of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    confusion: ConfusionMatrix,
    accuracy: f64,
    kappa: f64,
    classes: Vec<ClassMetrics>,
    weighted: ClassMetrics,
    total_cost: Option<f64>,
}


/// `num / den`, `0` when the denominator is `0`.
fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 { 0.0 } else { num / den }
}


impl Report {
    /// Derive every metric from `confusion`,
    /// and the total cost if `costs` is given.
    pub fn new(confusion: ConfusionMatrix, costs: Option<&CostMatrix>) -> Self {
        let n = confusion.n_classes();
        let total = confusion.total() as f64;
        let accuracy = ratio(confusion.trace() as f64, total);

        let classes = (0..n)
            .map(|c| {
                let tp = confusion.get(c, c) as f64;
                let row = confusion.row_sum(c) as f64;
                let col = confusion.column_sum(c) as f64;

                let precision = ratio(tp, col);
                let recall = ratio(tp, row);
                let f_measure = ratio(
                    2.0 * precision * recall, precision + recall
                );
                ClassMetrics {
                    label: confusion.labels()[c].clone(),
                    tp_rate: recall,
                    fp_rate: ratio(col - tp, total - row),
                    precision,
                    recall,
                    f_measure,
                    support: row as usize,
                }
            })
            .collect::<Vec<_>>();

        let avg = |metric: fn(&ClassMetrics) -> f64| {
            let sum = classes.iter()
                .map(|m| m.support as f64 * metric(m))
                .sum::<f64>();
            ratio(sum, total)
        };
        let weighted = ClassMetrics {
            label: "Weighted Avg.".into(),
            tp_rate: avg(|m| m.tp_rate),
            fp_rate: avg(|m| m.fp_rate),
            precision: avg(|m| m.precision),
            recall: avg(|m| m.recall),
            f_measure: avg(|m| m.f_measure),
            support: confusion.total(),
        };

        // Agreement expected by chance.
        let chance = (0..n)
            .map(|c| {
                confusion.row_sum(c) as f64 * confusion.column_sum(c) as f64
            })
            .sum::<f64>();
        let chance = ratio(chance, total * total);
        let kappa = if total == 0.0 {
            0.0
        } else if (1.0 - chance).abs() < f64::EPSILON {
            if accuracy == 1.0 { 1.0 } else { 0.0 }
        } else {
            (accuracy - chance) / (1.0 - chance)
        };

        let total_cost = costs.map(|costs| {
            (0..n).flat_map(|t| (0..n).map(move |p| (t, p)))
                .map(|(t, p)| confusion.get(t, p) as f64 * costs.get(t, p))
                .sum::<f64>()
        });

        Self { confusion, accuracy, kappa, classes, weighted, total_cost }
    }


    /// The confusion matrix this report was derived from.
    pub fn confusion(&self) -> &ConfusionMatrix {
        &self.confusion
    }


    /// Fraction of correctly classified examples, `0` for an empty test set.
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }


    /// Accuracy as a percentage.
    pub fn pct_correct(&self) -> f64 {
        100.0 * self.accuracy
    }


    /// Number of correctly classified examples.
    pub fn correct(&self) -> usize {
        self.confusion.trace()
    }


    /// Number of misclassified examples.
    pub fn incorrect(&self) -> usize {
        self.confusion.total() - self.confusion.trace()
    }


    /// Number of evaluated examples.
    pub fn total(&self) -> usize {
        self.confusion.total()
    }


    /// Cohen's kappa statistic.
    pub fn kappa(&self) -> f64 {
        self.kappa
    }


    /// Per-class metrics, in label order.
    pub fn classes(&self) -> &[ClassMetrics] {
        &self.classes[..]
    }


    /// Support-weighted averages of the per-class metrics.
    pub fn weighted_average(&self) -> &ClassMetrics {
        &self.weighted
    }


    /// Precision of class `c`.
    pub fn precision(&self, c: usize) -> f64 {
        self.classes[c].precision
    }


    /// Recall of class `c`.
    pub fn recall(&self, c: usize) -> f64 {
        self.classes[c].recall
    }


    /// F-measure of class `c`.
    pub fn f_measure(&self, c: usize) -> f64 {
        self.classes[c].f_measure
    }


    /// Total misclassification cost, if a cost matrix was given.
    pub fn total_cost(&self) -> Option<f64> {
        self.total_cost
    }


    /// Average cost per example, if a cost matrix was given.
    pub fn average_cost(&self) -> Option<f64> {
        self.total_cost.map(|c| ratio(c, self.total() as f64))
    }


    /// The per-class detail table.
    pub fn class_details(&self) -> String {
        let mut lines = vec![format!(
            "{:>WIDTH$} {:>WIDTH$} {:>WIDTH$} {:>WIDTH$} {:>WIDTH$}   {}",
            "TP Rate", "FP Rate", "Precision", "Recall", "F-Measure", "Class",
        )];
        for m in self.classes.iter().chain(std::iter::once(&self.weighted)) {
            lines.push(format!(
                "{:>WIDTH$.3} {:>WIDTH$.3} {:>WIDTH$.3} {:>WIDTH$.3} \
                 {:>WIDTH$.3}   {}",
                m.tp_rate, m.fp_rate, m.precision, m.recall, m.f_measure,
                m.label,
            ));
        }
        lines.join("\n")
    }


    /// The summary block.
    pub fn summary(&self) -> String {
        let total = self.total().max(1) as f64;
        let mut lines = vec![
            format!(
                "{:<36}{:>8}{:>14.4} %",
                "Correctly Classified Instances",
                self.correct(),
                100.0 * self.correct() as f64 / total,
            ),
            format!(
                "{:<36}{:>8}{:>14.4} %",
                "Incorrectly Classified Instances",
                self.incorrect(),
                100.0 * self.incorrect() as f64 / total,
            ),
            format!("{:<36}{:>8.4}", "Kappa statistic", self.kappa),
        ];
        if let (Some(cost), Some(avg)) = (self.total_cost, self.average_cost()) {
            lines.push(format!("{:<36}{:>8.4}", "Total Cost", cost));
            lines.push(format!("{:<36}{:>8.4}", "Average Cost", avg));
        }
        lines.push(format!(
            "{:<36}{:>8}", "Total Number of Instances", self.total()
        ));
        lines.join("\n")
    }
}


impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n{}", "=== Summary ===".bold())?;
        writeln!(f, "{}", self.summary())?;
        writeln!(f, "\n{}", "=== Detailed Accuracy By Class ===".bold())?;
        writeln!(f, "{}", self.class_details())?;
        writeln!(f, "\n{}", "=== Confusion Matrix ===".bold())?;
        write!(f, "{}", self.confusion)
    }
}
