use polars::prelude::*;

use std::collections::BTreeSet;

use super::attribute::{Attribute, Schema};
use crate::{Error, Result};


/// Struct `Dataset` holds a labeled table in a column-major layout.
///
/// Each column corresponds to one attribute of the [`Schema`].
/// Nominal values are stored as the index into the attribute domain,
/// missing values are stored as `NaN`.
/// A `Dataset` is immutable once constructed, except that the class
/// attribute can be designated while the dataset is being assembled
/// (see [`Dataset::set_target`]).
#[derive(Debug, Clone)]
pub struct Dataset {
    pub(super) schema: Schema,
    pub(super) columns: Vec<Vec<f64>>,
    pub(super) n_sample: usize,
}


impl Dataset {
    /// Construct a dataset from row-major values.
    /// Every row must have one value per attribute,
    /// and every value must belong to the attribute domain.
    pub fn new(schema: Schema, rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_attribute = schema.len();
        let n_sample = rows.len();
        let mut columns = vec![Vec::with_capacity(n_sample); n_attribute];

        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != n_attribute {
                return Err(Error::IncompatibleSchema(format!(
                    "row {r} has {} values, the schema has {n_attribute} \
                     attributes",
                    row.len()
                )));
            }
            for (c, value) in row.into_iter().enumerate() {
                columns[c].push(value);
            }
        }

        Self::from_columns(schema, columns)
    }


    pub(super) fn from_columns(schema: Schema, columns: Vec<Vec<f64>>)
        -> Result<Self>
    {
        if columns.len() != schema.len() {
            return Err(Error::IncompatibleSchema(format!(
                "{} columns given for {} attributes",
                columns.len(),
                schema.len()
            )));
        }
        let n_sample = columns.first().map_or(0, |c| c.len());

        for (attribute, column) in schema.attributes().iter().zip(&columns) {
            if column.len() != n_sample {
                return Err(Error::IncompatibleSchema(format!(
                    "column `{}` has {} values, expected {n_sample}",
                    attribute.name(),
                    column.len()
                )));
            }
            if let Some(row) = column.iter().position(|&x| !attribute.accepts(x)) {
                return Err(Error::IncompatibleSchema(format!(
                    "value {} at row {row} is outside the domain of `{}`",
                    column[row],
                    attribute.name()
                )));
            }
        }

        Ok(Self { schema, columns, n_sample })
    }


    /// Convert a `polars::DataFrame` into a `Dataset`
    /// whose class is the column named `target`.
    ///
    /// String columns become nominal attributes over their sorted
    /// distinct values; other columns are cast to `f64`.
    /// A numeric `target` column becomes nominal over its distinct values.
    pub fn from_dataframe(data: &DataFrame, target: &str) -> Result<Self> {
        let mut attributes = Vec::with_capacity(data.width());
        let mut columns = Vec::with_capacity(data.width());

        for series in data.get_columns() {
            let name = series.name();
            let (attribute, column) = match series.dtype() {
                DataType::Utf8 => nominal_from_strings(name, series)?,
                _ if name == target => nominal_from_numbers(name, series)?,
                _ => {
                    let casted = series.cast(&DataType::Float64)?;
                    let column = casted.f64()?
                        .into_iter()
                        .map(|x| x.unwrap_or(f64::NAN))
                        .collect::<Vec<_>>();
                    (Attribute::numeric(name), column)
                },
            };
            attributes.push(attribute);
            columns.push(column);
        }

        let schema = Schema::new(attributes);
        let class_index = schema.position(target)
            .ok_or_else(|| Error::IncompatibleSchema(format!(
                "the target column `{target}` does not exist"
            )))?;
        let schema = schema.with_class_index(class_index)?;

        Self::from_columns(schema, columns)
    }


    /// Set the attribute named `target` as the class attribute.
    pub fn set_target<S: AsRef<str>>(mut self, target: S) -> Result<Self> {
        let target = target.as_ref();
        let index = self.schema.position(target)
            .ok_or_else(|| Error::IncompatibleSchema(format!(
                "the target column `{target}` does not exist"
            )))?;
        self.schema = self.schema.with_class_index(index)?;
        Ok(self)
    }


    /// Set the attribute at `index` as the class attribute.
    pub fn set_class_index(mut self, index: usize) -> Result<Self> {
        self.schema = self.schema.with_class_index(index)?;
        Ok(self)
    }


    /// Returns the schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }


    /// Returns the pair of the number of examples and
    /// the number of attributes (class included).
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.columns.len())
    }


    /// Returns `true` if the dataset has no example.
    pub fn is_empty(&self) -> bool {
        self.n_sample == 0
    }


    /// Returns the column of attribute `attr`.
    pub fn column(&self, attr: usize) -> &[f64] {
        &self.columns[attr][..]
    }


    /// Returns the value of attribute `attr` at example `row`.
    #[inline]
    pub fn value(&self, row: usize, attr: usize) -> f64 {
        self.columns[attr][row]
    }


    /// Returns the `row`-th example as a vector of stored values.
    pub fn at(&self, row: usize) -> Vec<f64> {
        self.columns.iter()
            .map(|column| column[row])
            .collect()
    }


    /// Returns the class index.
    /// Fails if the class is unset or not nominal.
    pub fn class_index(&self) -> Result<usize> {
        self.schema.class_attribute()?;
        // `class_attribute` succeeded, so the index is set.
        self.schema.class_index()
            .ok_or_else(|| Error::IncompatibleSchema(
                "the class attribute is not set".into()
            ))
    }


    /// Returns the number of class labels.
    pub fn n_classes(&self) -> Result<usize> {
        self.schema.n_classes()
    }


    /// Returns the class label of the `row`-th example,
    /// or `None` if the class is unset or the label is missing.
    #[inline]
    pub fn label(&self, row: usize) -> Option<usize> {
        let index = self.schema.class_index()?;
        let y = self.columns[index][row];
        if y.is_nan() { None } else { Some(y as usize) }
    }


    /// Returns the indices of the examples whose label is present.
    pub fn labeled_rows(&self) -> Result<Vec<usize>> {
        let index = self.class_index()?;
        let rows = self.columns[index].iter()
            .enumerate()
            .filter_map(|(i, y)| (!y.is_nan()).then_some(i))
            .collect();
        Ok(rows)
    }


    /// Returns the number of labeled examples per class.
    pub fn class_counts(&self) -> Result<Vec<usize>> {
        let mut counts = vec![0_usize; self.n_classes()?];
        for row in self.labeled_rows()? {
            if let Some(y) = self.label(row) {
                counts[y] += 1;
            }
        }
        Ok(counts)
    }
}


fn nominal_from_strings(name: &str, series: &Series)
    -> Result<(Attribute, Vec<f64>)>
{
    let values = series.utf8()?;
    let domain = values.into_iter()
        .flatten()
        .map(String::from)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();

    let column = values.into_iter()
        .map(|v| {
            v.and_then(|v| domain.iter().position(|d| d == v))
                .map_or(f64::NAN, |i| i as f64)
        })
        .collect::<Vec<_>>();

    Ok((Attribute::nominal(name, domain), column))
}


fn nominal_from_numbers(name: &str, series: &Series)
    -> Result<(Attribute, Vec<f64>)>
{
    let casted = series.cast(&DataType::Float64)?;
    let raw = casted.f64()?
        .into_iter()
        .collect::<Vec<Option<f64>>>();

    let mut domain = raw.iter()
        .flatten()
        .copied()
        .collect::<Vec<f64>>();
    domain.sort_by(|a, b| a.total_cmp(b));
    domain.dedup();

    let column = raw.into_iter()
        .map(|v| {
            v.and_then(|v| domain.iter().position(|d| *d == v))
                .map_or(f64::NAN, |i| i as f64)
        })
        .collect::<Vec<_>>();

    let labels = domain.iter().map(|v| v.to_string());
    Ok((Attribute::nominal(name, labels), column))
}
