//! Defines the typed columns of a [`Dataset`](crate::Dataset)
//! and the schema they form.
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::{Error, Result};


/// The value domain of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeKind {
    /// A real-valued attribute.
    Numeric,
    /// A categorical attribute with a finite, ordered value domain.
    /// Values are stored as the index into this list.
    Nominal(Vec<String>),
}


impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Nominal(values) => write!(f, "{{{}}}", values.join(",")),
        }
    }
}


/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
}


impl Attribute {
    /// Construct a numeric attribute.
    pub fn numeric<T: ToString>(name: T) -> Self {
        Self { name: name.to_string(), kind: AttributeKind::Numeric }
    }


    /// Construct a nominal attribute over the given values.
    pub fn nominal<T, S>(name: T, values: S) -> Self
        where T: ToString,
              S: IntoIterator,
              S::Item: ToString,
    {
        let values = values.into_iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>();
        Self { name: name.to_string(), kind: AttributeKind::Nominal(values) }
    }


    /// Attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }


    /// Attribute kind.
    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }


    /// Returns `true` if this attribute is nominal.
    pub fn is_nominal(&self) -> bool {
        matches!(self.kind, AttributeKind::Nominal(_))
    }


    /// The value domain of a nominal attribute.
    pub fn values(&self) -> Option<&[String]> {
        match &self.kind {
            AttributeKind::Nominal(values) => Some(&values[..]),
            AttributeKind::Numeric => None,
        }
    }


    /// Parse a raw textual value into the stored representation.
    /// Missing values (`?` or empty) become `NaN`.
    /// Returns `None` if the value is not in the domain of this attribute.
    pub fn parse_value(&self, raw: &str) -> Option<f64> {
        let raw = raw.trim();
        if raw.is_empty() || raw == "?" {
            return Some(f64::NAN);
        }
        match &self.kind {
            AttributeKind::Numeric => raw.parse::<f64>().ok(),
            AttributeKind::Nominal(values) => values.iter()
                .position(|v| v == raw)
                .map(|i| i as f64),
        }
    }


    /// Returns `true` if `value` is a legal stored value for this attribute.
    pub(crate) fn accepts(&self, value: f64) -> bool {
        if value.is_nan() {
            return true;
        }
        match &self.kind {
            AttributeKind::Numeric => value.is_finite(),
            AttributeKind::Nominal(values) => {
                value >= 0.0
                    && value.fract() == 0.0
                    && (value as usize) < values.len()
            },
        }
    }
}


/// The ordered attributes of a dataset plus the position of the class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    attributes: Vec<Attribute>,
    class_index: Option<usize>,
}


impl Schema {
    /// Construct a schema without a class attribute.
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self { attributes, class_index: None }
    }


    /// Designate the attribute at `index` as the class.
    pub fn with_class_index(mut self, index: usize) -> Result<Self> {
        if index >= self.attributes.len() {
            return Err(Error::IncompatibleSchema(format!(
                "class index {index} is out of range for {} attributes",
                self.attributes.len()
            )));
        }
        self.class_index = Some(index);
        Ok(self)
    }


    /// Returns the attributes, class included.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes[..]
    }


    /// Returns the number of attributes, class included.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }


    /// Returns `true` if the schema has no attribute.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }


    /// Returns the position of the attribute named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name() == name)
    }


    /// Returns the class index, if set.
    pub fn class_index(&self) -> Option<usize> {
        self.class_index
    }


    /// Returns the class attribute.
    /// Fails if the class is unset or not nominal.
    pub fn class_attribute(&self) -> Result<&Attribute> {
        let index = self.class_index.ok_or_else(|| {
            Error::IncompatibleSchema("the class attribute is not set".into())
        })?;
        let attribute = &self.attributes[index];
        if !attribute.is_nominal() {
            return Err(Error::IncompatibleSchema(format!(
                "the class attribute `{}` is numeric; \
                 classification needs a nominal class",
                attribute.name()
            )));
        }
        Ok(attribute)
    }


    /// Returns the class label domain.
    pub fn class_values(&self) -> Result<&[String]> {
        let attribute = self.class_attribute()?;
        Ok(attribute.values().unwrap_or(&[]))
    }


    /// Returns the number of class labels.
    pub fn n_classes(&self) -> Result<usize> {
        self.class_values().map(|values| values.len())
    }


    /// Returns the textual label of class `index`.
    pub fn class_label(&self, index: usize) -> Option<&str> {
        self.class_values().ok()?
            .get(index)
            .map(|s| s.as_str())
    }


    /// Indices of the attributes that are not the class.
    pub fn feature_indices(&self) -> Vec<usize> {
        (0..self.attributes.len())
            .filter(|&i| Some(i) != self.class_index)
            .collect()
    }


    /// Check whether data conforming to `other` can be fed to a model
    /// trained on data conforming to `self`.
    /// Attribute kinds, their order, nominal domains and the class index
    /// must agree. Attribute names are not compared.
    pub fn check_compatible(&self, other: &Schema) -> Result<()> {
        if self.attributes.len() != other.attributes.len() {
            return Err(Error::SchemaMismatch(format!(
                "expected {} attributes, got {}",
                self.attributes.len(),
                other.attributes.len()
            )));
        }
        if self.class_index != other.class_index {
            return Err(Error::SchemaMismatch(format!(
                "expected class index {:?}, got {:?}",
                self.class_index,
                other.class_index
            )));
        }
        let mismatch = self.attributes.iter()
            .zip(&other.attributes)
            .enumerate()
            .find(|(_, (ours, theirs))| ours.kind() != theirs.kind());
        if let Some((i, (ours, theirs))) = mismatch {
            return Err(Error::SchemaMismatch(format!(
                "attribute #{i} `{}` is {} but `{}` is {}",
                ours.name(), ours.kind(), theirs.name(), theirs.kind(),
            )));
        }
        Ok(())
    }
}
