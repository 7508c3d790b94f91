use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::debug;

use super::attribute::{AttributeKind, Schema};
use super::dataset_struct::Dataset;
use super::{arff, csv_reader};
use crate::{Error, Result};


/// Supported dataset file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Attribute-relation file format (`.arff`).
    Arff,
    /// Comma separated values (`.csv`).
    Csv,
}


impl Format {
    /// Guess the format from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref()
            .extension()?
            .to_str()?
            .to_ascii_lowercase();
        match ext.as_str() {
            "arff" => Some(Self::Arff),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}


/// A builder that returns a [`Dataset`].
/// # Example
/// ```no_run
/// use costwise::DatasetReader;
/// let dataset = DatasetReader::default()
///     .file("/path/to/train.arff")
///     .target_feature("class")
///     .read()
///     .unwrap();
/// ```
/// If no target feature is given, the last column is the class.
///
/// A test set should be read with [`DatasetReader::schema`]
/// set to the schema of the training set.
#[derive(Debug, Clone)]
pub struct DatasetReader {
    file: Option<PathBuf>,
    format: Option<Format>,
    has_header: bool,
    target: Option<String>,
    schema: Option<Schema>,
}


impl Default for DatasetReader {
    fn default() -> Self {
        Self {
            file: None,
            format: None,
            has_header: true,
            target: None,
            schema: None,
        }
    }
}


impl DatasetReader {
    /// Set the file name.
    pub fn file<P: AsRef<Path>>(mut self, file: P) -> Self {
        self.file = Some(file.as_ref().to_path_buf());
        self
    }


    /// Set the format explicitly instead of guessing from the extension.
    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }


    /// Set the flag whether a CSV file has the header row or not.
    /// Default is `true`.
    pub fn has_header(mut self, flag: bool) -> Self {
        self.has_header = flag;
        self
    }


    /// Set the column name that is used as the class attribute.
    pub fn target_feature<S: ToString>(mut self, column: S) -> Self {
        self.target = Some(column.to_string());
        self
    }


    /// Read the file against `schema` instead of deriving one from it.
    /// Raw values are mapped into the value domains of `schema`,
    /// and the class index of `schema` replaces the target feature.
    /// A value outside its domain fails the read.
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }


    /// Reads the file based on the arguments.
    /// This method consumes `self`.
    pub fn read(self) -> Result<Dataset> {
        let Self { file, format, has_header, target, schema } = self;
        let file = file
            .ok_or_else(|| Error::Argument("the dataset file is not set".into()))?;

        if !file.is_file() {
            return Err(Error::dataset_load(&file, "file does not exist"));
        }

        let format = format
            .or_else(|| Format::from_path(&file))
            .ok_or_else(|| Error::dataset_load(
                &file,
                "unknown format; expected a .arff or .csv file",
            ))?;

        let (schema, rows) = match (format, schema) {
            (Format::Arff, expected) => {
                let reader = File::open(&file)
                    .map(BufReader::new)
                    .map_err(|e| Error::dataset_load(&file, e))?;
                let (found, rows) = arff::read_arff(reader, &file)?;
                match expected {
                    Some(expected) => {
                        let rows = conform(&file, &found, rows, &expected)?;
                        (expected, rows)
                    },
                    None => with_target(&file, found, rows, target.as_deref())?,
                }
            },
            (Format::Csv, Some(expected)) => {
                let rows = csv_reader::read_csv_as(&file, has_header, &expected)?;
                (expected, rows)
            },
            (Format::Csv, None) => {
                let (found, rows) = csv_reader::read_csv(
                    &file, has_header, target.as_deref()
                )?;
                with_target(&file, found, rows, target.as_deref())?
            },
        };
        let dataset = Dataset::new(schema, rows)?;

        let (n_sample, n_attribute) = dataset.shape();
        debug!(
            "read {n_sample} examples with {n_attribute} attributes from {}",
            file.display()
        );
        Ok(dataset)
    }
}


/// Designate the class of a freshly read schema:
/// the attribute named `target`, or the last one.
fn with_target(
    file: &Path,
    schema: Schema,
    rows: Vec<Vec<f64>>,
    target: Option<&str>,
) -> Result<(Schema, Vec<Vec<f64>>)>
{
    let class_index = match target {
        Some(name) => schema.position(name)
            .ok_or_else(|| Error::dataset_load(
                file,
                format!("the target column `{name}` does not exist"),
            ))?,
        None => schema.len().saturating_sub(1),
    };
    Ok((schema.with_class_index(class_index)?, rows))
}


/// Re-encode `rows`, read under the declared schema `found`,
/// into the value domains of `expected`.
/// Nominal values are matched by name, so the order of a declared
/// domain and values never used in the file do not matter.
fn conform(
    file: &Path,
    found: &Schema,
    mut rows: Vec<Vec<f64>>,
    expected: &Schema,
) -> Result<Vec<Vec<f64>>>
{
    if found.len() != expected.len() {
        return Err(Error::SchemaMismatch(format!(
            "expected {} attributes, `{}` declares {}",
            expected.len(),
            file.display(),
            found.len()
        )));
    }

    for (j, (ours, theirs)) in expected.attributes()
        .iter()
        .zip(found.attributes())
        .enumerate()
    {
        let (ours_values, theirs_values) = match (ours.kind(), theirs.kind()) {
            (AttributeKind::Numeric, AttributeKind::Numeric) => continue,
            (AttributeKind::Nominal(a), AttributeKind::Nominal(b)) => (a, b),
            _ => return Err(Error::SchemaMismatch(format!(
                "attribute #{j} `{}` is {} but `{}` is {}",
                ours.name(), ours.kind(), theirs.name(), theirs.kind(),
            ))),
        };

        let index = theirs_values.iter()
            .map(|v| ours_values.iter().position(|u| u == v))
            .collect::<Vec<_>>();
        for (r, row) in rows.iter_mut().enumerate() {
            let value = row[j];
            if value.is_nan() { continue; }
            let i = value as usize;
            row[j] = match index[i] {
                Some(k) => k as f64,
                None => return Err(Error::dataset_load(file, format!(
                    "record {}: `{}` is not a valid value of `{}`",
                    r + 1,
                    theirs_values[i],
                    ours.name()
                ))),
            };
        }
    }
    Ok(rows)
}
