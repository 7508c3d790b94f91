//! Reads a CSV file into a schema and row-major values.
//!
//! Column kinds are inferred: a column whose non-missing values all parse
//! as numbers is numeric, any other column is nominal over its sorted
//! distinct values. The class column is always nominal.
//! A test set is read against the training schema instead,
//! so that both share one value domain per attribute.
use std::collections::BTreeSet;
use std::path::Path;

use super::attribute::{Attribute, Schema};
use crate::{Error, Result};


/// Read `path`. `class_column` names the column that must be nominal;
/// `None` means the last column.
pub(super) fn read_csv(
    path: &Path,
    has_header: bool,
    class_column: Option<&str>,
) -> Result<(Schema, Vec<Vec<f64>>)>
{
    let (names, records) = read_records(path, has_header)?;

    let class_position = match class_column {
        Some(name) => names.iter()
            .position(|n| n == name)
            .ok_or_else(|| Error::dataset_load(
                path,
                format!("the target column `{name}` does not exist"),
            ))?,
        None => names.len() - 1,
    };

    let attributes = names.iter()
        .enumerate()
        .map(|(j, name)| {
            let cells = records.iter().map(|r| r[j].as_str());
            infer_attribute(name, cells, j == class_position)
        })
        .collect::<Vec<_>>();

    let rows = parse_rows(path, &attributes, &records)?;
    Ok((Schema::new(attributes), rows))
}


/// Read `path` against a known schema instead of inferring one.
/// Columns are matched by position and every value must lie
/// in the domain of its attribute.
pub(super) fn read_csv_as(
    path: &Path,
    has_header: bool,
    schema: &Schema,
) -> Result<Vec<Vec<f64>>>
{
    let (names, records) = read_records(path, has_header)?;
    if names.len() != schema.len() {
        return Err(Error::SchemaMismatch(format!(
            "expected {} columns, `{}` has {}",
            schema.len(),
            path.display(),
            names.len()
        )));
    }
    parse_rows(path, schema.attributes(), &records)
}


/// Column names and raw cells.
/// Without a header the columns are named `Feat. [i]`.
fn read_records(path: &Path, has_header: bool)
    -> Result<(Vec<String>, Vec<Vec<String>>)>
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_path(path)
        .map_err(|e| Error::dataset_load(path, e))?;

    let records = reader.records()
        .map(|record| {
            record.map(|r| r.iter().map(String::from).collect::<Vec<_>>())
        })
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::dataset_load(path, e))?;

    let names = if has_header {
        reader.headers()
            .map_err(|e| Error::dataset_load(path, e))?
            .iter()
            .map(String::from)
            .collect::<Vec<_>>()
    } else {
        let n_column = records.first().map_or(0, |r| r.len());
        (1..=n_column).map(|i| format!("Feat. [{i}]")).collect()
    };

    if names.is_empty() {
        return Err(Error::dataset_load(path, "the file has no column"));
    }
    Ok((names, records))
}


fn parse_rows(
    path: &Path,
    attributes: &[Attribute],
    records: &[Vec<String>],
) -> Result<Vec<Vec<f64>>>
{
    records.iter()
        .enumerate()
        .map(|(r, record)| {
            attributes.iter()
                .zip(record)
                .map(|(attribute, raw)| {
                    attribute.parse_value(raw).ok_or_else(|| {
                        Error::dataset_load(path, format!(
                            "record {}: `{raw}` is not a valid value of `{}`",
                            r + 1,
                            attribute.name()
                        ))
                    })
                })
                .collect::<Result<Vec<f64>>>()
        })
        .collect()
}


fn is_missing(raw: &str) -> bool {
    raw.is_empty() || raw == "?"
}


fn infer_attribute<'a, I>(name: &str, cells: I, force_nominal: bool)
    -> Attribute
    where I: Iterator<Item = &'a str> + Clone,
{
    let present = cells.filter(|raw| !is_missing(raw));
    let numeric = present.clone().all(|raw| raw.parse::<f64>().is_ok());

    if numeric && !force_nominal {
        return Attribute::numeric(name);
    }

    let mut domain = Vec::new();
    if numeric {
        let mut values = present
            .map(|raw| (raw.parse::<f64>().unwrap_or(f64::NAN), raw))
            .collect::<Vec<_>>();
        values.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(b.1)));
        values.dedup_by(|a, b| a.1 == b.1);
        domain.extend(values.into_iter().map(|(_, raw)| raw.to_string()));
    } else {
        let values = present.collect::<BTreeSet<_>>();
        domain.extend(values.into_iter().map(String::from));
    }
    Attribute::nominal(name, domain)
}
