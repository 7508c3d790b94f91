//! A reader for the dense subset of the ARFF (attribute-relation file)
//! format.
//!
//! ```txt
//! % comment
//! @relation weather
//! @attribute outlook {sunny, overcast, rainy}
//! @attribute temperature numeric
//! @attribute play {yes, no}
//! @data
//! sunny,85,no
//! overcast,?,yes
//! ```
use std::io::BufRead;
use std::path::Path;

use super::attribute::{Attribute, Schema};
use crate::{Error, Result};


/// Parse an ARFF stream into its schema and row-major values.
/// The returned schema has no class attribute yet.
pub(super) fn read_arff<R: BufRead>(reader: R, path: &Path)
    -> Result<(Schema, Vec<Vec<f64>>)>
{
    let mut attributes: Vec<Attribute> = Vec::new();
    let mut rows = Vec::new();
    let mut in_data = false;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::dataset_load(path, e))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        let at = |reason: String| {
            Error::dataset_load(path, format!("line {}: {reason}", line_no + 1))
        };

        if in_data {
            if line.starts_with('{') {
                return Err(at("sparse ARFF rows are not supported".into()));
            }
            let fields = split_quoted(line, ',');
            if fields.len() != attributes.len() {
                return Err(at(format!(
                    "expected {} values, got {}",
                    attributes.len(),
                    fields.len()
                )));
            }
            let row = attributes.iter()
                .zip(&fields)
                .map(|(attribute, raw)| {
                    let raw = unquote(raw);
                    attribute.parse_value(&raw).ok_or_else(|| at(format!(
                        "`{raw}` is not a valid value of `{}`",
                        attribute.name()
                    )))
                })
                .collect::<Result<Vec<f64>>>()?;
            rows.push(row);
            continue;
        }

        let lower = line.to_ascii_lowercase();
        if lower.starts_with("@relation") {
            continue;
        } else if lower.starts_with("@attribute") {
            let attribute = parse_attribute(&line["@attribute".len()..])
                .map_err(at)?;
            attributes.push(attribute);
        } else if lower.starts_with("@data") {
            if attributes.is_empty() {
                return Err(at("no attribute declared before @data".into()));
            }
            in_data = true;
        } else {
            return Err(at(format!("unexpected header line `{line}`")));
        }
    }

    if !in_data {
        return Err(Error::dataset_load(path, "missing @data section"));
    }
    Ok((Schema::new(attributes), rows))
}


/// Parse the part of an `@attribute` declaration after the keyword.
fn parse_attribute(decl: &str) -> std::result::Result<Attribute, String> {
    let decl = decl.trim();
    let (name, rest) = split_name(decl)?;
    let rest = rest.trim();

    if let Some(inner) = rest.strip_prefix('{') {
        let inner = inner.strip_suffix('}')
            .ok_or_else(|| format!("unterminated value list for `{name}`"))?;
        let values = split_quoted(inner, ',')
            .iter()
            .map(|v| unquote(v))
            .collect::<Vec<_>>();
        if values.is_empty() {
            return Err(format!("empty value list for `{name}`"));
        }
        return Ok(Attribute::nominal(name, values));
    }

    match rest.to_ascii_lowercase().as_str() {
        "numeric" | "real" | "integer" => Ok(Attribute::numeric(name)),
        other => Err(format!(
            "attribute `{name}` has unsupported type `{other}`"
        )),
    }
}


/// Split an attribute declaration into its (unquoted) name and the rest.
fn split_name(decl: &str) -> std::result::Result<(String, &str), String> {
    let mut chars = decl.char_indices();
    match chars.next() {
        Some((_, q @ ('\'' | '"'))) => {
            let end = chars.find(|&(_, c)| c == q)
                .map(|(i, _)| i)
                .ok_or_else(|| format!("unterminated quote in `{decl}`"))?;
            Ok((decl[1..end].to_string(), &decl[end + 1..]))
        },
        Some(_) => {
            let end = decl.find(|c: char| c.is_whitespace() || c == '{')
                .ok_or_else(|| format!("missing type in `{decl}`"))?;
            Ok((decl[..end].to_string(), &decl[end..]))
        },
        None => Err("empty attribute declaration".into()),
    }
}


/// Split `line` on `sep`, ignoring separators inside quotes.
pub(super) fn split_quoted(line: &str, sep: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in line.chars() {
        if escaped {
            field.push(c);
            escaped = false;
            continue;
        }
        match (c, quote) {
            ('\\', Some(_)) => { escaped = true; field.push(c); },
            (q, Some(open)) if q == open => { quote = None; field.push(c); },
            ('\'' | '"', None) => { quote = Some(c); field.push(c); },
            (s, None) if s == sep => {
                fields.push(std::mem::take(&mut field));
            },
            _ => field.push(c),
        }
    }
    if !field.trim().is_empty() || !fields.is_empty() {
        fields.push(field);
    }
    fields
}


/// Strip surrounding quotes and escapes from a token.
pub(super) fn unquote(token: &str) -> String {
    let token = token.trim();
    let quoted = token.len() >= 2
        && ((token.starts_with('\'') && token.ends_with('\''))
            || (token.starts_with('"') && token.ends_with('"')));
    if !quoted {
        return token.to_string();
    }

    let mut out = String::with_capacity(token.len());
    let mut escaped = false;
    for c in token[1..token.len() - 1].chars() {
        if escaped || c != '\\' {
            out.push(c);
            escaped = false;
        } else {
            escaped = true;
        }
    }
    out
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_fields_keep_separators() {
        let fields = split_quoted("'a,b',c, \"d\"", ',');
        assert_eq!(fields.len(), 3);
        assert_eq!(unquote(&fields[0]), "a,b");
        assert_eq!(unquote(&fields[2]), "d");
    }


    #[test]
    fn attribute_declarations() {
        let attr = parse_attribute(" 'petal width' REAL").unwrap();
        assert_eq!(attr.name(), "petal width");
        assert!(!attr.is_nominal());

        let attr = parse_attribute(" class{yes, 'no way'}").unwrap();
        assert_eq!(attr.values().unwrap(), &["yes", "no way"]);

        assert!(parse_attribute(" when date").is_err());
    }
}
