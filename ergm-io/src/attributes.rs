//! Whitespace-separated attribute tables: a header line naming the
//! attribute, then one data line per node, `NA` (case-insensitive) marking
//! a missing value.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ergm_core::NodeAttributes;

use crate::errors::AttributeError;

const MISSING_MARKER: &str = "NA";

/// Reads a binary (`0`/`1`) attribute table.
///
/// # Errors
/// Returns [`AttributeError`] if the file cannot be opened or read, or a
/// data value is neither `0`, `1`, nor the missing marker.
pub fn read_binary_attribute(path: &Path) -> Result<(String, NodeAttributes), AttributeError> {
    let (name, rows) = read_table(path)?;
    let values = rows
        .into_iter()
        .enumerate()
        .map(|(index, token)| parse_value(index + 1, &token, "binary", |text| match text {
            "0" => Some(false),
            "1" => Some(true),
            _ => None,
        }))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((name, NodeAttributes::Binary(values)))
}

/// Reads a categorical (small-integer) attribute table.
///
/// # Errors
/// Returns [`AttributeError`] if the file cannot be opened or read, or a
/// data value is neither an integer nor the missing marker.
pub fn read_categorical_attribute(path: &Path) -> Result<(String, NodeAttributes), AttributeError> {
    let (name, rows) = read_table(path)?;
    let values = rows
        .into_iter()
        .enumerate()
        .map(|(index, token)| {
            parse_value(index + 1, &token, "categorical", |text| text.parse::<i64>().ok())
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok((name, NodeAttributes::Categorical(values)))
}

/// Reads a continuous (real-valued) attribute table.
///
/// # Errors
/// Returns [`AttributeError`] if the file cannot be opened or read, or a
/// data value is neither a real number nor the missing marker.
pub fn read_continuous_attribute(path: &Path) -> Result<(String, NodeAttributes), AttributeError> {
    let (name, rows) = read_table(path)?;
    let values = rows
        .into_iter()
        .enumerate()
        .map(|(index, token)| {
            parse_value(index + 1, &token, "continuous", |text| text.parse::<f64>().ok())
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok((name, NodeAttributes::Continuous(values)))
}

/// Reads a set-valued attribute table; each data row is a comma-separated
/// list of integers (e.g. `1,2,5`) or the missing marker.
///
/// # Errors
/// Returns [`AttributeError`] if the file cannot be opened or read, or a
/// data row contains a non-integer element.
pub fn read_set_attribute(path: &Path) -> Result<(String, NodeAttributes), AttributeError> {
    let (name, rows) = read_table(path)?;
    let values = rows
        .into_iter()
        .enumerate()
        .map(|(index, token)| {
            if token.eq_ignore_ascii_case(MISSING_MARKER) {
                return Ok(None);
            }
            token
                .split(',')
                .map(|element| element.trim().parse::<i64>())
                .collect::<Result<HashSet<_>, _>>()
                .map(Some)
                .map_err(|_source| AttributeError::MalformedValue {
                    line: index + 1,
                    text: token.clone(),
                    kind: "set-valued",
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok((name, NodeAttributes::SetValued(values)))
}

/// Reads a snowball zone-assignment file: one non-negative integer per node,
/// no header line, no missing marker (every node belongs to a zone).
///
/// # Errors
/// Returns [`AttributeError`] if the file cannot be opened or read, or a
/// line is not a non-negative integer.
pub fn read_zone_file(path: &Path) -> Result<Vec<u32>, AttributeError> {
    let file = File::open(path).map_err(|source| AttributeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    BufReader::new(file)
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = match line {
                Ok(line) => line,
                Err(source) => {
                    return Some(Err(AttributeError::Io {
                        path: path.to_path_buf(),
                        source,
                    }));
                }
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return None;
            }
            Some(trimmed.parse::<u32>().map_err(|_source| AttributeError::MalformedValue {
                line: index + 1,
                text: trimmed.to_owned(),
                kind: "zone",
            }))
        })
        .collect()
}

fn read_table(path: &Path) -> Result<(String, Vec<String>), AttributeError> {
    let file = File::open(path).map_err(|source| AttributeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut lines = BufReader::new(file).lines();
    let header = lines
        .next()
        .ok_or_else(|| AttributeError::EmptyFile {
            path: path.to_path_buf(),
        })?
        .map_err(|source| AttributeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let name = header.trim().to_owned();

    let mut rows = Vec::new();
    for line in lines {
        let line = line.map_err(|source| AttributeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        rows.push(trimmed.to_owned());
    }
    Ok((name, rows))
}

fn parse_value<T>(
    line: usize,
    token: &str,
    kind: &'static str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<Option<T>, AttributeError> {
    if token.eq_ignore_ascii_case(MISSING_MARKER) {
        return Ok(None);
    }
    parse(token).map(Some).ok_or_else(|| AttributeError::MalformedValue {
        line,
        text: token.to_owned(),
        kind,
    })
}

#[cfg(test)]
mod tests;
