//! Read a text file as a set of lines.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::core::errors::{Result, TflError};

/// Distinct trimmed lines of `path`. Blank lines are not included.
pub fn read_line_set(path: &Path) -> Result<HashSet<String>> {
    let raw = fs::read_to_string(path).map_err(|source| TflError::io(path, source))?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}
