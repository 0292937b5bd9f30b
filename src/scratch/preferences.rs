//! Candidate scratch roots from the user's preferences file.
//!
//! Format: one directory per line, UTF-8, surrounding whitespace ignored.
//! File order is search order. Blank lines are skipped, as are lines starting
//! with `#` when comment skipping is enabled.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::errors::{Result, TflError};

/// Read the ordered candidate list at `path`.
///
/// A missing file yields an empty list. Any other read failure propagates.
pub fn read_candidates(path: &Path, skip_comment_lines: bool) -> Result<Vec<PathBuf>> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(parse_candidates(&raw, skip_comment_lines)),
        Err(source) if source.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(source) => Err(TflError::io(path, source)),
    }
}

/// Parse preferences text into candidate roots.
pub fn parse_candidates(raw: &str, skip_comment_lines: bool) -> Vec<PathBuf> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !(skip_comment_lines && line.starts_with('#')))
        .map(PathBuf::from)
        .collect()
}
