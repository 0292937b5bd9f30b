//! Recursive directory removal that never follows symbolic links.

use std::fs;
use std::path::Path;

use crate::core::errors::{Result, TflError};

/// Remove `directory` and everything beneath it.
///
/// Symlinks inside the tree are unlinked, never traversed. A `directory` that
/// is itself a symlink is refused with `SafetyVeto` so nothing outside the
/// named tree can be removed.
pub fn delete_directory(directory: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(directory).map_err(|e| TflError::io(directory, e))?;
    if meta.file_type().is_symlink() {
        return Err(TflError::SafetyVeto {
            path: directory.to_path_buf(),
            reason: "refusing to delete through a symbolic link".to_string(),
        });
    }
    if !meta.is_dir() {
        return Err(TflError::SafetyVeto {
            path: directory.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }
    remove_tree(directory)
}

fn remove_tree(directory: &Path) -> Result<()> {
    let entries = fs::read_dir(directory).map_err(|e| TflError::io(directory, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| TflError::io(directory, e))?;
        let path = entry.path();
        // `DirEntry::file_type` does not follow symlinks.
        let file_type = entry.file_type().map_err(|e| TflError::io(&path, e))?;
        if file_type.is_dir() {
            remove_tree(&path)?;
        } else {
            fs::remove_file(&path).map_err(|e| TflError::io(&path, e))?;
        }
    }
    fs::remove_dir(directory).map_err(|e| TflError::io(directory, e))
}
