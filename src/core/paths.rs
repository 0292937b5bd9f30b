//! Well-known locations under the user's home directory.

use std::env;
use std::path::{Path, PathBuf};

/// File name of the scratch-root preferences file in the home directory.
pub const PREFERENCES_FILE_NAME: &str = ".galagotmp";

/// The user's home directory, from `HOME`.
///
/// Falls back to the system temporary directory when `HOME` is unset so that
/// lookups of optional per-user files degrade to "not found" instead of
/// failing outright.
pub fn home_dir() -> PathBuf {
    env::var_os("HOME")
        .filter(|raw| !raw.is_empty())
        .map_or_else(
            || {
                eprintln!("[TFL-CONFIG] WARNING: HOME not set, falling back to temp dir");
                env::temp_dir()
            },
            PathBuf::from,
        )
}

/// `<home>/.galagotmp`.
pub fn default_preferences_path() -> PathBuf {
    home_dir().join(PREFERENCES_FILE_NAME)
}

/// `<home>/.config/tupleflow/config.toml`.
pub fn default_config_path() -> PathBuf {
    home_dir()
        .join(".config")
        .join("tupleflow")
        .join("config.toml")
}

/// Expand a leading `~` component against `home`.
///
/// Only a bare `~` or a `~/` prefix is expanded; `~user` forms are returned
/// unchanged.
pub fn expand_home(path: &Path, home: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) if rest.as_os_str().is_empty() => home.to_path_buf(),
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}
