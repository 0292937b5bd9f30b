//! TFL-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, TflError>;

/// Top-level error type for the TupleFlow utilities.
#[derive(Debug, Error)]
pub enum TflError {
    #[error("[TFL-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[TFL-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[TFL-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[TFL-1101] unsupported platform: {details}")]
    UnsupportedPlatform { details: String },

    #[error("[TFL-2001] filesystem stats failure for {path}: {details}")]
    FsStats { path: PathBuf, details: String },

    #[error("[TFL-2003] safety veto for {path}: {reason}")]
    SafetyVeto { path: PathBuf, reason: String },

    #[error("[TFL-2201] invalid UTF-8 payload: {source}")]
    Decode {
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("[TFL-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TflError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "TFL-1001",
            Self::MissingConfig { .. } => "TFL-1002",
            Self::ConfigParse { .. } => "TFL-1003",
            Self::UnsupportedPlatform { .. } => "TFL-1101",
            Self::FsStats { .. } => "TFL-2001",
            Self::SafetyVeto { .. } => "TFL-2003",
            Self::Decode { .. } => "TFL-2201",
            Self::Io { .. } => "TFL-3002",
        }
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// IO error for output that could not be interpreted (e.g. `df`).
    #[must_use]
    pub fn invalid_data(path: impl AsRef<Path>, details: impl Into<String>) -> Self {
        Self::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidData, details.into()),
        )
    }
}

impl From<toml::de::Error> for TflError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}

impl From<std::str::Utf8Error> for TflError {
    fn from(source: std::str::Utf8Error) -> Self {
        Self::Decode { source }
    }
}
