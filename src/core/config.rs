//! Configuration system: TOML file + env var overrides + smart defaults.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::errors::{Result, TflError};
use crate::core::paths;

/// One gibibyte, the default free-space requirement for scratch files.
pub const DEFAULT_REQUIRED_BYTES: u64 = 1024 * 1024 * 1024;

/// Full configuration model.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub scratch: ScratchConfig,
    pub probe: ProbeConfig,
    pub logging: LoggingConfig,
}

/// Temporary-file placement policy.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScratchConfig {
    /// Line-oriented list of candidate scratch roots.
    pub preferences_file: PathBuf,
    /// Free space a candidate must have when the caller gives no hint.
    pub default_required_bytes: u64,
    /// File-name prefix of created scratch files.
    pub prefix: String,
    /// Directory used when no candidate qualifies. `None` = system temp dir.
    pub fallback_dir: Option<PathBuf>,
    /// Ignore preference lines starting with `#`.
    pub skip_comment_lines: bool,
}

/// Free-space probe behavior.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProbeConfig {
    /// Ask the OS directly before shelling out to `df`.
    pub prefer_native: bool,
    /// Program invoked as `<df_program> -Pk <path>` by the fallback.
    pub df_program: String,
    /// How often the fallback checks the child and the cancel token.
    pub poll_interval_ms: u64,
}

/// JSONL activity log settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file. `None` writes records to stderr.
    pub jsonl_log: Option<PathBuf>,
    pub max_size_bytes: u64,
    pub max_rotated_files: u32,
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            preferences_file: paths::default_preferences_path(),
            default_required_bytes: DEFAULT_REQUIRED_BYTES,
            prefix: "tupleflow".to_string(),
            fallback_dir: None,
            skip_comment_lines: true,
        }
    }
}

impl ScratchConfig {
    /// Directory that receives scratch files when no candidate qualifies.
    #[must_use]
    pub fn effective_fallback_dir(&self) -> PathBuf {
        self.fallback_dir.clone().unwrap_or_else(env::temp_dir)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            prefer_native: true,
            df_program: "df".to_string(),
            poll_interval_ms: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            jsonl_log: None,
            max_size_bytes: 10 * 1024 * 1024,
            max_rotated_files: 3,
        }
    }
}

impl Config {
    /// Default configuration path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        paths::default_config_path()
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from default path; defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| TflError::Io {
                path: path_buf.clone(),
                source,
            })?;
            toml::from_str::<Self>(&raw)?
        } else if path.is_some() {
            return Err(TflError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.apply_env_overrides_from(env_var)?;
        cfg.expand_paths(&paths::home_dir());
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_env_overrides_from<F>(&mut self, mut lookup: F) -> Result<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("TUPLEFLOW_PREFERENCES_FILE") {
            self.scratch.preferences_file = PathBuf::from(raw);
        }
        if let Some(raw) = lookup("TUPLEFLOW_REQUIRED_BYTES") {
            self.scratch.default_required_bytes = parse_env_u64("TUPLEFLOW_REQUIRED_BYTES", &raw)?;
        }
        if let Some(raw) = lookup("TUPLEFLOW_SCRATCH_PREFIX") {
            self.scratch.prefix = raw;
        }
        if let Some(raw) = lookup("TUPLEFLOW_FALLBACK_DIR") {
            self.scratch.fallback_dir = Some(PathBuf::from(raw));
        }
        if let Some(raw) = lookup("TUPLEFLOW_SKIP_COMMENT_LINES") {
            self.scratch.skip_comment_lines =
                parse_env_bool("TUPLEFLOW_SKIP_COMMENT_LINES", &raw)?;
        }
        if let Some(raw) = lookup("TUPLEFLOW_PROBE_PREFER_NATIVE") {
            self.probe.prefer_native = parse_env_bool("TUPLEFLOW_PROBE_PREFER_NATIVE", &raw)?;
        }
        if let Some(raw) = lookup("TUPLEFLOW_DF_PROGRAM") {
            self.probe.df_program = raw;
        }
        if let Some(raw) = lookup("TUPLEFLOW_PROBE_POLL_INTERVAL_MS") {
            self.probe.poll_interval_ms = parse_env_u64("TUPLEFLOW_PROBE_POLL_INTERVAL_MS", &raw)?;
        }
        if let Some(raw) = lookup("TUPLEFLOW_JSONL_LOG") {
            self.logging.jsonl_log = Some(PathBuf::from(raw));
        }
        Ok(())
    }

    fn expand_paths(&mut self, home: &Path) {
        self.scratch.preferences_file = paths::expand_home(&self.scratch.preferences_file, home);
        if let Some(dir) = self.scratch.fallback_dir.as_mut() {
            *dir = paths::expand_home(dir, home);
        }
        if let Some(log) = self.logging.jsonl_log.as_mut() {
            *log = paths::expand_home(log, home);
        }
    }

    fn validate(&self) -> Result<()> {
        let prefix = &self.scratch.prefix;
        if prefix.is_empty() {
            return Err(TflError::InvalidConfig {
                details: "scratch.prefix must not be empty".to_string(),
            });
        }
        if prefix.contains('/') || prefix.contains(std::path::MAIN_SEPARATOR) {
            return Err(TflError::InvalidConfig {
                details: format!("scratch.prefix must not contain a path separator: {prefix:?}"),
            });
        }
        if self.probe.df_program.trim().is_empty() {
            return Err(TflError::InvalidConfig {
                details: "probe.df_program must not be empty".to_string(),
            });
        }
        if self.probe.poll_interval_ms == 0 {
            return Err(TflError::InvalidConfig {
                details: "probe.poll_interval_ms must be >= 1".to_string(),
            });
        }
        if self.logging.max_size_bytes == 0 || self.logging.max_rotated_files == 0 {
            return Err(TflError::InvalidConfig {
                details: "logging.max_size_bytes and logging.max_rotated_files must be > 0"
                    .to_string(),
            });
        }
        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}

fn parse_env_u64(name: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|error| TflError::ConfigParse {
            context: "env",
            details: format!("{name}={raw:?}: {error}"),
        })
}

fn parse_env_bool(name: &str, raw: &str) -> Result<bool> {
    raw.trim()
        .parse::<bool>()
        .map_err(|error| TflError::ConfigParse {
            context: "env",
            details: format!("{name}={raw:?}: {error}"),
        })
}

#[cfg(test)]
mod tests {
    use super::{Config, DEFAULT_REQUIRED_BYTES, TflError};
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = Config::default();
        cfg.validate().expect("default config should validate");
        assert_eq!(cfg.scratch.default_required_bytes, DEFAULT_REQUIRED_BYTES);
        assert_eq!(cfg.scratch.prefix, "tupleflow");
        assert!(cfg.scratch.preferences_file.ends_with(".galagotmp"));
        assert_eq!(cfg.probe.df_program, "df");
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [scratch]
            default_required_bytes = 4096
            fallback_dir = "/var/tmp"

            [logging]
            jsonl_log = "/var/log/tupleflow.jsonl"
            "#,
        )
        .expect("toml should parse");
        assert_eq!(cfg.scratch.default_required_bytes, 4096);
        assert_eq!(cfg.scratch.fallback_dir, Some(PathBuf::from("/var/tmp")));
        assert_eq!(cfg.scratch.prefix, "tupleflow");
        assert_eq!(
            cfg.logging.jsonl_log,
            Some(PathBuf::from("/var/log/tupleflow.jsonl"))
        );
        assert_eq!(cfg.probe.poll_interval_ms, 10);
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut cfg = Config::default();
        let overrides = vars(&[
            ("TUPLEFLOW_PREFERENCES_FILE", "/etc/tupleflow/roots"),
            ("TUPLEFLOW_REQUIRED_BYTES", "2048"),
            ("TUPLEFLOW_SKIP_COMMENT_LINES", "false"),
            ("TUPLEFLOW_DF_PROGRAM", "/usr/bin/df"),
        ]);
        cfg.apply_env_overrides_from(|key| overrides.get(key).cloned())
            .expect("overrides apply");
        assert_eq!(
            cfg.scratch.preferences_file,
            PathBuf::from("/etc/tupleflow/roots")
        );
        assert_eq!(cfg.scratch.default_required_bytes, 2048);
        assert!(!cfg.scratch.skip_comment_lines);
        assert_eq!(cfg.probe.df_program, "/usr/bin/df");
    }

    #[test]
    fn env_invalid_number_rejected() {
        let mut cfg = Config::default();
        let overrides = vars(&[("TUPLEFLOW_REQUIRED_BYTES", "lots")]);
        let err = cfg
            .apply_env_overrides_from(|key| overrides.get(key).cloned())
            .expect_err("non-numeric override should fail");
        match err {
            TflError::ConfigParse { context, details } => {
                assert_eq!(context, "env");
                assert!(details.contains("TUPLEFLOW_REQUIRED_BYTES"));
            }
            other => panic!("expected ConfigParse, got {other:?}"),
        }
    }

    #[test]
    fn expand_paths_resolves_tilde() {
        let mut cfg = Config::default();
        cfg.scratch.preferences_file = PathBuf::from("~/.galagotmp");
        cfg.logging.jsonl_log = Some(PathBuf::from("~/logs/tf.jsonl"));
        cfg.expand_paths(Path::new("/home/ci"));
        assert_eq!(
            cfg.scratch.preferences_file,
            PathBuf::from("/home/ci/.galagotmp")
        );
        assert_eq!(
            cfg.logging.jsonl_log,
            Some(PathBuf::from("/home/ci/logs/tf.jsonl"))
        );
    }

    #[test]
    fn prefix_with_separator_rejected() {
        let mut cfg = Config::default();
        cfg.scratch.prefix = "../escape".to_string();
        let err = cfg.validate().expect_err("separator in prefix must fail");
        assert!(err.to_string().contains("scratch.prefix"));
    }

    #[test]
    fn zero_poll_interval_rejected() {
        let mut cfg = Config::default();
        cfg.probe.poll_interval_ms = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn load_returns_error_for_explicit_missing_path() {
        let result = Config::load(Some(Path::new("/nonexistent/tupleflow/config.toml")));
        assert!(matches!(result, Err(TflError::MissingConfig { .. })));
    }

    #[test]
    fn load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scratch]\nprefix = \"sorter\"\n").unwrap();
        let cfg = Config::load(Some(&path)).expect("load should succeed");
        assert_eq!(cfg.scratch.prefix, "sorter");
    }
}
