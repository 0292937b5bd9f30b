//! Scratch-file placement: pick the first preferred root with enough free
//! space, otherwise fall back to the system temporary directory.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::core::config::{Config, ScratchConfig};
use crate::core::errors::{Result, TflError};
use crate::logger::jsonl::{EventType, JsonlConfig, JsonlWriter, LogEntry, Severity};
use crate::monitor::free_space::FreeSpaceProbe;
use crate::scratch::preferences;

const MIB: f64 = 1_048_576.0;

/// A preferred root that passed the free-space check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedRoot {
    pub root: PathBuf,
    pub free_bytes: u64,
}

/// Temporary-file placement policy.
pub struct TempPlacement {
    config: ScratchConfig,
    probe: FreeSpaceProbe,
    log: Mutex<JsonlWriter>,
}

impl TempPlacement {
    #[must_use]
    pub fn new(config: ScratchConfig, probe: FreeSpaceProbe, log: JsonlWriter) -> Self {
        Self {
            config,
            probe,
            log: Mutex::new(log),
        }
    }

    /// Build the probe and log writer described by `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.scratch.clone(),
            FreeSpaceProbe::from_config(&config.probe),
            JsonlWriter::open(JsonlConfig::from(&config.logging)),
        )
    }

    pub fn config(&self) -> &ScratchConfig {
        &self.config
    }

    /// First candidate root with at least `required_bytes` usable.
    ///
    /// Probe failures propagate instead of skipping to the next candidate.
    pub fn select_root(&self, required_bytes: u64) -> Result<Option<SelectedRoot>> {
        let candidates = preferences::read_candidates(
            &self.config.preferences_file,
            self.config.skip_comment_lines,
        )?;
        for root in candidates {
            let free_bytes = self.probe.usable_bytes(&root)?;
            if free_bytes >= required_bytes {
                return Ok(Some(SelectedRoot { root, free_bytes }));
            }
        }
        Ok(None)
    }

    /// Create a scratch file sized for the configured default requirement.
    pub fn create_temporary(&self) -> Result<PathBuf> {
        self.create_temporary_with(self.config.default_required_bytes)
    }

    /// Create an empty, uniquely named scratch file owned by the caller.
    ///
    /// The file is not deleted by this crate.
    pub fn create_temporary_with(&self, required_bytes: u64) -> Result<PathBuf> {
        if let Some(selected) = self.select_root(required_bytes)? {
            self.log_selection(&selected, required_bytes);
            return self.create_in(&selected.root);
        }
        self.create_in(&self.config.effective_fallback_dir())
    }

    fn create_in(&self, dir: &Path) -> Result<PathBuf> {
        let file = tempfile::Builder::new()
            .prefix(&self.config.prefix)
            .suffix("")
            .tempfile_in(dir)
            .map_err(|source| TflError::io(dir, source))?;
        let (_handle, path) = file.keep().map_err(|err| TflError::io(dir, err.error))?;
        Ok(path)
    }

    fn log_selection(&self, selected: &SelectedRoot, required_bytes: u64) {
        let mut entry = LogEntry::new(EventType::TempPlacement, Severity::Info);
        entry.path = Some(selected.root.display().to_string());
        entry.free_bytes = Some(selected.free_bytes);
        entry.required_bytes = Some(required_bytes);
        entry.details = Some(selection_message(
            &selected.root,
            selected.free_bytes,
            required_bytes,
        ));
        self.log.lock().write_entry(&entry);
    }
}

/// `Found <free>MB >= <required>MB left on <root>`, sizes in MiB.
#[allow(clippy::cast_precision_loss)]
pub fn selection_message(root: &Path, free_bytes: u64, required_bytes: u64) -> String {
    format!(
        "Found {:6.3}MB >= {:6.3}MB left on {}",
        free_bytes as f64 / MIB,
        required_bytes as f64 / MIB,
        root.display()
    )
}

/// Create a scratch file with at least `required_bytes` free, using the
/// default preferences file, host probe and stderr logging.
pub fn create_temporary(required_bytes: u64) -> Result<PathBuf> {
    TempPlacement::from_config(&Config::default()).create_temporary_with(required_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::df::DfProbe;
    use crate::platform::pal::MockPlatform;
    use std::fs;
    use std::sync::Arc;

    struct Fixture {
        _dir: tempfile::TempDir,
        prefs: PathBuf,
        fast: PathBuf,
        slow: PathBuf,
        fallback: PathBuf,
        log: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let fast = dir.path().join("fast");
        let slow = dir.path().join("slow");
        let fallback = dir.path().join("fallback");
        for d in [&fast, &slow, &fallback] {
            fs::create_dir(d).unwrap();
        }
        Fixture {
            prefs: dir.path().join(".galagotmp"),
            log: dir.path().join("activity.jsonl"),
            fast,
            slow,
            fallback,
            _dir: dir,
        }
    }

    fn placement(fx: &Fixture, platform: MockPlatform) -> TempPlacement {
        let config = ScratchConfig {
            preferences_file: fx.prefs.clone(),
            fallback_dir: Some(fx.fallback.clone()),
            ..ScratchConfig::default()
        };
        let probe = FreeSpaceProbe::new(
            Arc::new(platform),
            DfProbe::with_command("/definitely/not/a/program", Vec::<&str>::new()),
        );
        let log = JsonlWriter::open(JsonlConfig {
            path: Some(fx.log.clone()),
            ..JsonlConfig::default()
        });
        TempPlacement::new(config, probe, log)
    }

    #[test]
    fn selection_message_uses_mebibytes_with_three_decimals() {
        let msg = selection_message(Path::new("/scratch"), 3 * 1_048_576 / 2, 1_048_576);
        assert_eq!(msg, "Found  1.500MB >=  1.000MB left on /scratch");
    }

    #[test]
    fn first_sufficient_candidate_wins() {
        let fx = fixture();
        fs::write(
            &fx.prefs,
            format!("{}\n{}\n", fx.slow.display(), fx.fast.display()),
        )
        .unwrap();
        let platform = MockPlatform::default()
            .with_available(&fx.slow, 10)
            .with_available(&fx.fast, 10_000);

        let tmp = placement(&fx, platform).create_temporary_with(5_000).unwrap();
        assert_eq!(tmp.parent(), Some(fx.fast.as_path()));
        assert!(
            tmp.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("tupleflow"))
        );
        assert_eq!(fs::metadata(&tmp).unwrap().len(), 0);

        let log = fs::read_to_string(&fx.log).unwrap();
        let record: serde_json::Value = serde_json::from_str(log.trim()).unwrap();
        assert_eq!(record["event"], "temp_placement");
        assert_eq!(record["free_bytes"], 10_000);
        assert_eq!(record["required_bytes"], 5_000);
    }

    #[test]
    fn exact_fit_qualifies() {
        let fx = fixture();
        fs::write(&fx.prefs, format!("{}\n", fx.fast.display())).unwrap();
        let platform = MockPlatform::default().with_available(&fx.fast, 4096);
        let selected = placement(&fx, platform).select_root(4096).unwrap();
        assert_eq!(
            selected,
            Some(SelectedRoot {
                root: fx.fast.clone(),
                free_bytes: 4096
            })
        );
    }

    #[test]
    fn insufficient_candidates_fall_back_without_logging() {
        let fx = fixture();
        fs::write(&fx.prefs, format!("{}\n", fx.slow.display())).unwrap();
        let platform = MockPlatform::default().with_available(&fx.slow, 1);

        let tmp = placement(&fx, platform).create_temporary_with(1024).unwrap();
        assert_eq!(tmp.parent(), Some(fx.fallback.as_path()));
        assert!(fs::read_to_string(&fx.log).unwrap_or_default().is_empty());
    }

    #[test]
    fn missing_preferences_file_falls_back() {
        let fx = fixture();
        let tmp = placement(&fx, MockPlatform::default())
            .create_temporary()
            .unwrap();
        assert_eq!(tmp.parent(), Some(fx.fallback.as_path()));
    }

    #[test]
    fn probe_failure_propagates() {
        let fx = fixture();
        fs::write(&fx.prefs, format!("{}\n", fx.fast.display())).unwrap();
        // Mock knows nothing about `fast` and the df fallback cannot spawn.
        let err = placement(&fx, MockPlatform::default())
            .create_temporary_with(1)
            .expect_err("unprobeable candidate should fail");
        assert_eq!(err.code(), "TFL-3002");
    }

    #[test]
    fn creation_failure_at_selected_root_is_not_retried() {
        let fx = fixture();
        let gone = fx.fast.join("missing-subdir");
        fs::write(
            &fx.prefs,
            format!("{}\n{}\n", gone.display(), fx.slow.display()),
        )
        .unwrap();
        let platform = MockPlatform::default()
            .with_available(&gone, u64::MAX)
            .with_available(&fx.slow, u64::MAX);

        let err = placement(&fx, platform)
            .create_temporary_with(1)
            .expect_err("creating inside a missing dir should fail");
        match err {
            TflError::Io { path, .. } => assert_eq!(path, gone),
            other => panic!("expected Io, got {other:?}"),
        }
        assert_eq!(fs::read_dir(&fx.slow).unwrap().count(), 0);
    }

    #[test]
    fn repeated_calls_return_distinct_files() {
        let fx = fixture();
        let placement = placement(&fx, MockPlatform::default());
        let a = placement.create_temporary_with(0).unwrap();
        let b = placement.create_temporary_with(0).unwrap();
        assert_ne!(a, b);
        assert!(a.is_file() && b.is_file());
    }
}
