//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;
use tupleflow_util::core::config::ScratchConfig;
use tupleflow_util::logger::jsonl::{JsonlConfig, JsonlWriter};
use tupleflow_util::monitor::df::DfProbe;
use tupleflow_util::monitor::free_space::FreeSpaceProbe;
use tupleflow_util::platform::pal::MockPlatform;
use tupleflow_util::scratch::placement::TempPlacement;

/// A throwaway home directory with a preferences file, candidate roots, a
/// fallback directory and an activity log.
pub struct ScratchHome {
    pub dir: TempDir,
    pub prefs: PathBuf,
    pub fallback: PathBuf,
    pub log: PathBuf,
}

impl ScratchHome {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create scratch home");
        let fallback = dir.path().join("system-tmp");
        fs::create_dir(&fallback).expect("create fallback dir");
        Self {
            prefs: dir.path().join(".galagotmp"),
            log: dir.path().join("activity.jsonl"),
            fallback,
            dir,
        }
    }

    /// Create a candidate root directory named `name`.
    pub fn root(&self, name: &str) -> PathBuf {
        let root = self.dir.path().join(name);
        fs::create_dir_all(&root).expect("create candidate root");
        root
    }

    pub fn write_prefs(&self, roots: &[&Path]) {
        let body: String = roots
            .iter()
            .map(|root| format!("{}\n", root.display()))
            .collect();
        fs::write(&self.prefs, body).expect("write preferences file");
    }

    /// Placement that reads this home's preferences and asks `platform` for
    /// free space. The `df` fallback is disabled by pointing it at a missing
    /// program.
    pub fn placement(&self, platform: MockPlatform) -> TempPlacement {
        let config = ScratchConfig {
            preferences_file: self.prefs.clone(),
            fallback_dir: Some(self.fallback.clone()),
            ..ScratchConfig::default()
        };
        let probe = FreeSpaceProbe::new(
            Arc::new(platform),
            DfProbe::with_command("/nonexistent/df", Vec::<&str>::new()),
        );
        let log = JsonlWriter::open(JsonlConfig {
            path: Some(self.log.clone()),
            ..JsonlConfig::default()
        });
        TempPlacement::new(config, probe, log)
    }

    pub fn log_lines(&self) -> Vec<serde_json::Value> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(|line| serde_json::from_str(line).expect("log line is JSON"))
            .collect()
    }
}
