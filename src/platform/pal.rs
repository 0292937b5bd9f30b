//! PAL trait and platform-specific implementations.

#![allow(missing_docs)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::errors::{Result, TflError};

/// Free-space reading for the filesystem containing a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsStats {
    /// Bytes usable by an unprivileged caller.
    pub available_bytes: u64,
}

/// OS abstraction for the direct free-space query.
pub trait Platform: Send + Sync {
    fn fs_stats(&self, path: &Path) -> Result<FsStats>;
}

/// Host implementation backed by `statvfs` on Unix.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativePlatform;

impl NativePlatform {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Platform for NativePlatform {
    /// A path that does not exist reads as zero usable bytes.
    #[cfg(unix)]
    #[allow(clippy::useless_conversion)]
    fn fs_stats(&self, path: &Path) -> Result<FsStats> {
        use nix::errno::Errno;

        let stat = match nix::sys::statvfs::statvfs(path) {
            Ok(stat) => stat,
            Err(Errno::ENOENT | Errno::ENOTDIR) => return Ok(FsStats { available_bytes: 0 }),
            Err(error) => {
                return Err(TflError::FsStats {
                    path: path.to_path_buf(),
                    details: error.to_string(),
                });
            }
        };
        let fragment = u64::from(stat.fragment_size());
        Ok(FsStats {
            available_bytes: u64::from(stat.blocks_available()).saturating_mul(fragment),
        })
    }

    #[cfg(not(unix))]
    fn fs_stats(&self, path: &Path) -> Result<FsStats> {
        Err(TflError::UnsupportedPlatform {
            details: format!(
                "no native free-space query on this host for {}",
                path.display()
            ),
        })
    }
}

/// In-memory mock implementation for deterministic tests.
///
/// Paths are matched exactly; unknown paths fail like an unreachable mount.
#[derive(Debug, Clone, Default)]
pub struct MockPlatform {
    stats_by_path: HashMap<PathBuf, FsStats>,
}

impl MockPlatform {
    #[must_use]
    pub fn new(stats_by_path: HashMap<PathBuf, FsStats>) -> Self {
        Self { stats_by_path }
    }

    /// Register `available_bytes` of usable space at `path`.
    #[must_use]
    pub fn with_available(mut self, path: impl Into<PathBuf>, available_bytes: u64) -> Self {
        self.stats_by_path
            .insert(path.into(), FsStats { available_bytes });
        self
    }
}

impl Platform for MockPlatform {
    fn fs_stats(&self, path: &Path) -> Result<FsStats> {
        self.stats_by_path
            .get(path)
            .copied()
            .ok_or_else(|| TflError::FsStats {
                path: path.to_path_buf(),
                details: "mock stats not found".to_string(),
            })
    }
}

/// Detect active platform implementation.
pub fn detect_platform() -> Arc<dyn Platform> {
    Arc::new(NativePlatform::new())
}
