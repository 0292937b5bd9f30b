//! Free-space probe: native `statvfs` query first, `df` fallback on failure.
//!
//! The reading is advisory. Nothing is reserved, and another writer can
//! consume the space between the probe and its use.

#![allow(missing_docs)]

use std::path::Path;
use std::sync::Arc;

use crate::core::cancel::CancelToken;
use crate::core::config::ProbeConfig;
use crate::core::errors::Result;
use crate::monitor::df::DfProbe;
use crate::platform::pal::{Platform, detect_platform};

/// Usable-bytes probe over a [`Platform`] with a `df` fallback.
#[derive(Clone)]
pub struct FreeSpaceProbe {
    platform: Arc<dyn Platform>,
    fallback: DfProbe,
    prefer_native: bool,
    cancel: CancelToken,
}

impl Default for FreeSpaceProbe {
    fn default() -> Self {
        Self::from_config(&ProbeConfig::default())
    }
}

impl FreeSpaceProbe {
    #[must_use]
    pub fn new(platform: Arc<dyn Platform>, fallback: DfProbe) -> Self {
        Self {
            platform,
            fallback,
            prefer_native: true,
            cancel: CancelToken::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &ProbeConfig) -> Self {
        let mut probe = Self::new(detect_platform(), DfProbe::from_config(config));
        probe.prefer_native = config.prefer_native;
        probe
    }

    /// Observe `cancel` while waiting on the `df` fallback.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that interrupts an in-flight fallback.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Usable bytes on the filesystem containing `path`.
    ///
    /// Any failure of the native query falls through to `df`; errors from the
    /// fallback propagate.
    pub fn usable_bytes(&self, path: &Path) -> Result<u64> {
        if self.prefer_native
            && let Ok(stats) = self.platform.fs_stats(path)
        {
            return Ok(stats.available_bytes);
        }
        self.fallback.available_bytes(path, &self.cancel)
    }
}

/// Usable bytes at `path` using the host platform and default `df` fallback.
pub fn free_space(path: impl AsRef<Path>) -> Result<u64> {
    FreeSpaceProbe::default().usable_bytes(path.as_ref())
}
