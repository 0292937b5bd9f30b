//! Cooperative cancellation flag for blocking helpers.
//!
//! Rust threads cannot be interrupted from the outside, so long-running
//! helpers (the `df` fallback) poll a shared `CancelToken` instead.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Clonable cancellation flag. All clones observe the same state.
///
/// Uses `Ordering::Relaxed`: waiters poll the flag and need no ordering with
/// other memory.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// A fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every operation observing this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
