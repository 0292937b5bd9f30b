//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use tupleflow_util::prelude::*;
//! ```

// Core
pub use crate::core::cancel::CancelToken;
pub use crate::core::config::{Config, DEFAULT_REQUIRED_BYTES};
pub use crate::core::errors::{Result, TflError};

// Platform + monitor
pub use crate::monitor::df::DfProbe;
pub use crate::monitor::free_space::{FreeSpaceProbe, free_space};
pub use crate::platform::pal::{FsStats, Platform, detect_platform};

// Scratch files
pub use crate::scratch::placement::{TempPlacement, create_temporary};

// Ordering + hashing
pub use crate::order::compare::{
    Total, TotalOrder, compare_bytes, compare_f32, compare_f64, compare_i32, compare_i64,
    compare_str,
};
pub use crate::order::hash::{
    Fingerprint, hash_bytes, hash_f32, hash_f64, hash_i32, hash_i64, hash_str, hash_u8,
};

// Text + I/O glue
pub use crate::text::codec::{make_bytes, make_string};
