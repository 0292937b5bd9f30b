#![forbid(unsafe_code)]

//! TupleFlow utilities: the small, shared helpers the data-flow framework's
//! sorters and stages lean on.
//!
//! Two groups carry real contracts:
//! 1. **Ordering and hashing primitives** ([`order`]): total three-way
//!    comparisons and 32-bit fingerprints over integers, floats, text and
//!    byte strings, the basis for record sort orders and partitioning.
//! 2. **Scratch-file placement** ([`scratch`]): picks the first directory
//!    from `~/.galagotmp` with enough free space (probed natively, or through
//!    `df` as a fallback) and creates a uniquely named empty file there.
//!
//! The rest is glue: UTF-8 codec and display helpers ([`text`]), stream
//! copies, recursive delete, digests and line sets ([`fsio`]).
//!
//! # Library usage
//!
//! ```rust,no_run
//! use tupleflow_util::prelude::*;
//!
//! # fn main() -> tupleflow_util::core::errors::Result<()> {
//! let scratch = create_temporary(DEFAULT_REQUIRED_BYTES)?;
//! assert!(compare_bytes(b"\x00\x80", b"\x00\x7f") > 0);
//! # let _ = scratch;
//! # Ok(())
//! # }
//! ```

pub mod prelude;

pub mod core;
pub mod fsio;
pub mod logger;
pub mod monitor;
pub mod order;
pub mod platform;
pub mod scratch;
pub mod text;
