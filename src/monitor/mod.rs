//! Free-space monitoring: native probe with a `df` fallback.

pub mod df;
pub mod free_space;
