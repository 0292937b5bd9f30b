//! Core types: errors, configuration, cancellation, well-known paths.

pub mod cancel;
pub mod config;
pub mod errors;
pub mod paths;
