//! Scratch (temporary) file placement driven by the `~/.galagotmp` preferences file.

pub mod placement;
pub mod preferences;
