//! Text helpers: UTF-8 codec and display formatting.

pub mod codec;
pub mod format;
