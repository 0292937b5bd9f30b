//! Stream and filesystem glue: copies, recursive delete, digests, line sets.

pub mod copy;
pub mod delete;
pub mod digest;
pub mod lines;
