//! Total orderings and fingerprints over the primitive value kinds used as
//! record sort keys.

pub mod compare;
pub mod hash;
