//! Append-only JSONL activity logging with stderr fallback.

pub mod jsonl;
