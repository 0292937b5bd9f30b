//! UTF-8 conversion between byte strings and character strings.

use crate::core::errors::Result;

/// UTF-8 bytes of `word`.
#[must_use]
pub fn make_bytes(word: &str) -> Vec<u8> {
    word.as_bytes().to_vec()
}

/// Decode `word` as UTF-8, failing with `TflError::Decode` on malformed input.
pub fn make_string(word: &[u8]) -> Result<String> {
    Ok(std::str::from_utf8(word)?.to_owned())
}
