//! Stream a file through an incremental message digest.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use sha2::Digest;

use crate::core::errors::{Result, TflError};

const DIGEST_CHUNK_BYTES: usize = 1024 * 1024;

/// Feed the contents of `path` into `hasher`. Returns the number of bytes read.
///
/// The caller owns `hasher` and decides when to finalize it, so several files
/// can be folded into one digest.
pub fn digest_file<D: Digest>(path: &Path, hasher: &mut D) -> Result<u64> {
    let mut input = File::open(path).map_err(|source| TflError::io(path, source))?;
    let mut buffer = vec![0_u8; DIGEST_CHUNK_BYTES];
    let mut total = 0_u64;
    loop {
        let n = match input.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(TflError::io(path, err)),
        };
        hasher.update(&buffer[..n]);
        total += n as u64;
    }
    Ok(total)
}

/// Lowercase hex SHA-256 of the file at `path`.
pub fn sha256_hex(path: &Path) -> Result<String> {
    let mut hasher = sha2::Sha256::new();
    digest_file(path, &mut hasher)?;
    Ok(hex_encode(&hasher.finalize()))
}

fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write;
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
            let _ = write!(s, "{b:02x}");
            s
        })
}
