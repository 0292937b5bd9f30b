//! Chunked copies between files and byte streams.

use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use crate::core::errors::{Result, TflError};

/// Buffer size for stream copies.
pub const COPY_CHUNK_BYTES: usize = 1024 * 1024;

/// Stream the bytes of `path` into `sink`. Returns the number of bytes copied.
///
/// `sink` is flushed but not closed, so the caller may keep writing to it.
pub fn copy_file_to_writer<W: Write + ?Sized>(path: &Path, sink: &mut W) -> Result<u64> {
    let mut input = File::open(path).map_err(|source| TflError::io(path, source))?;
    let copied = pump(&mut input, sink, path)?;
    sink.flush().map_err(|source| TflError::io(path, source))?;
    Ok(copied)
}

/// Stream `source` into a newly created (or truncated) file at `path`.
///
/// Both ends are closed on return: the reader is consumed and the file is
/// synced and dropped.
pub fn copy_reader_to_file<R: Read>(mut source: R, path: &Path) -> Result<u64> {
    let mut output = File::create(path).map_err(|err| TflError::io(path, err))?;
    let copied = pump(&mut source, &mut output, path)?;
    output.sync_all().map_err(|err| TflError::io(path, err))?;
    Ok(copied)
}

fn pump<R, W>(reader: &mut R, writer: &mut W, path: &Path) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buffer = vec![0_u8; COPY_CHUNK_BYTES];
    let mut total = 0_u64;
    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(TflError::io(path, err)),
        };
        writer
            .write_all(&buffer[..n])
            .map_err(|err| TflError::io(path, err))?;
        total += n as u64;
    }
    Ok(total)
}
