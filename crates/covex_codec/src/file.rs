//! Path-based convenience wrappers around the stream codec.
//!
//! These helpers are thin: all format knowledge lives in the decoder
//! and encoder. Writes truncate in place; callers that need atomic
//! replacement should write to a temporary path and rename.

use crate::data::ExecutionData;
use crate::decoder::from_reader;
use crate::encoder::ExecEncoder;
use crate::error::CodecResult;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Loads a document from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or its contents are
/// not a well-formed record stream.
pub fn load(path: &Path) -> CodecResult<ExecutionData> {
    let file = File::open(path)?;
    let data = from_reader(BufReader::new(file))?;
    tracing::debug!(
        path = %path.display(),
        version = data.version,
        sessions = data.sessions.len(),
        entries = data.entries.len(),
        "loaded execution data"
    );
    Ok(data)
}

/// Saves a document to a file, creating or truncating it.
///
/// # Errors
///
/// Returns an error if the file cannot be created or any field exceeds
/// its encodable range. The file contents are unspecified on failure.
pub fn save(path: &Path, data: &ExecutionData) -> CodecResult<()> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    let mut encoder = ExecEncoder::new(BufWriter::new(file));
    encoder.write_document(data)?;
    encoder.flush()?;
    tracing::debug!(
        path = %path.display(),
        version = data.version,
        sessions = data.sessions.len(),
        entries = data.entries.len(),
        "saved execution data"
    );
    Ok(())
}
