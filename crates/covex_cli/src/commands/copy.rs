//! Copy command implementation.
//!
//! Re-encodes a file record by record. Output bytes are equivalent to
//! the input for well-formed files. No atomicity: on decode failure
//! the destination may be left holding a partial record stream.

use covex_codec::{ExecDecoder, ExecEncoder};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Runs the copy command.
pub fn run(src: &Path, dst: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let input = File::open(src)?;
    let output = File::create(dst)?;

    let mut decoder = ExecDecoder::new(BufReader::new(input));
    let mut encoder = ExecEncoder::new(BufWriter::new(output));

    let mut count = 0usize;
    while let Some(record) = decoder.next_record()? {
        encoder.write_record(&record)?;
        count += 1;
    }
    encoder.flush()?;

    tracing::debug!(src = %src.display(), dst = %dst.display(), count, "copy complete");
    println!("Copied {count} record(s) to {}", dst.display());
    Ok(())
}
