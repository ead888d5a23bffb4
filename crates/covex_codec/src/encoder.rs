//! Streaming encoder for execution data files.

use crate::data::{ExecutionData, ExecutionEntry, SessionInfo};
use crate::error::{CodecError, CodecResult};
use crate::record::{Record, RecordKind, MAGIC_NUMBER};
use std::io::Write;

/// Encode a document to a byte vector.
///
/// # Errors
///
/// Returns an error if any field exceeds its encodable range.
pub fn to_bytes(data: &ExecutionData) -> CodecResult<Vec<u8>> {
    let mut buffer = Vec::new();
    ExecEncoder::new(&mut buffer).write_document(data)?;
    Ok(buffer)
}

/// Encode a document to a writer.
///
/// The writer is not flushed; callers owning a buffered sink flush it
/// themselves.
///
/// # Errors
///
/// Returns an error if any field exceeds its encodable range or the
/// underlying writer fails. Output is not guaranteed to be a valid
/// prefix on partial failure.
pub fn to_writer<W: Write>(writer: W, data: &ExecutionData) -> CodecResult<()> {
    ExecEncoder::new(writer).write_document(data)
}

/// A streaming encoder over an arbitrary byte sink.
pub struct ExecEncoder<W> {
    writer: W,
}

impl<W: Write> ExecEncoder<W> {
    /// Creates an encoder over the given byte sink.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the encoder and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Flushes the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails to flush.
    pub fn flush(&mut self) -> CodecResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Writes a complete document: one header record, then sessions,
    /// then entries, each in sequence order. No trailing marker is
    /// emitted; end of stream itself signals completion.
    ///
    /// # Errors
    ///
    /// Returns an error if any field exceeds its encodable range or the
    /// writer fails.
    pub fn write_document(&mut self, data: &ExecutionData) -> CodecResult<()> {
        self.write_header(data.version)?;
        for session in &data.sessions {
            self.write_session_info(session)?;
        }
        for entry in &data.entries {
            self.write_execution_entry(entry)?;
        }
        Ok(())
    }

    /// Writes one record, marker byte included.
    ///
    /// # Errors
    ///
    /// Returns an error if any field exceeds its encodable range or the
    /// writer fails.
    pub fn write_record(&mut self, record: &Record) -> CodecResult<()> {
        match record {
            Record::Header { version } => self.write_header(*version),
            Record::SessionInfo(session) => self.write_session_info(session),
            Record::ExecutionEntry(entry) => self.write_execution_entry(entry),
        }
    }

    /// Encodes a variable-length integer.
    ///
    /// Emits the unique minimal-byte representation: 7 value bits per
    /// byte, least significant group first, bit 7 set on every byte
    /// except the last. Zero encodes as the single byte `0x00`.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn write_var_int(&mut self, mut value: u32) -> CodecResult<()> {
        loop {
            let group = (value & 0x7F) as u8;
            value >>= 7;
            if value == 0 {
                return self.write_u8(group);
            }
            self.write_u8(group | 0x80)?;
        }
    }

    /// Encodes a bit-packed boolean array.
    ///
    /// Emits the element count as a variable-length integer, then the
    /// booleans packed 8 to a byte, LSB-first by array index. A final
    /// partial byte is zero-padded in its unused high bits.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::ValueTooLarge`] if the element count does
    /// not fit the count field.
    pub fn write_bool_array(&mut self, bits: &[bool]) -> CodecResult<()> {
        let count = u32::try_from(bits.len()).map_err(|_| CodecError::ValueTooLarge {
            len: bits.len(),
            max: u32::MAX as usize,
        })?;
        self.write_var_int(count)?;

        let mut buffer = 0u8;
        let mut filled = 0u32;
        for &bit in bits {
            if bit {
                buffer |= 1 << filled;
            }
            filled += 1;
            if filled == 8 {
                self.write_u8(buffer)?;
                buffer = 0;
                filled = 0;
            }
        }
        if filled > 0 {
            self.write_u8(buffer)?;
        }
        Ok(())
    }

    /// Encodes a length-prefixed string.
    ///
    /// Emits the UTF-8 byte length as a big-endian `u16`, then the raw
    /// bytes with no terminator.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::ValueTooLarge`] if the string is longer
    /// than 65,535 bytes.
    pub fn write_string(&mut self, text: &str) -> CodecResult<()> {
        let bytes = text.as_bytes();
        let len = u16::try_from(bytes.len()).map_err(|_| CodecError::ValueTooLarge {
            len: bytes.len(),
            max: usize::from(u16::MAX),
        })?;
        self.writer.write_all(&len.to_be_bytes())?;
        self.writer.write_all(bytes)?;
        Ok(())
    }

    fn write_header(&mut self, version: i16) -> CodecResult<()> {
        self.write_u8(RecordKind::Header.as_byte())?;
        self.writer.write_all(&MAGIC_NUMBER.to_le_bytes())?;
        self.writer.write_all(&version.to_le_bytes())?;
        Ok(())
    }

    fn write_session_info(&mut self, session: &SessionInfo) -> CodecResult<()> {
        self.write_u8(RecordKind::SessionInfo.as_byte())?;
        self.write_string(&session.id)?;
        self.writer.write_all(&session.start.to_le_bytes())?;
        self.writer.write_all(&session.dump.to_le_bytes())?;
        Ok(())
    }

    fn write_execution_entry(&mut self, entry: &ExecutionEntry) -> CodecResult<()> {
        self.write_u8(RecordKind::ExecutionEntry.as_byte())?;
        self.writer.write_all(&entry.id.to_le_bytes())?;
        self.write_string(&entry.name)?;
        self.write_bool_array(&entry.probes)?;
        Ok(())
    }

    #[inline]
    fn write_u8(&mut self, byte: u8) -> CodecResult<()> {
        self.writer.write_all(&[byte])?;
        Ok(())
    }
}
