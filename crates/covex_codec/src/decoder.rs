//! Streaming decoder for execution data files.

use crate::data::{ExecutionData, ExecutionEntry, SessionInfo};
use crate::error::{CodecError, CodecResult};
use crate::record::{Record, RecordKind, MAGIC_NUMBER};
use std::io::{self, Read};

/// Maximum probe count the decoder accepts for a single entry.
///
/// Bounds the allocation a hostile or corrupt count field can demand
/// before any data bytes are read. 16 million probes (2 MB of packed
/// bits) is orders of magnitude beyond any real instrumented unit.
const MAX_PROBE_COUNT: u64 = 16 * 1024 * 1024;

/// Decode a document from a byte slice.
///
/// # Errors
///
/// Returns an error if the bytes are not a well-formed record stream.
/// An empty slice is well-formed and yields a default document.
pub fn from_bytes(bytes: &[u8]) -> CodecResult<ExecutionData> {
    ExecDecoder::new(bytes).read_document()
}

/// Decode a document from a reader.
///
/// # Errors
///
/// Returns an error if the stream is not a well-formed record stream
/// or the underlying reader fails.
pub fn from_reader<R: Read>(reader: R) -> CodecResult<ExecutionData> {
    ExecDecoder::new(reader).read_document()
}

/// A streaming decoder over an arbitrary byte source.
///
/// The decoder owns its reader for the duration of the decode and makes
/// no attempt to recover from errors: any failure aborts the enclosing
/// read and the stream position is unspecified afterwards.
///
/// Clean end of stream is only recognized at a record boundary, before
/// a marker byte. End of stream inside a record payload is an error.
pub struct ExecDecoder<R> {
    reader: R,
}

impl<R: Read> ExecDecoder<R> {
    /// Creates a decoder over the given byte source.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Consumes the decoder and returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Reads records until end of stream and assembles a document.
    ///
    /// A header record sets the version (last one wins if repeated);
    /// session and entry records append in stream order. Decoding is
    /// all-or-nothing: any error discards the partial document.
    ///
    /// # Errors
    ///
    /// Returns an error on any malformed record, unknown marker byte,
    /// magic mismatch, or I/O failure.
    pub fn read_document(&mut self) -> CodecResult<ExecutionData> {
        let mut data = ExecutionData::default();

        while let Some(record) = self.next_record()? {
            match record {
                Record::Header { version } => data.version = version,
                Record::SessionInfo(session) => data.sessions.push(session),
                Record::ExecutionEntry(entry) => data.entries.push(entry),
            }
        }

        Ok(data)
    }

    /// Reads the next record, or `Ok(None)` on clean end of stream.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownRecordMarker`] for unrecognized
    /// marker bytes and [`CodecError::InvalidMagicNumber`] for a header
    /// whose magic constant does not match. Both are fatal; the caller
    /// must not continue reading.
    pub fn next_record(&mut self) -> CodecResult<Option<Record>> {
        let Some(marker) = self.read_marker()? else {
            return Ok(None);
        };

        let kind = RecordKind::from_byte(marker)
            .ok_or(CodecError::UnknownRecordMarker { marker })?;

        let record = match kind {
            RecordKind::Header => Record::Header {
                version: self.read_header()?,
            },
            RecordKind::SessionInfo => Record::SessionInfo(self.read_session_info()?),
            RecordKind::ExecutionEntry => Record::ExecutionEntry(self.read_execution_entry()?),
        };

        Ok(Some(record))
    }

    /// Decodes a variable-length integer into a `u32`.
    ///
    /// Each byte carries 7 value bits in its low bits; bit 7 flags a
    /// continuation. Groups are accumulated at increasing bit offsets
    /// (0, 7, 14, ...), so the first byte holds the least significant
    /// bits.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::IntegerOverflow`] if the encoded value does
    /// not fit a `u32`, and [`CodecError::UnexpectedEof`] if the stream
    /// ends on a continuation byte.
    pub fn read_var_int(&mut self) -> CodecResult<u32> {
        let mut value: u32 = 0;
        let mut shift: u32 = 0;

        loop {
            let byte = self.read_u8()?;
            let group = u32::from(byte & 0x7F);

            // The fifth byte may only carry the top 4 bits of a u32.
            if shift == 28 && group > 0x0F {
                return Err(CodecError::IntegerOverflow);
            }
            value |= group << shift;

            if byte & 0x80 == 0 {
                return Ok(value);
            }

            shift += 7;
            if shift > 28 {
                return Err(CodecError::IntegerOverflow);
            }
        }
    }

    /// Decodes a bit-packed boolean array.
    ///
    /// Reads the element count as a variable-length integer, then
    /// unpacks bits LSB-first from exactly `count.div_ceil(8)` data
    /// bytes. Padding bits in a final partial byte are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::SizeLimitExceeded`] if the count exceeds
    /// the decoder's allocation guard.
    pub fn read_bool_array(&mut self) -> CodecResult<Vec<bool>> {
        let count = u64::from(self.read_var_int()?);
        if count > MAX_PROBE_COUNT {
            return Err(CodecError::SizeLimitExceeded {
                claimed: count,
                max_allowed: MAX_PROBE_COUNT,
            });
        }

        let count = count as usize;
        let mut bits = Vec::with_capacity(count);
        let mut buffer = 0u8;
        for i in 0..count {
            if i % 8 == 0 {
                buffer = self.read_u8()?;
            }
            bits.push(buffer & 0x01 != 0);
            buffer >>= 1;
        }

        Ok(bits)
    }

    /// Decodes a length-prefixed string.
    ///
    /// Reads a big-endian `u16` byte length, then exactly that many
    /// bytes. There is no terminator.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidUtf8`] if the bytes are not valid
    /// UTF-8.
    pub fn read_string(&mut self) -> CodecResult<String> {
        let len = usize::from(self.read_u16_be()?);
        let mut buf = vec![0u8; len];
        self.fill(&mut buf)?;
        String::from_utf8(buf).map_err(|_| CodecError::InvalidUtf8)
    }

    fn read_header(&mut self) -> CodecResult<i16> {
        let magic = self.read_u16_le()?;
        if magic != MAGIC_NUMBER {
            return Err(CodecError::InvalidMagicNumber {
                found: magic,
                expected: MAGIC_NUMBER,
            });
        }
        self.read_i16_le()
    }

    fn read_session_info(&mut self) -> CodecResult<SessionInfo> {
        let id = self.read_string()?;
        let start = self.read_i64_le()?;
        let dump = self.read_i64_le()?;
        Ok(SessionInfo { id, start, dump })
    }

    fn read_execution_entry(&mut self) -> CodecResult<ExecutionEntry> {
        let id = self.read_i64_le()?;
        let name = self.read_string()?;
        let probes = self.read_bool_array()?;
        Ok(ExecutionEntry { id, name, probes })
    }

    /// Reads one marker byte, distinguishing clean end of stream
    /// (`Ok(None)`) from every other read failure.
    fn read_marker(&mut self) -> CodecResult<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(CodecError::Io(e)),
            }
        }
    }

    #[inline]
    fn fill(&mut self, buf: &mut [u8]) -> CodecResult<()> {
        self.reader.read_exact(buf).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                CodecError::UnexpectedEof
            } else {
                CodecError::Io(e)
            }
        })
    }

    #[inline]
    fn read_u8(&mut self) -> CodecResult<u8> {
        let mut buf = [0u8; 1];
        self.fill(&mut buf)?;
        Ok(buf[0])
    }

    #[inline]
    fn read_u16_le(&mut self) -> CodecResult<u16> {
        let mut buf = [0u8; 2];
        self.fill(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    #[inline]
    fn read_u16_be(&mut self) -> CodecResult<u16> {
        let mut buf = [0u8; 2];
        self.fill(&mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    #[inline]
    fn read_i16_le(&mut self) -> CodecResult<i16> {
        let mut buf = [0u8; 2];
        self.fill(&mut buf)?;
        Ok(i16::from_le_bytes(buf))
    }

    #[inline]
    fn read_i64_le(&mut self) -> CodecResult<i64> {
        let mut buf = [0u8; 8];
        self.fill(&mut buf)?;
        Ok(i64::from_le_bytes(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoder(bytes: &[u8]) -> ExecDecoder<&[u8]> {
        ExecDecoder::new(bytes)
    }

    #[test]
    fn empty_stream_yields_default_document() {
        let data = from_bytes(&[]).unwrap();
        assert_eq!(data, ExecutionData::default());
    }

    #[test]
    fn var_int_single_byte() {
        assert_eq!(decoder(&[0x00]).read_var_int().unwrap(), 0);
        assert_eq!(decoder(&[0x01]).read_var_int().unwrap(), 1);
        assert_eq!(decoder(&[0x7F]).read_var_int().unwrap(), 127);
    }

    #[test]
    fn var_int_multi_byte() {
        assert_eq!(decoder(&[0x80, 0x01]).read_var_int().unwrap(), 128);
        assert_eq!(decoder(&[0xFF, 0x01]).read_var_int().unwrap(), 255);
        assert_eq!(decoder(&[0xAC, 0x02]).read_var_int().unwrap(), 300);
        assert_eq!(
            decoder(&[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]).read_var_int().unwrap(),
            u32::MAX
        );
    }

    #[test]
    fn var_int_truncated_continuation_fails() {
        assert!(matches!(
            decoder(&[0x80]).read_var_int(),
            Err(CodecError::UnexpectedEof)
        ));
        assert!(matches!(
            decoder(&[0xFF, 0xFF]).read_var_int(),
            Err(CodecError::UnexpectedEof)
        ));
    }

    #[test]
    fn var_int_overflow_fails() {
        // Fifth byte with payload bits above bit 31.
        assert!(matches!(
            decoder(&[0xFF, 0xFF, 0xFF, 0xFF, 0x10]).read_var_int(),
            Err(CodecError::IntegerOverflow)
        ));
        // Sixth byte, regardless of content.
        assert!(matches!(
            decoder(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]).read_var_int(),
            Err(CodecError::IntegerOverflow)
        ));
    }

    #[test]
    fn bool_array_empty() {
        let bits = decoder(&[0x00]).read_bool_array().unwrap();
        assert!(bits.is_empty());
    }

    #[test]
    fn bool_array_unpacks_lsb_first() {
        // count 3, bits 0b101 -> true, false, true
        let bits = decoder(&[0x03, 0b0000_0101]).read_bool_array().unwrap();
        assert_eq!(bits, vec![true, false, true]);
    }

    #[test]
    fn bool_array_eight_bits_in_one_byte() {
        let bits = decoder(&[0x08, 0xFF]).read_bool_array().unwrap();
        assert_eq!(bits, vec![true; 8]);
    }

    #[test]
    fn bool_array_ninth_bit_starts_second_byte() {
        let bits = decoder(&[0x09, 0x00, 0x01]).read_bool_array().unwrap();
        assert_eq!(bits[..8], [false; 8]);
        assert!(bits[8]);
    }

    #[test]
    fn bool_array_missing_data_bytes_fails() {
        assert!(matches!(
            decoder(&[0x09, 0xFF]).read_bool_array(),
            Err(CodecError::UnexpectedEof)
        ));
    }

    #[test]
    fn bool_array_hostile_count_is_rejected() {
        // count = u32::MAX, no data bytes; must fail before allocating.
        let result = decoder(&[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]).read_bool_array();
        assert!(matches!(
            result,
            Err(CodecError::SizeLimitExceeded { claimed, .. }) if claimed == u64::from(u32::MAX)
        ));
    }

    #[test]
    fn string_length_prefix_is_big_endian() {
        let s = decoder(&[0x00, 0x02, b'h', b'i']).read_string().unwrap();
        assert_eq!(s, "hi");
    }

    #[test]
    fn string_empty() {
        let s = decoder(&[0x00, 0x00]).read_string().unwrap();
        assert_eq!(s, "");
    }

    #[test]
    fn string_truncated_fails() {
        assert!(matches!(
            decoder(&[0x00, 0x05, b'a', b'b']).read_string(),
            Err(CodecError::UnexpectedEof)
        ));
    }

    #[test]
    fn string_invalid_utf8_fails() {
        assert!(matches!(
            decoder(&[0x00, 0x02, 0xFF, 0xFE]).read_string(),
            Err(CodecError::InvalidUtf8)
        ));
    }

    #[test]
    fn header_magic_mismatch_fails() {
        // marker, magic 0xDEAD (LE), version 1
        let bytes = [0x01, 0xAD, 0xDE, 0x01, 0x00];
        let result = from_bytes(&bytes);
        assert!(matches!(
            result,
            Err(CodecError::InvalidMagicNumber {
                found: 0xDEAD,
                expected: MAGIC_NUMBER,
            })
        ));
    }

    #[test]
    fn header_sets_version() {
        let bytes = [0x01, 0xC0, 0xC0, 0x07, 0x10];
        let data = from_bytes(&bytes).unwrap();
        assert_eq!(data.version, 0x1007);
    }

    #[test]
    fn repeated_header_last_one_wins() {
        let bytes = [
            0x01, 0xC0, 0xC0, 0x01, 0x00, // version 1
            0x01, 0xC0, 0xC0, 0x02, 0x00, // version 2
        ];
        let data = from_bytes(&bytes).unwrap();
        assert_eq!(data.version, 2);
    }

    #[test]
    fn unknown_marker_fails() {
        let result = from_bytes(&[0x55]);
        assert!(matches!(
            result,
            Err(CodecError::UnknownRecordMarker { marker: 0x55 })
        ));
    }

    #[test]
    fn truncated_header_fails() {
        assert!(matches!(
            from_bytes(&[0x01, 0xC0]),
            Err(CodecError::UnexpectedEof)
        ));
    }

    #[test]
    fn session_record_decodes() {
        let mut bytes = vec![0x10, 0x00, 0x02, b'i', b'd'];
        bytes.extend_from_slice(&100i64.to_le_bytes());
        bytes.extend_from_slice(&200i64.to_le_bytes());

        let data = from_bytes(&bytes).unwrap();
        assert_eq!(data.sessions.len(), 1);
        assert_eq!(data.sessions[0].id, "id");
        assert_eq!(data.sessions[0].start, 100);
        assert_eq!(data.sessions[0].dump, 200);
    }

    #[test]
    fn entry_record_decodes() {
        let mut bytes = vec![0x11];
        bytes.extend_from_slice(&12i64.to_le_bytes());
        bytes.extend_from_slice(&[0x00, 0x01, b'c']);
        bytes.extend_from_slice(&[0x03, 0b0000_0101]);

        let data = from_bytes(&bytes).unwrap();
        assert_eq!(data.entries.len(), 1);
        assert_eq!(data.entries[0].id, 12);
        assert_eq!(data.entries[0].name, "c");
        assert_eq!(data.entries[0].probes, vec![true, false, true]);
    }

    #[test]
    fn error_discards_partial_document() {
        // A valid session followed by garbage: the whole read fails.
        let mut bytes = vec![0x10, 0x00, 0x01, b's'];
        bytes.extend_from_slice(&1i64.to_le_bytes());
        bytes.extend_from_slice(&2i64.to_le_bytes());
        bytes.push(0x7E);

        assert!(from_bytes(&bytes).is_err());
    }

    #[test]
    fn next_record_streams_until_none() {
        let mut bytes = vec![0x01, 0xC0, 0xC0, 0x05, 0x00];
        bytes.extend_from_slice(&[0x10, 0x00, 0x01, b'x']);
        bytes.extend_from_slice(&3i64.to_le_bytes());
        bytes.extend_from_slice(&4i64.to_le_bytes());

        let mut dec = decoder(&bytes);
        assert!(matches!(
            dec.next_record().unwrap(),
            Some(Record::Header { version: 5 })
        ));
        assert!(matches!(
            dec.next_record().unwrap(),
            Some(Record::SessionInfo(_))
        ));
        assert!(dec.next_record().unwrap().is_none());
        // Clean end of stream is sticky, not an error.
        assert!(dec.next_record().unwrap().is_none());
    }
}
