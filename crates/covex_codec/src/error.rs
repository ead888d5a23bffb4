//! Error types for the codec crate.

use std::io;
use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during encoding or decoding.
#[derive(Debug, Error)]
pub enum CodecError {
    /// An I/O error occurred on the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stream ended before a declared field was complete.
    #[error("unexpected end of stream")]
    UnexpectedEof,

    /// The header magic constant did not match.
    #[error("invalid magic number {found:#06x} (expected {expected:#06x})")]
    InvalidMagicNumber {
        /// The magic value found in the stream.
        found: u16,
        /// The magic value the format requires.
        expected: u16,
    },

    /// A value exceeds the budget of its length prefix.
    #[error("value of {len} bytes exceeds the maximum encodable length {max}")]
    ValueTooLarge {
        /// The actual length in bytes.
        len: usize,
        /// The maximum length the prefix can express.
        max: usize,
    },

    /// A variable-length integer does not fit the target type.
    #[error("variable-length integer overflows u32")]
    IntegerOverflow,

    /// A record marker byte was not recognized.
    #[error("unknown record marker {marker:#04x}")]
    UnknownRecordMarker {
        /// The unrecognized marker byte.
        marker: u8,
    },

    /// A declared element count exceeds the decoder's allocation guard.
    #[error("declared size {claimed} exceeds maximum allowed {max_allowed}")]
    SizeLimitExceeded {
        /// The count claimed by the stream.
        claimed: u64,
        /// The maximum the decoder accepts.
        max_allowed: u64,
    },

    /// Decoded string bytes are not valid UTF-8.
    #[error("invalid UTF-8 string")]
    InvalidUtf8,
}
