//! # Covex Codec
//!
//! Record-level codec for coverage execution data files.
//!
//! An execution data file is a sequential stream of marker-tagged
//! records describing one tool run: a format version header, zero or
//! more recorded sessions, and per-unit probe records.
//!
//! ## Record Format
//!
//! ```text
//! Stream := Record*
//! Record := HeaderRecord | SessionRecord | EntryRecord
//!
//! HeaderRecord  := 0x01 magic:u16 version:i16
//! SessionRecord := 0x10 id:LPString start:i64(ms) dump:i64(ms)
//! EntryRecord   := 0x11 id:i64 name:LPString probes:BoolArray
//!
//! LPString      := length:u16(BE) bytes[length]
//! BoolArray     := count:VarInt bits[ceil(count/8)]   (LSB-first)
//! VarInt        := byte+ (bit7=continuation, bits0-6=payload)
//! magic         := 0xC0C0
//! ```
//!
//! Endianness is fixed per field: every fixed-width integer (magic,
//! version, timestamps, entry ids) is little-endian; the `LPString`
//! length prefix alone is big-endian. This matches the files written by
//! existing producers byte-for-byte.
//!
//! ## Reading and Writing
//!
//! Clean end of stream at a record boundary ends a read successfully —
//! there is no trailing end-of-stream marker. End of stream inside a
//! record payload, an unknown marker byte, or a magic mismatch abort
//! the whole read; no partial document is returned.
//!
//! Writes emit the header record first, then sessions, then entries.
//! Output is not guaranteed to be a valid prefix on partial failure.
//!
//! ## Usage
//!
//! ```
//! use covex_codec::{from_bytes, to_bytes, ExecutionData};
//!
//! let data = ExecutionData::new(0x1007);
//! let bytes = to_bytes(&data).unwrap();
//! let decoded = from_bytes(&bytes).unwrap();
//! assert_eq!(data, decoded);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod data;
mod decoder;
mod encoder;
mod error;
mod record;

pub mod file;

pub use data::{ExecutionData, ExecutionEntry, SessionInfo};
pub use decoder::{from_bytes, from_reader, ExecDecoder};
pub use encoder::{to_bytes, to_writer, ExecEncoder};
pub use error::{CodecError, CodecResult};
pub use record::{Record, RecordKind, MAGIC_NUMBER};
