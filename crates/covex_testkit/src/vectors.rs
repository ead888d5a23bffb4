//! Golden byte vectors for format verification.
//!
//! Each vector pairs a document with the exact bytes a conforming
//! encoder must produce, pinning the per-field endianness mapping and
//! the bit-level probe packing against drift.

use covex_codec::{ExecutionData, ExecutionEntry, SessionInfo};
use serde::{Deserialize, Serialize};

/// A format test vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// The in-memory document.
    pub document: ExecutionData,
    /// Expected encoded bytes (hex-encoded).
    pub encoded_hex: String,
}

/// Document encoding test vectors.
pub fn format_vectors() -> Vec<TestVector> {
    vec![
        TestVector {
            id: "empty_document".into(),
            description: "Default document: header record only".into(),
            document: ExecutionData::default(),
            encoded_hex: "01c0c00000".into(),
        },
        TestVector {
            id: "negative_version".into(),
            description: "Version -1 encodes little-endian".into(),
            document: ExecutionData::new(-1),
            encoded_hex: "01c0c0ffff".into(),
        },
        TestVector {
            id: "session_and_entry".into(),
            description: "One session, one entry with probes 101".into(),
            document: ExecutionData {
                version: 0x1007,
                sessions: vec![SessionInfo {
                    id: "session_name".into(),
                    start: 1000,
                    dump: 2000,
                }],
                entries: vec![ExecutionEntry {
                    id: 12,
                    name: "execution_entry".into(),
                    probes: vec![true, false, true],
                }],
            },
            encoded_hex: concat!(
                "01c0c00710",
                "10000c73657373696f6e5f6e616d65",
                "e803000000000000",
                "d007000000000000",
                "110c00000000000000",
                "000f657865637574696f6e5f656e747279",
                "0305",
            )
            .into(),
        },
        TestVector {
            id: "probes_across_byte_boundary".into(),
            description: "Nine set probes spill into a second data byte".into(),
            document: ExecutionData {
                version: 1,
                sessions: vec![],
                entries: vec![ExecutionEntry {
                    id: 1,
                    name: "a".into(),
                    probes: vec![true; 9],
                }],
            },
            encoded_hex: concat!(
                "01c0c00100",
                "110100000000000000",
                "000161",
                "09ff01",
            )
            .into(),
        },
    ]
}

/// Encodes bytes as a lowercase hex string.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decodes a lowercase hex string into bytes.
///
/// # Panics
///
/// Panics on odd-length input or non-hex digits; this is a test
/// utility and malformed vectors are programming errors.
pub fn hex_decode(hex: &str) -> Vec<u8> {
    assert!(hex.len() % 2 == 0, "odd-length hex string");
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).expect("invalid hex digit"))
        .collect()
}
