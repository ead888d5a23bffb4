//! Test fixtures for on-disk execution data files.

use covex_codec::{file, ExecutionData, ExecutionEntry, SessionInfo};
use std::path::PathBuf;
use tempfile::TempDir;

/// An execution data file in a temporary directory, removed on drop.
pub struct TestFile {
    /// Path to the file.
    pub path: PathBuf,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: TempDir,
}

impl TestFile {
    /// Creates a file holding the encoded form of the given document.
    pub fn with_document(data: &ExecutionData) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("test.exec");
        file::save(&path, data).expect("Failed to save document");
        Self {
            path,
            _temp_dir: temp_dir,
        }
    }

    /// Creates a file holding the given raw bytes.
    pub fn with_bytes(bytes: &[u8]) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("test.exec");
        std::fs::write(&path, bytes).expect("Failed to write bytes");
        Self {
            path,
            _temp_dir: temp_dir,
        }
    }

    /// Creates an empty (zero-byte) file.
    pub fn empty() -> Self {
        Self::with_bytes(&[])
    }
}

/// The canonical sample document used across tests.
pub fn sample_document() -> ExecutionData {
    ExecutionData {
        version: 0x1007,
        sessions: vec![SessionInfo {
            id: "session_name".to_string(),
            start: 1_700_000_000_000,
            dump: 1_700_000_060_000,
        }],
        entries: vec![ExecutionEntry {
            id: 12,
            name: "execution_entry".to_string(),
            probes: vec![true, false, true],
        }],
    }
}
