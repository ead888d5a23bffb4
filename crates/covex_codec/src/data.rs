//! In-memory model of an execution data file.

use serde::{Deserialize, Serialize};

/// A complete execution data document.
///
/// Field order mirrors file order: one header record, then session
/// records, then execution entry records. Sequences preserve insertion
/// order, which equals the order records appeared in the stream.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExecutionData {
    /// Format version from the header record.
    pub version: i16,
    /// Recorded sessions, in file order.
    pub sessions: Vec<SessionInfo>,
    /// Execution entries, in file order.
    pub entries: Vec<ExecutionEntry>,
}

impl ExecutionData {
    /// Creates an empty document with the given format version.
    #[must_use]
    pub fn new(version: i16) -> Self {
        Self {
            version,
            sessions: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Total number of probes across all entries.
    #[must_use]
    pub fn probe_count(&self) -> usize {
        self.entries.iter().map(|e| e.probes.len()).sum()
    }
}

/// Metadata for one recorded tool-invocation session.
///
/// Sessions are associated with entries only by co-occurrence in the
/// same file; no structural relation is encoded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Text identifier of the session.
    pub id: String,
    /// Session start time, epoch milliseconds.
    pub start: i64,
    /// Time the session's data was flushed, epoch milliseconds.
    pub dump: i64,
}

/// Coverage data for one executable unit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExecutionEntry {
    /// 64-bit identifier, typically a content hash of the unit.
    pub id: i64,
    /// Text identifier of the unit.
    pub name: String,
    /// One boolean per instrumentation point, index-addressed.
    pub probes: Vec<bool>,
}

impl ExecutionEntry {
    /// Number of probes that fired.
    #[must_use]
    pub fn covered_count(&self) -> usize {
        self.probes.iter().filter(|p| **p).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_document_is_empty() {
        let data = ExecutionData::default();
        assert_eq!(data.version, 0);
        assert!(data.sessions.is_empty());
        assert!(data.entries.is_empty());
        assert_eq!(data.probe_count(), 0);
    }

    #[test]
    fn probe_count_sums_entries() {
        let mut data = ExecutionData::new(1);
        data.entries.push(ExecutionEntry {
            id: 1,
            name: "a".to_string(),
            probes: vec![true, false],
        });
        data.entries.push(ExecutionEntry {
            id: 2,
            name: "b".to_string(),
            probes: vec![true; 9],
        });
        assert_eq!(data.probe_count(), 11);
    }

    #[test]
    fn covered_count_ignores_unfired_probes() {
        let entry = ExecutionEntry {
            id: 7,
            name: "unit".to_string(),
            probes: vec![true, false, true, false],
        };
        assert_eq!(entry.covered_count(), 2);
    }
}
