//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random execution data documents
//! whose every field stays within its encodable range.

use covex_codec::{ExecutionData, ExecutionEntry, SessionInfo};
use proptest::prelude::*;

/// Strategy for generating session records.
pub fn session_info_strategy() -> impl Strategy<Value = SessionInfo> {
    (
        prop::string::string_regex("[a-zA-Z0-9_.-]{0,48}").expect("Invalid regex"),
        any::<i64>(),
        any::<i64>(),
    )
        .prop_map(|(id, start, dump)| SessionInfo { id, start, dump })
}

/// Strategy for generating probe arrays up to `max_len` elements.
pub fn probes_strategy(max_len: usize) -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 0..=max_len)
}

/// Strategy for generating execution entries.
///
/// Names follow the slash-and-dollar convention of real instrumented
/// unit identifiers.
pub fn execution_entry_strategy() -> impl Strategy<Value = ExecutionEntry> {
    (
        any::<i64>(),
        prop::string::string_regex("[a-zA-Z0-9_$/]{1,64}").expect("Invalid regex"),
        probes_strategy(512),
    )
        .prop_map(|(id, name, probes)| ExecutionEntry { id, name, probes })
}

/// Strategy for generating whole documents.
pub fn execution_data_strategy() -> impl Strategy<Value = ExecutionData> {
    (
        any::<i16>(),
        prop::collection::vec(session_info_strategy(), 0..4),
        prop::collection::vec(execution_entry_strategy(), 0..8),
    )
        .prop_map(|(version, sessions, entries)| ExecutionData {
            version,
            sessions,
            entries,
        })
}
