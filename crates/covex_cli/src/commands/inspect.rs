//! Inspect command implementation.

use covex_codec::file;
use serde::Serialize;
use std::path::Path;

/// File inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// File path.
    pub path: String,
    /// Format version from the header record.
    pub version: i16,
    /// Number of session records.
    pub session_count: usize,
    /// Number of execution entry records.
    pub entry_count: usize,
    /// Total number of probes across all entries.
    pub probe_count: usize,
    /// Number of probes that fired.
    pub covered_count: usize,
    /// Session summaries.
    pub sessions: Vec<SessionSummary>,
}

/// Summary of a single session record.
#[derive(Debug, Serialize)]
pub struct SessionSummary {
    /// Session identifier.
    pub id: String,
    /// Start time, epoch milliseconds.
    pub start: i64,
    /// Dump time, epoch milliseconds.
    pub dump: i64,
}

/// Runs the inspect command.
pub fn run(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let data = file::load(path)?;

    let result = InspectResult {
        path: path.display().to_string(),
        version: data.version,
        session_count: data.sessions.len(),
        entry_count: data.entries.len(),
        probe_count: data.probe_count(),
        covered_count: data.entries.iter().map(|e| e.covered_count()).sum(),
        sessions: data
            .sessions
            .iter()
            .map(|s| SessionSummary {
                id: s.id.clone(),
                start: s.start,
                dump: s.dump,
            })
            .collect(),
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        "text" => print_text(&result),
        other => return Err(format!("Unknown format: {other}").into()),
    }

    Ok(())
}

fn print_text(result: &InspectResult) {
    println!("File: {}", result.path);
    println!("Version: {:#06x}", result.version);
    println!("Sessions: {}", result.session_count);
    for session in &result.sessions {
        println!(
            "  {} (start={}, dump={})",
            session.id, session.start, session.dump
        );
    }
    println!("Entries: {}", result.entry_count);
    println!(
        "Probes: {} ({} covered)",
        result.probe_count, result.covered_count
    );
}
