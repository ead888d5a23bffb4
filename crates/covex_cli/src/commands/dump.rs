//! Dump command implementation.
//!
//! Streams records straight off the decoder rather than loading the
//! whole document, so malformed files print every record up to the
//! point of failure.

use covex_codec::{ExecDecoder, Record};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Runs the dump command.
pub fn run(path: &Path, limit: usize, show_probes: bool) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let mut decoder = ExecDecoder::new(BufReader::new(file));

    let mut index = 0usize;
    while let Some(record) = decoder.next_record()? {
        print_record(index, &record, show_probes);
        index += 1;
        if limit > 0 && index >= limit {
            tracing::debug!(limit, "record limit reached");
            break;
        }
    }

    println!("{index} record(s)");
    Ok(())
}

fn print_record(index: usize, record: &Record, show_probes: bool) {
    match record {
        Record::Header { version } => {
            println!("#{index} header version={version:#06x}");
        }
        Record::SessionInfo(session) => {
            println!(
                "#{index} session id={:?} start={} dump={}",
                session.id, session.start, session.dump
            );
        }
        Record::ExecutionEntry(entry) => {
            if show_probes {
                println!(
                    "#{index} entry id={} name={:?} probes={}",
                    entry.id,
                    entry.name,
                    bitmap(&entry.probes)
                );
            } else {
                println!(
                    "#{index} entry id={} name={:?} probes={}/{}",
                    entry.id,
                    entry.name,
                    entry.covered_count(),
                    entry.probes.len()
                );
            }
        }
    }
}

fn bitmap(probes: &[bool]) -> String {
    probes.iter().map(|p| if *p { '1' } else { '0' }).collect()
}
