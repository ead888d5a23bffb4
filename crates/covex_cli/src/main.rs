//! Covex CLI
//!
//! Command-line tools for coverage execution data files.
//!
//! # Commands
//!
//! - `inspect` - Display file version and record statistics
//! - `dump` - Print records one by one for debugging
//! - `copy` - Re-encode a file record by record

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Covex command-line tools for execution data files.
#[derive(Parser)]
#[command(name = "covex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display file version and record statistics
    Inspect {
        /// Path to the execution data file
        file: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print records one by one for debugging
    Dump {
        /// Path to the execution data file
        file: PathBuf,

        /// Maximum number of records to print (0 = all)
        #[arg(short, long, default_value = "0")]
        limit: usize,

        /// Include probe bitmaps in the output
        #[arg(short, long)]
        probes: bool,
    },

    /// Re-encode a file record by record
    Copy {
        /// Source execution data file
        src: PathBuf,

        /// Destination file (created or truncated)
        dst: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Inspect { file, format } => {
            commands::inspect::run(&file, &format)?;
        }
        Commands::Dump {
            file,
            limit,
            probes,
        } => {
            commands::dump::run(&file, limit, probes)?;
        }
        Commands::Copy { src, dst } => {
            commands::copy::run(&src, &dst)?;
        }
        Commands::Version => {
            println!("Covex CLI v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
