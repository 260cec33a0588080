//! Command line configuration.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "computer_club=warn,computer_club_core=warn";

/// Runs one working day of a computer club from a schedule file.
#[derive(Debug, Parser)]
#[command(
    name = "computer-club",
    version,
    about = "Simulate one working day of a computer club",
    long_about = "Reads a schedule file (table count, working hours, hourly rate and\n\
                  the day's events), replays it and prints the event log followed by\n\
                  per-table revenue and busy time."
)]
pub struct Cli {
    /// Schedule file to replay
    pub file: PathBuf,

    /// Report format
    #[arg(long, value_enum, env = "CLUB_OUTPUT_FORMAT", default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// How the report is written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One plain text line per record
    #[default]
    Text,
    /// One JSON object per line
    Json,
}
