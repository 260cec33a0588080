//! `computer-club` binary.
//!
//! # Usage
//!
//! ```bash
//! computer-club schedule.txt
//! CLUB_OUTPUT_FORMAT=json computer-club schedule.txt
//! RUST_LOG=computer_club_core=debug computer-club schedule.txt
//! ```
//!
//! The report goes to stdout, logs to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use computer_club::config::{Cli, DEFAULT_LOG_FILTER, OutputFormat};
use computer_club::output::{JsonLinesSink, TextSink};
use computer_club::{input, simulate};
use std::io::{self, BufWriter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let schedule = input::load(&cli.file)
        .with_context(|| format!("failed to load schedule {}", cli.file.display()))?;
    tracing::info!(
        file = %cli.file.display(),
        tables = schedule.config.tables(),
        events = schedule.events.len(),
        "starting day"
    );

    let out = BufWriter::new(io::stdout().lock());
    match cli.format {
        OutputFormat::Text => simulate(schedule, TextSink::new(out)).finish(),
        OutputFormat::Json => simulate(schedule, JsonLinesSink::new(out)).finish(),
    }
    .context("failed to write report")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}
