//! Schedule file reader.
//!
//! A schedule is three header lines followed by one event per line:
//!
//! ```text
//! 3
//! 09:00 19:00
//! 10
//! 08:48 1 client1
//! 09:54 2 client1 1
//! ```
//!
//! Any malformed line aborts the whole read. The club never sees a partially
//! parsed schedule.

use chrono::NaiveTime;
use computer_club_core::event::TABLE_REQUESTED;
use computer_club_core::{ClubConfig, ConfigError, Event, EventKind, TIME_FORMAT};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Result type alias for schedule parsing.
pub type Result<T> = std::result::Result<T, ParseError>;

/// A parsed schedule: the club configuration and its incoming events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schedule {
    /// Club parameters from the header
    pub config: ClubConfig,
    /// Incoming events in file order
    pub events: Vec<Event>,
}

/// Why a schedule could not be read.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The underlying reader failed.
    #[error("failed to read schedule")]
    Io(#[from] io::Error),

    /// The input ended inside the header.
    #[error("schedule ends before the {0} line")]
    MissingHeader(&'static str),

    /// A line is malformed.
    #[error("line {line}: {problem}: `{text}`")]
    Line {
        /// 1-based line number
        line: usize,
        /// The offending line
        text: String,
        /// What is wrong with it
        problem: Problem,
    },
}

impl ParseError {
    /// Line number of a malformed line
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Line { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// What is wrong with a malformed line
    #[must_use]
    pub const fn problem(&self) -> Option<&Problem> {
        match self {
            Self::Line { problem, .. } => Some(problem),
            _ => None,
        }
    }
}

/// Specific defect of a malformed line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Problem {
    /// Header line 1 is not a number
    #[error("invalid table count")]
    TableCount,

    /// Header line 2 is not two `HH:MM` times
    #[error("invalid working hours")]
    WorkingHours,

    /// Header line 3 is not a number
    #[error("invalid hourly rate")]
    HourlyRate,

    /// Header values do not form a valid club
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Fewer than three fields
    #[error("expected `<time> <id> <client>`")]
    TooFewFields,

    /// Extra fields on a non table event
    #[error("unexpected fields after the client name")]
    TooManyFields,

    /// Time is not `HH:MM`
    #[error("invalid time")]
    Time,

    /// Id is not a non-negative integer
    #[error("invalid event id")]
    EventId,

    /// Table request without exactly one table field
    #[error("table request needs `<time> 2 <client> <table>`")]
    MissingTable,

    /// Table number is not in `1..=tables`
    #[error("table number must be between 1 and {tables}")]
    TableNumber {
        /// Number of tables in the club
        tables: usize,
    },
}

/// Opens and parses a schedule file.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if the file cannot be read, or the first
/// malformed line otherwise.
pub fn load(path: impl AsRef<Path>) -> Result<Schedule> {
    let file = File::open(path)?;
    parse(BufReader::new(file))
}

/// Parses a schedule from any buffered reader.
///
/// # Errors
///
/// Returns the first malformed line, a truncated header, or a read failure.
pub fn parse(reader: impl BufRead) -> Result<Schedule> {
    let mut lines = reader.lines().enumerate().map(|(i, line)| (i + 1, line));

    let mut header = |name: &'static str| -> Result<(usize, String)> {
        match lines.next() {
            Some((n, line)) => Ok((n, line?)),
            None => Err(ParseError::MissingHeader(name)),
        }
    };
    let (tables_line, tables_text) = header("table count")?;
    let (hours_line, hours_text) = header("working hours")?;
    let (rate_line, rate_text) = header("hourly rate")?;

    let tables = tables_text
        .trim()
        .parse::<usize>()
        .map_err(|_| malformed(tables_line, &tables_text, Problem::TableCount))?;
    let (open, close) = parse_hours(&hours_text)
        .ok_or_else(|| malformed(hours_line, &hours_text, Problem::WorkingHours))?;
    let hourly_rate = rate_text
        .trim()
        .parse::<u32>()
        .map_err(|_| malformed(rate_line, &rate_text, Problem::HourlyRate))?;

    let config = ClubConfig::new(tables, open, close, hourly_rate).map_err(|e| {
        let (line, text) = match e {
            ConfigError::NoTables => (tables_line, &tables_text),
            ConfigError::ClosesBeforeOpening { .. } => (hours_line, &hours_text),
            ConfigError::FreeOfCharge => (rate_line, &rate_text),
        };
        malformed(line, text, e.into())
    })?;

    let mut events = Vec::new();
    let mut blank = None;
    for (n, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            blank.get_or_insert(n);
            continue;
        }
        // Blank lines are only tolerated at the end of the file.
        if let Some(at) = blank {
            return Err(malformed(at, "", Problem::TooFewFields));
        }
        let event = parse_event(&line, tables).map_err(|problem| malformed(n, &line, problem))?;
        events.push(event);
    }

    tracing::debug!(tables, events = events.len(), "schedule parsed");
    Ok(Schedule { config, events })
}

/// Parses one event line against a club with `tables` tables.
///
/// # Errors
///
/// Returns the [`Problem`] with the line.
pub fn parse_event(line: &str, tables: usize) -> std::result::Result<Event, Problem> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [time, id, client, rest @ ..] = fields.as_slice() else {
        return Err(Problem::TooFewFields);
    };

    let time = parse_time(time).ok_or(Problem::Time)?;
    let id = id.parse::<u32>().map_err(|_| Problem::EventId)?;
    let client = (*client).to_owned();

    if id == TABLE_REQUESTED {
        let [table] = rest else {
            return Err(Problem::MissingTable);
        };
        let table = table
            .parse::<usize>()
            .ok()
            .filter(|t| (1..=tables).contains(t))
            .ok_or(Problem::TableNumber { tables })?;
        return Ok(Event::table_requested(time, client, table));
    }

    if !rest.is_empty() {
        return Err(Problem::TooManyFields);
    }
    Ok(Event::new(time, EventKind::from_input(id, client)))
}

fn parse_hours(line: &str) -> Option<(NaiveTime, NaiveTime)> {
    let mut fields = line.split_whitespace();
    let open = parse_time(fields.next()?)?;
    let close = parse_time(fields.next()?)?;
    fields.next().is_none().then_some((open, close))
}

fn parse_time(field: &str) -> Option<NaiveTime> {
    if field.len() != 5 {
        return None;
    }
    NaiveTime::parse_from_str(field, TIME_FORMAT).ok()
}

fn malformed(line: usize, text: &str, problem: Problem) -> ParseError {
    ParseError::Line {
        line,
        text: text.to_owned(),
        problem,
    }
}
