//! Report writers.
//!
//! Both sinks write to any [`Write`]. A failed write is logged and remembered;
//! the rest of the report is still attempted and the first failure is
//! returned by `finish`.

use chrono::NaiveTime;
use computer_club_core::{Event, ReportSink, TIME_FORMAT, TableSummary};
use serde::Serialize;
use std::io::{self, Write};

/// Plain text report, one record per line.
///
/// ```text
/// 09:00
/// 08:48 1 client1
/// 08:48 13 NotOpenYet
/// 19:00
/// 1 70 05:58
/// ```
#[derive(Debug)]
pub struct TextSink<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TextSink<W> {
    /// Wrap a writer
    pub const fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flush and return the writer, or the first write error.
    ///
    /// # Errors
    ///
    /// Returns the first error hit while writing or flushing.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_fmt(args).and_then(|()| self.out.write_all(b"\n")) {
            tracing::error!(error = %e, "failed to write report line");
            self.error = Some(e);
        }
    }
}

impl<W: Write> ReportSink for TextSink<W> {
    fn print_time(&mut self, time: NaiveTime) {
        self.line(format_args!("{}", time.format(TIME_FORMAT)));
    }

    fn print_events(&mut self, events: &[Event]) {
        for event in events {
            self.line(format_args!("{event}"));
        }
    }

    fn print_revenue(&mut self, tables: &[TableSummary]) {
        for table in tables {
            let (hours, minutes) = table.busy_hours_minutes();
            self.line(format_args!(
                "{} {} {hours:02}:{minutes:02}",
                table.number, table.revenue
            ));
        }
    }
}

/// One JSON object per line, tagged by `type`.
///
/// ```text
/// {"type":"time","time":"09:00:00"}
/// {"type":"event","id":1,"time":"08:48:00","kind":"client_arrived","client":"client1"}
/// {"type":"table","number":1,"revenue":70,"busy":358}
/// ```
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    out: W,
    error: Option<io::Error>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Record<'a> {
    Time { time: NaiveTime },
    Event(EventRecord<'a>),
    Table(&'a TableSummary),
}

#[derive(Serialize)]
struct EventRecord<'a> {
    id: u32,
    #[serde(flatten)]
    event: &'a Event,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer
    pub const fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flush and return the writer, or the first write error.
    ///
    /// # Errors
    ///
    /// Returns the first error hit while writing or flushing.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn record(&mut self, record: &Record<'_>) {
        if self.error.is_some() {
            return;
        }
        let written = serde_json::to_writer(&mut self.out, record)
            .map_err(io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(e) = written {
            tracing::error!(error = %e, "failed to write report record");
            self.error = Some(e);
        }
    }
}

impl<W: Write> ReportSink for JsonLinesSink<W> {
    fn print_time(&mut self, time: NaiveTime) {
        self.record(&Record::Time { time });
    }

    fn print_events(&mut self, events: &[Event]) {
        for event in events {
            self.record(&Record::Event(EventRecord {
                id: event.id(),
                event,
            }));
        }
    }

    fn print_revenue(&mut self, tables: &[TableSummary]) {
        for table in tables {
            self.record(&Record::Table(table));
        }
    }
}
