//! Report sink port.
//!
//! The club never writes output itself. At the end of the day the manager
//! hands the opening time, the log, the closing time and the table totals to
//! a [`ReportSink`], one call each, in that order.

use crate::event::Event;
use crate::table::TableSummary;
use chrono::NaiveTime;

/// Destination for the end-of-day report.
pub trait ReportSink {
    /// Print a single time notice
    fn print_time(&mut self, time: NaiveTime);

    /// Print the day log, one entry per event
    fn print_events(&mut self, events: &[Event]);

    /// Print per-table revenue and busy time in table order
    fn print_revenue(&mut self, tables: &[TableSummary]);
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn print_time(&mut self, time: NaiveTime) {
        (**self).print_time(time);
    }

    fn print_events(&mut self, events: &[Event]) {
        (**self).print_events(events);
    }

    fn print_revenue(&mut self, tables: &[TableSummary]) {
        (**self).print_revenue(tables);
    }
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn print_time(&mut self, time: NaiveTime) {
        (**self).print_time(time);
    }

    fn print_events(&mut self, events: &[Event]) {
        (**self).print_events(events);
    }

    fn print_revenue(&mut self, tables: &[TableSummary]) {
        (**self).print_revenue(tables);
    }
}

/// Sink that drops everything, for driving the club without a report.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn print_time(&mut self, _time: NaiveTime) {}

    fn print_events(&mut self, _events: &[Event]) {}

    fn print_revenue(&mut self, _tables: &[TableSummary]) {}
}
