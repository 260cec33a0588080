//! Per-table occupancy and revenue accumulator.
//!
//! A table only changes its totals through a start/end session pair. Ending a
//! session on a free table does nothing, so the manager can release a table
//! without first checking whether it was taken.

use chrono::{NaiveTime, TimeDelta};
use serde::{Serialize, Serializer};

const SECONDS_PER_HOUR: u64 = 3600;

/// A single table of the club.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    busy: bool,
    busy_duration: TimeDelta,
    revenue: u64,
    last_start: Option<NaiveTime>,
}

impl Table {
    /// Creates a free table with no recorded sessions
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the table busy starting at `at`.
    pub const fn start_session(&mut self, at: NaiveTime) {
        self.busy = true;
        self.last_start = Some(at);
    }

    /// Ends the running session at `at`, billing it at `hourly_rate`.
    ///
    /// Every started hour is charged in full. No-op when the table is free.
    pub fn end_session(&mut self, at: NaiveTime, hourly_rate: u32) {
        if !self.busy {
            return;
        }
        self.busy = false;

        let Some(started) = self.last_start.take() else {
            return;
        };
        // A session that ends before it began counts as empty.
        let session = (at - started).max(TimeDelta::zero());
        self.busy_duration += session;
        self.revenue += billable_hours(session) * u64::from(hourly_rate);
    }

    /// Whether a client currently occupies the table
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Total time the table has been occupied across finished sessions
    #[must_use]
    pub const fn busy_duration(&self) -> TimeDelta {
        self.busy_duration
    }

    /// Total revenue across finished sessions
    #[must_use]
    pub const fn revenue(&self) -> u64 {
        self.revenue
    }

    /// Snapshot of the totals for the end-of-day report.
    #[must_use]
    pub const fn summary(&self, number: usize) -> TableSummary {
        TableSummary {
            number,
            revenue: self.revenue,
            busy: self.busy_duration,
        }
    }
}

/// Number of hours charged for a session, partial hours rounded up.
#[must_use]
pub fn billable_hours(session: TimeDelta) -> u64 {
    let seconds = session.num_seconds().max(0).unsigned_abs();
    seconds.div_ceil(SECONDS_PER_HOUR)
}

/// Final per-table figures handed to the report sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    /// 1-based table number
    pub number: usize,
    /// Revenue collected over the day
    pub revenue: u64,
    /// Total occupied time, serialized as whole minutes
    #[serde(serialize_with = "serialize_busy")]
    pub busy: TimeDelta,
}

impl TableSummary {
    /// Busy time rounded to the nearest minute.
    #[must_use]
    pub fn busy_minutes(&self) -> i64 {
        rounded_minutes(self.busy)
    }

    /// Busy time rounded to the nearest minute, as `(hours, minutes)`.
    #[must_use]
    pub fn busy_hours_minutes(&self) -> (i64, i64) {
        let minutes = self.busy_minutes();
        (minutes / 60, minutes % 60)
    }
}

fn rounded_minutes(duration: TimeDelta) -> i64 {
    (duration.num_seconds().max(0) + 30) / 60
}

fn serialize_busy<S: Serializer>(busy: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(rounded_minutes(*busy))
}
