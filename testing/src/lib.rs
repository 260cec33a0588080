//! # Computer Club Testing
//!
//! Testing utilities and helpers for the computer club simulation.
//!
//! This crate provides:
//! - A recording [`ReportSink`](computer_club_core::ReportSink) for end-of-day assertions
//! - Time, config and club builders
//! - Property-based testing strategies
//! - The given/when/then [`ReducerTest`] harness
//!
//! ## Example
//!
//! ```
//! use computer_club_core::{Event, Manager};
//! use computer_club_testing::{RecordingSink, at, club};
//!
//! let mut manager = Manager::new(club(3), RecordingSink::new());
//! manager.run([
//!     Event::client_arrived(at("09:41"), "client1"),
//!     Event::table_requested(at("09:54"), "client1", 1),
//! ]);
//!
//! let sink = manager.into_sink();
//! assert_eq!(sink.times, [at("09:00"), at("19:00")]);
//! assert_eq!(sink.tables()[0].revenue, 100);
//! ```


/// Mock implementations of the report port
pub mod mocks {
    use computer_club_core::{Event, NaiveTime, ReportSink, TableSummary};

    /// Report sink that keeps every call for later inspection
    ///
    /// Each `print_events` and `print_revenue` call is stored as its own
    /// batch, so tests can check how often a report section was emitted.
    ///
    /// # Example
    ///
    /// ```
    /// use computer_club_core::ReportSink;
    /// use computer_club_testing::{RecordingSink, at};
    ///
    /// let mut sink = RecordingSink::new();
    /// sink.print_time(at("09:00"));
    /// assert_eq!(sink.times, [at("09:00")]);
    /// assert!(sink.events().is_empty());
    /// ```
    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    pub struct RecordingSink {
        /// Times passed to `print_time`, in call order
        pub times: Vec<NaiveTime>,
        /// One entry per `print_events` call
        pub event_batches: Vec<Vec<Event>>,
        /// One entry per `print_revenue` call
        pub revenue_batches: Vec<Vec<TableSummary>>,
    }

    impl RecordingSink {
        /// Create an empty sink
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// All published events, flattened across calls
        #[must_use]
        pub fn events(&self) -> Vec<Event> {
            self.event_batches.iter().flatten().cloned().collect()
        }

        /// Table summaries of the most recent settlement
        #[must_use]
        pub fn tables(&self) -> &[TableSummary] {
            self.revenue_batches.last().map_or(&[], Vec::as_slice)
        }

        /// Rendered log lines, flattened across calls
        #[must_use]
        pub fn lines(&self) -> Vec<String> {
            self.events().iter().map(ToString::to_string).collect()
        }
    }

    impl ReportSink for RecordingSink {
        fn print_time(&mut self, time: NaiveTime) {
            self.times.push(time);
        }

        fn print_events(&mut self, events: &[Event]) {
            self.event_batches.push(events.to_vec());
        }

        fn print_revenue(&mut self, tables: &[TableSummary]) {
            self.revenue_batches.push(tables.to_vec());
        }
    }
}

/// Test helpers and builders
pub mod helpers {
    use computer_club_core::{Club, ClubConfig, NaiveTime, TIME_FORMAT};

    /// Parse an `HH:MM` literal
    ///
    /// # Panics
    ///
    /// Panics if `time` is not a valid `HH:MM` string.
    #[must_use]
    #[allow(clippy::expect_used)] // Test helper
    pub fn at(time: &str) -> NaiveTime {
        NaiveTime::parse_from_str(time, TIME_FORMAT).expect("test time should be HH:MM")
    }

    /// Build a time from hours and minutes
    ///
    /// # Panics
    ///
    /// Panics if the hour or minute is out of range.
    #[must_use]
    #[allow(clippy::expect_used)] // Test helper
    pub fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).expect("test time should be in range")
    }

    /// Configuration with `tables` tables, open 09:00 to 19:00 at 10 per hour
    ///
    /// # Panics
    ///
    /// Panics if `tables` is zero.
    #[must_use]
    pub fn config(tables: usize) -> ClubConfig {
        config_with(tables, "09:00", "19:00", 10)
    }

    /// Configuration from explicit values
    ///
    /// # Panics
    ///
    /// Panics if the values do not form a valid configuration.
    #[must_use]
    #[allow(clippy::expect_used)] // Test helper
    pub fn config_with(tables: usize, open: &str, close: &str, hourly_rate: u32) -> ClubConfig {
        ClubConfig::new(tables, at(open), at(close), hourly_rate)
            .expect("test configuration should be valid")
    }

    /// Empty club from [`config`]
    ///
    /// # Panics
    ///
    /// Panics if `tables` is zero.
    #[must_use]
    pub fn club(tables: usize) -> Club {
        Club::new(config(tables))
    }
}

/// Property-based testing strategies
pub mod properties {
    use super::helpers::hm;
    use computer_club_core::{NaiveTime, TimeDelta};
    use proptest::prelude::*;

    /// Client names drawn from the allowed alphabet
    pub fn client_name() -> impl Strategy<Value = String> {
        "[a-z0-9_-]{1,12}"
    }

    /// Any minute of the day
    pub fn time_of_day() -> impl Strategy<Value = NaiveTime> {
        (0u32..24, 0u32..60).prop_map(|(h, m)| hm(h, m))
    }

    /// Times in `[from, to)`, minute precision
    ///
    /// # Panics
    ///
    /// Panics when the strategy is sampled if `to` is not after `from`.
    pub fn time_between(from: NaiveTime, to: NaiveTime) -> impl Strategy<Value = NaiveTime> {
        let minutes = (to - from).num_minutes();
        (0..minutes).prop_map(move |m| from + TimeDelta::minutes(m))
    }

    /// Session lengths up to a full day
    pub fn session_length() -> impl Strategy<Value = TimeDelta> {
        (0i64..=24 * 60).prop_map(TimeDelta::minutes)
    }
}

// Re-export commonly used items
pub use helpers::{at, club, config, config_with, hm};
pub use mocks::RecordingSink;
pub use reducer_test::{ReducerTest, assertions};
