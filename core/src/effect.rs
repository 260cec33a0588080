//! Report instructions produced by the reducer.
//!
//! Effects are descriptions, not execution. The reducer returns them and the
//! [`Manager`](crate::manager::Manager) replays them, in order, against its
//! [`ReportSink`](crate::sink::ReportSink).

use crate::event::Event;
use crate::table::TableSummary;
use chrono::NaiveTime;

/// A side effect to be executed by the manager.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// No-op effect
    None,

    /// Print a single time (opening or closing notice)
    Announce(NaiveTime),

    /// Print the full day log
    PublishLog(Vec<Event>),

    /// Print per-table totals
    Settle(Vec<TableSummary>),
}

impl Effect {
    /// Whether executing this effect does nothing
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
