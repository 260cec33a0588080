//! Manager: drives the club reducer for one working day.
//!
//! The manager owns the [`Club`], the [`ClubReducer`] and a [`ReportSink`].
//! Events go in one at a time in the order given; at the end of the day the
//! reducer's report effects are executed against the sink in order.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveTime;
//! use computer_club_core::{Club, ClubConfig, Event, Manager, NullSink};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default();
//! let config = ClubConfig::new(2, at(9, 0), at(19, 0), 10)?;
//! let mut manager = Manager::new(Club::new(config), NullSink);
//!
//! manager.handle_event(Event::client_arrived(at(9, 30), "alice"));
//! manager.handle_event(Event::table_requested(at(9, 31), "alice", 1));
//! manager.end_day();
//!
//! assert!(manager.club().clients.is_empty());
//! # Ok(())
//! # }
//! ```

use crate::club::Club;
use crate::effect::Effect;
use crate::event::Event;
use crate::reducer::{ClubAction, ClubReducer, Reducer};
use crate::sink::ReportSink;

/// Single-threaded driver of the club state machine.
#[derive(Debug)]
pub struct Manager<S> {
    club: Club,
    reducer: ClubReducer,
    sink: S,
}

impl<S: ReportSink> Manager<S> {
    /// Creates a manager for `club` reporting into `sink`
    #[must_use]
    pub const fn new(club: Club, sink: S) -> Self {
        Self {
            club,
            reducer: ClubReducer::new(),
            sink,
        }
    }

    /// Applies one event to the club.
    ///
    /// The event is appended to the log first, followed by anything it
    /// triggers (errors, forced departures, reassignments).
    #[tracing::instrument(skip(self, event), name = "handle_event", fields(id = event.id(), time = %event.time))]
    pub fn handle_event(&mut self, event: Event) {
        let effects = self.reducer.reduce(&mut self.club, ClubAction::Handle(event));
        self.execute(effects);
    }

    /// Closes the club, emits the report and resets the club for a new day.
    #[tracing::instrument(skip(self), name = "end_day")]
    pub fn end_day(&mut self) {
        let effects = self.reducer.reduce(&mut self.club, ClubAction::EndDay);
        self.execute(effects);
    }

    /// Handles every event in order, then ends the day.
    pub fn run(&mut self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.handle_event(event);
        }
        self.end_day();
    }

    /// Current club state
    #[must_use]
    pub const fn club(&self) -> &Club {
        &self.club
    }

    /// Report sink
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the manager, returning the sink
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn execute(&mut self, effects: impl IntoIterator<Item = Effect>) {
        for effect in effects {
            match effect {
                Effect::None => tracing::trace!("Executing Effect::None (no-op)"),
                Effect::Announce(time) => self.sink.print_time(time),
                Effect::PublishLog(events) => self.sink.print_events(&events),
                Effect::Settle(tables) => self.sink.print_revenue(&tables),
            }
        }
    }
}
