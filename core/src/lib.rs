//! # Computer Club Core
//!
//! Event-processing state machine for one working day of a computer club.
//!
//! Clients arrive, take tables, queue when every table is busy and leave. At
//! closing time everyone still inside is sent out, each table is settled
//! (every started hour billed in full) and the report is emitted.
//!
//! ## Core Concepts
//!
//! - **State**: [`Club`] - configuration, tables, clients, queue and day log
//! - **Action**: [`ClubAction`] - one input [`Event`], or the end of the day
//! - **Reducer**: [`ClubReducer`] - the club rules, `(State, Action) → Effects`
//! - **Effect**: [`Effect`] - report instructions, not execution
//! - **Manager**: [`Manager`] - owns the state and runs effects on a [`ReportSink`]
//!
//! Illegal operations never fail the run. They are logged as error events
//! and processing continues with the next event.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveTime;
//! use computer_club_core::{Club, ClubConfig, ErrorKind, Event, EventKind, Manager, NullSink};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default();
//! let mut manager = Manager::new(
//!     Club::new(ClubConfig::new(3, at(9, 0), at(19, 0), 10)?),
//!     NullSink,
//! );
//!
//! manager.handle_event(Event::client_arrived(at(8, 48), "client1"));
//!
//! let last = manager.club().log.last().map(|e| e.kind.clone());
//! assert_eq!(last, Some(EventKind::Error { error: ErrorKind::NotOpenYet }));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod club;
pub mod effect;
pub mod event;
pub mod manager;
pub mod reducer;
pub mod sink;
pub mod table;

// Re-export commonly used types
pub use chrono::{NaiveTime, TimeDelta};
pub use client::{Client, ClientStatus};
pub use club::{Club, ClubConfig, ConfigError};
pub use effect::Effect;
pub use event::{Direction, ErrorKind, Event, EventKind, TIME_FORMAT};
pub use manager::Manager;
pub use reducer::{ClubAction, ClubReducer, Reducer};
pub use sink::{NullSink, ReportSink};
pub use smallvec::{SmallVec, smallvec};
pub use table::{Table, TableSummary};
