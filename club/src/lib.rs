//! # Computer Club
//!
//! File and console adapters around [`computer_club_core`].
//!
//! - [`input`]: reads a schedule file into a club configuration and events
//! - [`output`]: text and JSON-lines report sinks
//! - [`config`]: command line options of the `computer-club` binary
//!
//! ## Example
//!
//! ```
//! use computer_club::{input, output::TextSink, simulate};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schedule = input::parse("1\n09:00 19:00\n10\n09:30 1 alice\n".as_bytes())?;
//! let report = simulate(schedule, TextSink::new(Vec::new())).finish()?;
//!
//! assert_eq!(
//!     String::from_utf8(report)?,
//!     "09:00\n09:30 1 alice\n19:00 11 alice\n19:00\n1 0 00:00\n"
//! );
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod input;
pub mod output;

use computer_club_core::{Club, Manager, ReportSink};
use input::Schedule;

/// Replays a schedule for one day and returns the sink holding the report.
pub fn simulate<S: ReportSink>(schedule: Schedule, sink: S) -> S {
    let mut manager = Manager::new(Club::new(schedule.config), sink);
    manager.run(schedule.events);
    manager.into_sink()
}
