//! Event model for the club log.
//!
//! Every entry of the day log is an [`Event`]: a timestamp plus a closed set of
//! payload variants. Incoming events are read from the schedule; outgoing ones
//! are synthesized by the club (forced departures, table reassignments and
//! error notifications). The numeric id is derived from the variant, with
//! [`EventKind::Unrecognized`] carrying ids the club does not know.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveTime;
//! use computer_club_core::event::{Direction, Event};
//!
//! let at = NaiveTime::from_hms_opt(10, 5, 0).unwrap_or_default();
//! let event = Event::table_requested(at, "alice", 2);
//! assert_eq!(event.id(), 2);
//! assert_eq!(event.direction(), Direction::Incoming);
//! assert_eq!(event.to_string(), "10:05 2 alice 2");
//! ```

use chrono::NaiveTime;
use serde::Serialize;
use std::fmt;

/// Time format used throughout the log, `HH:MM`.
pub const TIME_FORMAT: &str = "%H:%M";

/// Id of a client arrival.
pub const CLIENT_ARRIVED: u32 = 1;
/// Id of a table request.
pub const TABLE_REQUESTED: u32 = 2;
/// Id of a wait request.
pub const CLIENT_WAITING: u32 = 3;
/// Id of a voluntary departure.
pub const CLIENT_LEFT: u32 = 4;
/// Id of a forced departure.
pub const CLIENT_FORCED_OUT: u32 = 11;
/// Id of a queue promotion onto a freed table.
pub const TABLE_ASSIGNED: u32 = 12;
/// Id of an error notification.
pub const ERROR: u32 = 13;

/// Whether an event came from the input or was produced by the club.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Read from the schedule
    Incoming,
    /// Synthesized by the club
    Outgoing,
}

/// Error tags the club reports in the log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// The client is already in the club
    YouShallNotPass,
    /// Arrival outside business hours
    NotOpenYet,
    /// The client is not in the club
    ClientUnknown,
    /// The requested table is occupied
    PlaceIsBusy,
    /// The client asked to wait while seated
    YouHaveAPlace,
    /// The client is already queued
    YouAreInTheQueue,
    /// The client asked to wait while a table is free
    #[serde(rename = "ICanWaitNoLonger!")]
    ICanWaitNoLonger,
    /// The event id is not recognized
    UnknownEvent,
}

impl ErrorKind {
    /// Tag as printed in the log
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::YouShallNotPass => "YouShallNotPass",
            Self::NotOpenYet => "NotOpenYet",
            Self::ClientUnknown => "ClientUnknown",
            Self::PlaceIsBusy => "PlaceIsBusy",
            Self::YouHaveAPlace => "YouHaveAPlace",
            Self::YouAreInTheQueue => "YouAreInTheQueue",
            Self::ICanWaitNoLonger => "ICanWaitNoLonger!",
            Self::UnknownEvent => "UnknownEvent",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a log entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    /// Id 1: a client enters the club
    ClientArrived {
        /// Client name
        client: String,
    },
    /// Id 2: a client sits down at a table
    TableRequested {
        /// Client name
        client: String,
        /// 1-based table number
        table: usize,
    },
    /// Id 3: a client asks to wait for a free table
    ClientWaiting {
        /// Client name
        client: String,
    },
    /// Id 4: a client leaves
    ClientLeft {
        /// Client name
        client: String,
    },
    /// Id 11: the club sends a client away
    ClientForcedOut {
        /// Client name
        client: String,
    },
    /// Id 12: a queued client is seated at a freed table
    TableAssigned {
        /// Client name
        client: String,
        /// 1-based table number
        table: usize,
    },
    /// Id 13: an operation was rejected
    Error {
        /// Rejection reason
        error: ErrorKind,
    },
    /// An input event whose id the club does not handle
    Unrecognized {
        /// Raw id from the input, reported as the event id
        #[serde(skip_serializing)]
        id: u32,
        /// Client name from the input
        client: String,
    },
}

impl EventKind {
    /// Numeric event id
    #[must_use]
    pub const fn id(&self) -> u32 {
        match self {
            Self::ClientArrived { .. } => CLIENT_ARRIVED,
            Self::TableRequested { .. } => TABLE_REQUESTED,
            Self::ClientWaiting { .. } => CLIENT_WAITING,
            Self::ClientLeft { .. } => CLIENT_LEFT,
            Self::ClientForcedOut { .. } => CLIENT_FORCED_OUT,
            Self::TableAssigned { .. } => TABLE_ASSIGNED,
            Self::Error { .. } => ERROR,
            Self::Unrecognized { id, .. } => *id,
        }
    }

    /// Client the event is about, if any
    #[must_use]
    pub fn client(&self) -> Option<&str> {
        match self {
            Self::ClientArrived { client }
            | Self::TableRequested { client, .. }
            | Self::ClientWaiting { client }
            | Self::ClientLeft { client }
            | Self::ClientForcedOut { client }
            | Self::TableAssigned { client, .. }
            | Self::Unrecognized { client, .. } => Some(client),
            Self::Error { .. } => None,
        }
    }

    /// Table number carried by table events
    #[must_use]
    pub const fn table(&self) -> Option<usize> {
        match self {
            Self::TableRequested { table, .. } | Self::TableAssigned { table, .. } => Some(*table),
            _ => None,
        }
    }

    /// Builds an input event from its raw id.
    ///
    /// Ids 1, 3 and 4 map to their client events; id 2 needs a table and is
    /// handled by [`EventKind::TableRequested`] directly. Everything else,
    /// including the outgoing ids, becomes [`EventKind::Unrecognized`].
    #[must_use]
    pub fn from_input(id: u32, client: String) -> Self {
        match id {
            CLIENT_ARRIVED => Self::ClientArrived { client },
            CLIENT_WAITING => Self::ClientWaiting { client },
            CLIENT_LEFT => Self::ClientLeft { client },
            _ => Self::Unrecognized { id, client },
        }
    }
}

/// A single log entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Event {
    /// When the event happened
    pub time: NaiveTime,
    /// What happened
    #[serde(flatten)]
    pub kind: EventKind,
}

impl Event {
    /// Creates an event from its parts
    #[must_use]
    pub const fn new(time: NaiveTime, kind: EventKind) -> Self {
        Self { time, kind }
    }

    /// Id 1 event
    #[must_use]
    pub fn client_arrived(time: NaiveTime, client: impl Into<String>) -> Self {
        Self::new(time, EventKind::ClientArrived { client: client.into() })
    }

    /// Id 2 event
    #[must_use]
    pub fn table_requested(time: NaiveTime, client: impl Into<String>, table: usize) -> Self {
        Self::new(
            time,
            EventKind::TableRequested {
                client: client.into(),
                table,
            },
        )
    }

    /// Id 3 event
    #[must_use]
    pub fn client_waiting(time: NaiveTime, client: impl Into<String>) -> Self {
        Self::new(time, EventKind::ClientWaiting { client: client.into() })
    }

    /// Id 4 event
    #[must_use]
    pub fn client_left(time: NaiveTime, client: impl Into<String>) -> Self {
        Self::new(time, EventKind::ClientLeft { client: client.into() })
    }

    /// Id 11 event
    #[must_use]
    pub fn client_forced_out(time: NaiveTime, client: impl Into<String>) -> Self {
        Self::new(time, EventKind::ClientForcedOut { client: client.into() })
    }

    /// Id 12 event
    #[must_use]
    pub fn table_assigned(time: NaiveTime, client: impl Into<String>, table: usize) -> Self {
        Self::new(
            time,
            EventKind::TableAssigned {
                client: client.into(),
                table,
            },
        )
    }

    /// Id 13 event
    #[must_use]
    pub const fn error(time: NaiveTime, error: ErrorKind) -> Self {
        Self::new(time, EventKind::Error { error })
    }

    /// Numeric event id
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.kind.id()
    }

    /// Outgoing for synthesized ids, incoming for everything else
    #[must_use]
    pub const fn direction(&self) -> Direction {
        match self.kind {
            EventKind::ClientForcedOut { .. }
            | EventKind::TableAssigned { .. }
            | EventKind::Error { .. } => Direction::Outgoing,
            _ => Direction::Incoming,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.time.format(TIME_FORMAT), self.id())?;
        match &self.kind {
            EventKind::Error { error } => write!(f, " {error}"),
            kind => {
                if let Some(client) = kind.client() {
                    write!(f, " {client}")?;
                }
                if let Some(table) = kind.table() {
                    write!(f, " {table}")?;
                }
                Ok(())
            }
        }
    }
}
