//! Club aggregate: configuration, tables, clients, waiting queue and day log.

use crate::client::{Client, ClientStatus};
use crate::event::Event;
use crate::table::{Table, TableSummary};
use chrono::NaiveTime;
use std::collections::{BTreeMap, VecDeque};
use thiserror::Error;

/// Reasons a club configuration is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The club has no tables.
    #[error("club must have at least one table")]
    NoTables,

    /// Closing time is not after opening time.
    #[error("closing time {close} must be after opening time {open}")]
    ClosesBeforeOpening {
        /// Opening time
        open: NaiveTime,
        /// Closing time
        close: NaiveTime,
    },

    /// The hourly rate is zero.
    #[error("hourly rate must be positive")]
    FreeOfCharge,
}

/// Working day parameters of the club.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClubConfig {
    tables: usize,
    open: NaiveTime,
    close: NaiveTime,
    hourly_rate: u32,
}

impl ClubConfig {
    /// Validates and builds a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when there are no tables, the club closes
    /// before it opens, or the hourly rate is zero.
    pub fn new(
        tables: usize,
        open: NaiveTime,
        close: NaiveTime,
        hourly_rate: u32,
    ) -> Result<Self, ConfigError> {
        if tables == 0 {
            return Err(ConfigError::NoTables);
        }
        if close <= open {
            return Err(ConfigError::ClosesBeforeOpening { open, close });
        }
        if hourly_rate == 0 {
            return Err(ConfigError::FreeOfCharge);
        }
        Ok(Self {
            tables,
            open,
            close,
            hourly_rate,
        })
    }

    /// Number of tables
    #[must_use]
    pub const fn tables(&self) -> usize {
        self.tables
    }

    /// Opening time
    #[must_use]
    pub const fn open(&self) -> NaiveTime {
        self.open
    }

    /// Closing time
    #[must_use]
    pub const fn close(&self) -> NaiveTime {
        self.close
    }

    /// Price of one started hour at a table
    #[must_use]
    pub const fn hourly_rate(&self) -> u32 {
        self.hourly_rate
    }

    /// Whether `time` falls strictly inside business hours.
    #[must_use]
    pub fn is_open_at(&self, time: NaiveTime) -> bool {
        self.open < time && time < self.close
    }
}

/// State of the club during a working day.
///
/// Clients are kept in an ordered map so that iteration is always in name
/// order. The queue holds names of clients whose status is
/// [`ClientStatus::Waiting`] and never grows past the number of tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Club {
    config: ClubConfig,
    /// Tables, table `n` at index `n - 1`
    pub tables: Vec<Table>,
    /// Clients present in the club, keyed by name
    pub clients: BTreeMap<String, Client>,
    /// Names of queued clients, head first
    pub queue: VecDeque<String>,
    /// Day log in processing order
    pub log: Vec<Event>,
}

impl Club {
    /// Creates an empty club with fresh tables
    #[must_use]
    pub fn new(config: ClubConfig) -> Self {
        Self {
            config,
            tables: fresh_tables(config.tables),
            clients: BTreeMap::new(),
            queue: VecDeque::new(),
            log: Vec::new(),
        }
    }

    /// Day parameters
    #[must_use]
    pub const fn config(&self) -> &ClubConfig {
        &self.config
    }

    /// Table by 1-based number
    #[must_use]
    pub fn table(&self, number: usize) -> Option<&Table> {
        number.checked_sub(1).and_then(|index| self.tables.get(index))
    }

    /// Mutable table by 1-based number
    pub fn table_mut(&mut self, number: usize) -> Option<&mut Table> {
        number.checked_sub(1).and_then(|index| self.tables.get_mut(index))
    }

    /// Whether at least one table is free
    #[must_use]
    pub fn has_free_table(&self) -> bool {
        self.tables.iter().any(|table| !table.is_busy())
    }

    /// Whether the queue already holds one client per table
    #[must_use]
    pub fn queue_is_full(&self) -> bool {
        self.queue.len() >= self.tables.len()
    }

    /// Client by name
    #[must_use]
    pub fn client(&self, name: &str) -> Option<&Client> {
        self.clients.get(name)
    }

    /// Status of a client, `None` when absent
    #[must_use]
    pub fn status_of(&self, name: &str) -> Option<ClientStatus> {
        self.clients.get(name).map(|client| client.status)
    }

    /// Appends an entry to the day log.
    pub fn record(&mut self, event: Event) {
        self.log.push(event);
    }

    /// Removes the first queued entry named `name`.
    pub fn dequeue(&mut self, name: &str) -> bool {
        match self.queue.iter().position(|queued| queued == name) {
            Some(index) => {
                self.queue.remove(index);
                true
            }
            None => false,
        }
    }

    /// Per-table totals in table order.
    #[must_use]
    pub fn summaries(&self) -> Vec<TableSummary> {
        self.tables
            .iter()
            .enumerate()
            .map(|(index, table)| table.summary(index + 1))
            .collect()
    }

    /// Clears clients, queue and log, and replaces every table with a fresh one.
    pub fn reset(&mut self) {
        self.clients.clear();
        self.queue.clear();
        self.log.clear();
        self.tables = fresh_tables(self.tables.len());
    }
}

fn fresh_tables(count: usize) -> Vec<Table> {
    (0..count).map(|_| Table::new()).collect()
}
