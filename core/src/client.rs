//! Client records tracked by the club while they are on the premises.

/// What a client present in the club is currently doing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClientStatus {
    /// In the club without a table and not queued
    #[default]
    Inactive,
    /// Queued for the next free table
    Waiting,
    /// Seated at a table
    Active,
}

/// A client present in the club.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Client {
    /// Unique client name
    pub name: String,
    /// Current status
    pub status: ClientStatus,
    /// 1-based number of the occupied table, `None` while not seated
    pub table: Option<usize>,
}

impl Client {
    /// Creates a freshly arrived client with no table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: ClientStatus::Inactive,
            table: None,
        }
    }

    /// Seats the client at `table`.
    pub const fn seat(&mut self, table: usize) {
        self.status = ClientStatus::Active;
        self.table = Some(table);
    }

    /// Marks the client as queued.
    pub const fn enqueue(&mut self) {
        self.status = ClientStatus::Waiting;
    }

    /// Table the client is seated at, if active.
    #[must_use]
    pub const fn seated_at(&self) -> Option<usize> {
        match self.status {
            ClientStatus::Active => self.table,
            ClientStatus::Inactive | ClientStatus::Waiting => None,
        }
    }
}
