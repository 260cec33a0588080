//! Club rules as a reducer.
//!
//! [`ClubReducer`] is the state machine of the club. It takes one
//! [`ClubAction`] at a time, mutates the [`Club`] in place and returns the
//! report [`Effect`]s to run. Rule violations never abort processing: they
//! are recorded in the day log as error events right after the event that
//! caused them.

use crate::client::{Client, ClientStatus};
use crate::club::Club;
use crate::effect::Effect;
use crate::event::{ErrorKind, Event, EventKind};
use chrono::NaiveTime;
use smallvec::{SmallVec, smallvec};

/// The Reducer trait - core abstraction for business logic
///
/// Reducers are pure with respect to the outside world: they update the
/// state in place and describe any output as effects.
pub trait Reducer {
    /// The state type this reducer operates on
    type State;

    /// The action type this reducer processes
    type Action;

    /// Reduce an action into state changes and effects
    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> SmallVec<[Effect; 4]>;
}

/// Inputs of the club reducer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClubAction {
    /// Process one event from the schedule
    Handle(Event),
    /// Close the club: send everyone out, settle and report
    EndDay,
}

/// Reducer implementing the club rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClubReducer;

impl ClubReducer {
    /// Creates a new `ClubReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Records an error event for a rejected operation.
    fn reject(club: &mut Club, time: NaiveTime, error: ErrorKind) {
        tracing::debug!(%time, %error, "operation rejected");
        club.record(Event::error(time, error));
    }

    fn validate_arrival(club: &Club, client: &str, time: NaiveTime) -> Result<(), ErrorKind> {
        if club.clients.contains_key(client) {
            return Err(ErrorKind::YouShallNotPass);
        }
        if !club.config().is_open_at(time) {
            return Err(ErrorKind::NotOpenYet);
        }
        Ok(())
    }

    fn validate_table_request(club: &Club, client: &str, table: usize) -> Result<(), ErrorKind> {
        if !club.clients.contains_key(client) {
            return Err(ErrorKind::ClientUnknown);
        }
        // An unknown table number can never be taken.
        match club.table(table) {
            Some(requested) if !requested.is_busy() => Ok(()),
            _ => Err(ErrorKind::PlaceIsBusy),
        }
    }

    /// Checks run in a fixed order: identity, seat, queue, then free tables.
    fn validate_wait(club: &Club, client: &str) -> Result<(), ErrorKind> {
        match club.status_of(client) {
            None => return Err(ErrorKind::ClientUnknown),
            Some(ClientStatus::Active) => return Err(ErrorKind::YouHaveAPlace),
            Some(ClientStatus::Waiting) => return Err(ErrorKind::YouAreInTheQueue),
            Some(ClientStatus::Inactive) => {}
        }
        if club.has_free_table() {
            return Err(ErrorKind::ICanWaitNoLonger);
        }
        Ok(())
    }

    fn client_arrived(club: &mut Club, time: NaiveTime, client: String) {
        if let Err(error) = Self::validate_arrival(club, &client, time) {
            Self::reject(club, time, error);
            return;
        }

        tracing::debug!(%client, "client arrived");
        club.clients.insert(client.clone(), Client::new(client));
    }

    fn table_requested(club: &mut Club, time: NaiveTime, client: &str, table: usize) {
        if let Err(error) = Self::validate_table_request(club, client, table) {
            Self::reject(club, time, error);
            return;
        }

        let rate = club.config().hourly_rate();
        let previous = club.client(client).map(|c| (c.status, c.seated_at()));
        match previous {
            Some((_, Some(current))) => {
                if let Some(freed) = club.table_mut(current) {
                    freed.end_session(time, rate);
                }
            }
            Some((ClientStatus::Waiting, None)) => {
                club.dequeue(client);
            }
            _ => {}
        }

        if let Some(requested) = club.table_mut(table) {
            requested.start_session(time);
        }
        if let Some(seated) = club.clients.get_mut(client) {
            seated.seat(table);
        }
        tracing::debug!(%client, table, "client seated");
    }

    fn client_waiting(club: &mut Club, time: NaiveTime, client: String) {
        if let Err(error) = Self::validate_wait(club, &client) {
            Self::reject(club, time, error);
            return;
        }

        if club.queue_is_full() {
            tracing::info!(%client, queued = club.queue.len(), "queue full, client sent away");
            club.record(Event::client_forced_out(time, client));
            return;
        }

        if let Some(waiting) = club.clients.get_mut(&client) {
            waiting.enqueue();
        }
        tracing::debug!(%client, position = club.queue.len() + 1, "client queued");
        club.queue.push_back(client);
    }

    fn client_left(club: &mut Club, time: NaiveTime, client: &str) {
        let Some(leaving) = club.clients.remove(client) else {
            Self::reject(club, time, ErrorKind::ClientUnknown);
            return;
        };
        tracing::debug!(%client, status = ?leaving.status, "client left");

        match (leaving.status, leaving.seated_at()) {
            (ClientStatus::Waiting, _) => {
                club.dequeue(client);
            }
            (ClientStatus::Active, Some(table)) => {
                let rate = club.config().hourly_rate();
                if let Some(freed) = club.table_mut(table) {
                    freed.end_session(time, rate);
                }
                Self::promote_next(club, time, table);
            }
            _ => {}
        }
    }

    /// Seats the head of the queue at the freshly released `table`.
    fn promote_next(club: &mut Club, time: NaiveTime, table: usize) {
        while let Some(next) = club.queue.pop_front() {
            let Some(waiting) = club.clients.get_mut(&next) else {
                continue;
            };
            waiting.seat(table);
            if let Some(freed) = club.table_mut(table) {
                freed.start_session(time);
            }
            tracing::info!(client = %next, table, "queued client seated");
            club.record(Event::table_assigned(time, next, table));
            return;
        }
    }

    fn handle(club: &mut Club, event: Event) {
        club.record(event.clone());

        let time = event.time;
        match event.kind {
            EventKind::ClientArrived { client } => Self::client_arrived(club, time, client),
            EventKind::TableRequested { client, table } => {
                Self::table_requested(club, time, &client, table);
            }
            EventKind::ClientWaiting { client } => Self::client_waiting(club, time, client),
            EventKind::ClientLeft { client } => Self::client_left(club, time, &client),
            EventKind::ClientForcedOut { .. }
            | EventKind::TableAssigned { .. }
            | EventKind::Error { .. }
            | EventKind::Unrecognized { .. } => {
                Self::reject(club, time, ErrorKind::UnknownEvent);
            }
        }
    }

    fn end_day(club: &mut Club) -> SmallVec<[Effect; 4]> {
        let open = club.config().open();
        let close = club.config().close();
        let rate = club.config().hourly_rate();

        // BTreeMap iteration is in ascending name order.
        let remaining = std::mem::take(&mut club.clients);
        for (name, client) in remaining {
            if let Some(table) = client.seated_at() {
                if let Some(seat) = club.table_mut(table) {
                    seat.end_session(close, rate);
                }
            }
            club.record(Event::client_forced_out(close, name));
        }

        let log = std::mem::take(&mut club.log);
        let tables = club.summaries();
        tracing::info!(
            events = log.len(),
            revenue = tables.iter().map(|t| t.revenue).sum::<u64>(),
            "day settled"
        );
        club.reset();

        smallvec![
            Effect::Announce(open),
            Effect::PublishLog(log),
            Effect::Announce(close),
            Effect::Settle(tables),
        ]
    }
}

impl Reducer for ClubReducer {
    type State = Club;
    type Action = ClubAction;

    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> SmallVec<[Effect; 4]> {
        match action {
            ClubAction::Handle(event) => {
                Self::handle(state, event);
                SmallVec::new()
            }
            ClubAction::EndDay => Self::end_day(state),
        }
    }
}
