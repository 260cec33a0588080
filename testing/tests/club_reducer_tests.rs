//! Club rules exercised through the `ReducerTest` harness

#![allow(clippy::unwrap_used)] // Tests can unwrap
#![allow(clippy::expect_used)] // Tests can expect

use computer_club_core::{
    ClientStatus, Club, ClubAction, ClubReducer, Effect, ErrorKind, Event, EventKind, Manager,
    Reducer, ReportSink, TimeDelta,
};
use computer_club_testing::{
    RecordingSink, ReducerTest, assertions, at, club, config_with, properties,
};
use proptest::prelude::*;

fn handle(events: impl IntoIterator<Item = Event>) -> Vec<ClubAction> {
    events.into_iter().map(ClubAction::Handle).collect()
}

fn last_error(club: &Club) -> Option<ErrorKind> {
    club.log.iter().rev().find_map(|e| match e.kind {
        EventKind::Error { error } => Some(error),
        _ => None,
    })
}

#[test]
fn test_table_request_seats_client() {
    ReducerTest::new(ClubReducer::new())
        .given_state(club(2))
        .given_actions(handle([Event::client_arrived(at("10:00"), "alice")]))
        .when_action(ClubAction::Handle(Event::table_requested(
            at("10:05"),
            "alice",
            2,
        )))
        .then_state(|club| {
            assert_eq!(club.status_of("alice"), Some(ClientStatus::Active));
            assert_eq!(club.client("alice").unwrap().seated_at(), Some(2));
            assert!(club.table(2).unwrap().is_busy());
            assert!(!club.table(1).unwrap().is_busy());
        })
        .then_effects(assertions::assert_no_effects)
        .run();
}

#[test]
fn test_busy_table_is_refused() {
    ReducerTest::new(ClubReducer::new())
        .given_state(club(1))
        .given_actions(handle([
            Event::client_arrived(at("10:00"), "alice"),
            Event::client_arrived(at("10:00"), "bob"),
            Event::table_requested(at("10:01"), "alice", 1),
        ]))
        .when_action(ClubAction::Handle(Event::table_requested(
            at("10:02"),
            "bob",
            1,
        )))
        .then_state(|club| {
            assert_eq!(last_error(club), Some(ErrorKind::PlaceIsBusy));
            assert_eq!(club.status_of("bob"), Some(ClientStatus::Inactive));
            assert_eq!(club.log.last(), Some(&Event::error(at("10:02"), ErrorKind::PlaceIsBusy)));
        })
        .run();
}

#[test]
fn test_moving_tables_bills_first_session() {
    ReducerTest::new(ClubReducer::new())
        .given_state(club(2))
        .given_actions(handle([
            Event::client_arrived(at("10:00"), "alice"),
            Event::table_requested(at("10:00"), "alice", 1),
        ]))
        .when_action(ClubAction::Handle(Event::table_requested(
            at("11:30"),
            "alice",
            2,
        )))
        .then_state(|club| {
            let first = club.table(1).unwrap();
            assert!(!first.is_busy());
            assert_eq!(first.revenue(), 20);
            assert_eq!(first.busy_duration(), TimeDelta::minutes(90));
            assert!(club.table(2).unwrap().is_busy());
        })
        .run();
}

#[test]
fn test_wait_with_free_table_is_refused() {
    ReducerTest::new(ClubReducer::new())
        .given_state(club(2))
        .given_actions(handle([Event::client_arrived(at("10:00"), "alice")]))
        .when_action(ClubAction::Handle(Event::client_waiting(at("10:01"), "alice")))
        .then_state(|club| {
            assert_eq!(last_error(club), Some(ErrorKind::ICanWaitNoLonger));
            assert!(club.queue.is_empty());
        })
        .run();
}

#[test]
fn test_departure_promotes_queue_head() {
    ReducerTest::new(ClubReducer::new())
        .given_state(club(1))
        .given_actions(handle([
            Event::client_arrived(at("10:00"), "alice"),
            Event::client_arrived(at("10:00"), "bob"),
            Event::table_requested(at("10:00"), "alice", 1),
            Event::client_waiting(at("10:10"), "bob"),
        ]))
        .when_action(ClubAction::Handle(Event::client_left(at("11:00"), "alice")))
        .then_state(|club| {
            assert!(club.client("alice").is_none());
            assert_eq!(club.status_of("bob"), Some(ClientStatus::Active));
            assert!(club.queue.is_empty());
            assert_eq!(
                club.log.last(),
                Some(&Event::table_assigned(at("11:00"), "bob", 1))
            );
            assert_eq!(club.table(1).unwrap().revenue(), 10);
        })
        .run();
}

#[test]
fn test_end_day_emits_report() {
    ReducerTest::new(ClubReducer::new())
        .given_state(club(2))
        .given_actions(handle([
            Event::client_arrived(at("10:00"), "zed"),
            Event::client_arrived(at("10:00"), "amy"),
            Event::table_requested(at("10:00"), "zed", 2),
        ]))
        .when_action(ClubAction::EndDay)
        .then_state(|club| {
            assert!(club.clients.is_empty());
            assert!(club.log.is_empty());
            assert!(club.tables.iter().all(|t| t.revenue() == 0 && !t.is_busy()));
        })
        .then_effects(|effects| {
            assertions::assert_report_effects(effects);
            let Effect::PublishLog(log) = &effects[1] else {
                unreachable!()
            };
            assert_eq!(
                log[log.len() - 2..],
                [
                    Event::client_forced_out(at("19:00"), "amy"),
                    Event::client_forced_out(at("19:00"), "zed"),
                ]
            );
            let Effect::Settle(tables) = &effects[3] else {
                unreachable!()
            };
            assert_eq!(tables[1].revenue, 90);
            assert_eq!(tables[0].revenue, 0);
        })
        .run();
}

#[test]
fn test_manager_reports_to_recording_sink() {
    let config = config_with(1, "11:00", "20:00", 250);
    let mut manager = Manager::new(Club::new(config), RecordingSink::new());
    manager.run([
        Event::client_arrived(at("12:00"), "alice"),
        Event::table_requested(at("12:00"), "alice", 1),
        Event::client_left(at("12:00"), "alice"),
    ]);

    let sink = manager.into_sink();
    assert_eq!(sink.times, [at("11:00"), at("20:00")]);
    assert_eq!(sink.lines(), ["12:00 1 alice", "12:00 2 alice 1", "12:00 4 alice"]);
    // A session that ends the minute it starts costs nothing.
    assert_eq!(sink.tables()[0].revenue, 0);
}

#[test]
fn test_manager_reports_through_borrowed_sink() {
    let mut sink = RecordingSink::new();
    Manager::new(club(1), &mut sink).run([
        Event::client_arrived(at("10:00"), "alice"),
        Event::table_requested(at("10:00"), "alice", 1),
    ]);

    assert_eq!(sink.times, [at("09:00"), at("19:00")]);
    assert_eq!(
        sink.lines(),
        ["10:00 1 alice", "10:00 2 alice 1", "19:00 11 alice"]
    );
    assert_eq!(sink.tables()[0].revenue, 90);
}

#[test]
fn test_manager_reports_through_boxed_sink() {
    let mut sink = RecordingSink::new();
    {
        let boxed: Box<dyn ReportSink + '_> = Box::new(&mut sink);
        Manager::new(club(2), boxed).run([Event::client_arrived(at("08:00"), "early")]);
    }

    assert_eq!(sink.lines(), ["08:00 1 early", "08:00 13 NotOpenYet"]);
    assert_eq!(sink.revenue_batches.len(), 1);
    assert_eq!(sink.tables().len(), 2);
}

proptest! {
    #[test]
    fn test_session_billed_by_started_hour(length in properties::session_length()) {
        let start = at("00:00");
        let mut club = Club::new(config_with(1, "00:00", "23:59", 7));
        let reducer = ClubReducer::new();
        for event in [
            Event::client_arrived(start + TimeDelta::minutes(1), "p"),
            Event::table_requested(start + TimeDelta::minutes(1), "p", 1),
            Event::client_left(start + TimeDelta::minutes(1) + length, "p"),
        ] {
            reducer.reduce(&mut club, ClubAction::Handle(event));
        }

        let minutes = u64::try_from(length.num_minutes()).unwrap();
        let table = club.table(1).unwrap();
        // Departures past midnight wrap around and count as empty sessions.
        if minutes <= 23 * 60 + 58 {
            prop_assert_eq!(table.revenue(), minutes.div_ceil(60) * 7);
        }
        prop_assert!(!table.is_busy());
        prop_assert!(club.clients.is_empty());
    }

    #[test]
    fn test_queue_never_exceeds_tables(names in prop::collection::vec(properties::client_name(), 1..20)) {
        let mut club = club(3);
        let reducer = ClubReducer::new();
        for (i, name) in names.iter().enumerate() {
            let table = i % 3 + 1;
            for event in [
                Event::client_arrived(at("10:00"), name.clone()),
                Event::table_requested(at("10:00"), name.clone(), table),
                Event::client_waiting(at("10:00"), name.clone()),
            ] {
                reducer.reduce(&mut club, ClubAction::Handle(event));
            }
            prop_assert!(club.queue.len() <= 3);
            for queued in &club.queue {
                prop_assert_eq!(club.status_of(queued), Some(ClientStatus::Waiting));
            }
        }
    }
}
