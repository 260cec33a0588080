//! End-to-end tests: schedule file in, report out

#![allow(clippy::unwrap_used)] // Tests can unwrap
#![allow(clippy::expect_used)] // Tests can expect

use computer_club::input::{self, ParseError, Problem};
use computer_club::output::{JsonLinesSink, TextSink};
use computer_club::simulate;
use computer_club_core::{Event, EventKind, TimeDelta};
use computer_club_testing::{RecordingSink, at};
use serde_json::Value;
use std::io::Write;

const SCHEDULE: &str = include_str!("fixtures/schedule.txt");
const REPORT: &str = include_str!("fixtures/report.txt");
const OVERFLOW: &str = include_str!("fixtures/queue_overflow.txt");
const OVERFLOW_REPORT: &str = include_str!("fixtures/queue_overflow_report.txt");

fn text_report(schedule: &str) -> String {
    let schedule = input::parse(schedule.as_bytes()).unwrap();
    let bytes = simulate(schedule, TextSink::new(Vec::new())).finish().unwrap();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn reference_schedule_parses() {
    let schedule = input::parse(SCHEDULE.as_bytes()).unwrap();

    assert_eq!(schedule.config.tables(), 3);
    assert_eq!(schedule.config.open(), at("09:00"));
    assert_eq!(schedule.config.close(), at("19:00"));
    assert_eq!(schedule.config.hourly_rate(), 10);
    assert_eq!(schedule.events.len(), 14);
    assert_eq!(schedule.events[0], Event::client_arrived(at("08:48"), "client1"));
    assert_eq!(
        schedule.events[4],
        Event::table_requested(at("09:54"), "client1", 1)
    );
}

#[test]
fn reference_schedule_text_report() {
    assert_eq!(text_report(SCHEDULE), REPORT);
}

#[test]
fn queue_overflow_text_report() {
    assert_eq!(text_report(OVERFLOW), OVERFLOW_REPORT);
}

#[test]
fn reference_schedule_settlement() {
    let schedule = input::parse(SCHEDULE.as_bytes()).unwrap();
    let sink = simulate(schedule, RecordingSink::new());

    assert_eq!(sink.times, [at("09:00"), at("19:00")]);
    assert_eq!(sink.event_batches.len(), 1);

    let tables = sink.tables();
    assert_eq!(
        tables.iter().map(|t| t.revenue).collect::<Vec<_>>(),
        [70, 30, 90]
    );
    assert_eq!(tables[0].busy, TimeDelta::minutes(5 * 60 + 58));
    assert_eq!(tables[1].busy, TimeDelta::minutes(2 * 60 + 18));
    assert_eq!(tables[2].busy, TimeDelta::minutes(8 * 60 + 1));

    let forced: Vec<_> = sink
        .events()
        .into_iter()
        .filter(|e| matches!(e.kind, EventKind::ClientForcedOut { .. }))
        .collect();
    assert_eq!(forced, [Event::client_forced_out(at("19:00"), "client3")]);
}

#[test]
fn reference_schedule_json_report() {
    let schedule = input::parse(SCHEDULE.as_bytes()).unwrap();
    let bytes = simulate(schedule, JsonLinesSink::new(Vec::new()))
        .finish()
        .unwrap();
    let records: Vec<Value> = String::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    // Same record count as the text report, line for line.
    assert_eq!(records.len(), REPORT.lines().count());

    assert_eq!(records[0]["type"], "time");
    assert_eq!(records[0]["time"], "09:00:00");

    assert_eq!(records[2]["type"], "event");
    assert_eq!(records[2]["id"], 13);
    assert_eq!(records[2]["error"], "NotOpenYet");

    let tables: Vec<&Value> = records.iter().filter(|r| r["type"] == "table").collect();
    assert_eq!(tables.len(), 3);
    assert_eq!(tables[0]["number"], 1);
    assert_eq!(tables[0]["revenue"], 70);
    assert_eq!(tables[0]["busy"], 358);
    assert_eq!(tables[2]["revenue"], 90);
}

#[test]
fn schedule_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SCHEDULE.as_bytes()).unwrap();

    let schedule = input::load(file.path()).unwrap();
    assert_eq!(schedule.events.len(), 14);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = input::load(dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, ParseError::Io(_)));
}

#[test]
fn malformed_event_line_is_fatal() {
    let broken = SCHEDULE.replace("10:25 2 client2 2", "10:25 2 client2");
    let err = input::parse(broken.as_bytes()).unwrap_err();

    assert_eq!(err.line(), Some(9));
    assert_eq!(err.problem(), Some(&Problem::MissingTable));
}

#[test]
fn table_outside_club_is_fatal() {
    let broken = SCHEDULE.replace("10:59 2 client3 3", "10:59 2 client3 4");
    let err = input::parse(broken.as_bytes()).unwrap_err();

    assert_eq!(err.line(), Some(11));
    assert_eq!(err.problem(), Some(&Problem::TableNumber { tables: 3 }));
    assert!(err.to_string().contains("10:59 2 client3 4"));
}

#[test]
fn bad_time_is_fatal() {
    let broken = SCHEDULE.replace("15:52 4 client4", "15.52 4 client4");
    let err = input::parse(broken.as_bytes()).unwrap_err();

    assert_eq!(err.line(), Some(17));
    assert_eq!(err.problem(), Some(&Problem::Time));
}

#[test]
fn unknown_event_json_has_one_id() {
    let schedule = input::parse("1\n09:00 19:00\n10\n10:00 7 bob\n".as_bytes()).unwrap();
    let bytes = simulate(schedule, JsonLinesSink::new(Vec::new()))
        .finish()
        .unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let event = text.lines().nth(1).unwrap();

    assert_eq!(event.matches("\"id\"").count(), 1);
    let record: Value = serde_json::from_str(event).unwrap();
    assert_eq!(record["id"], 7);
    assert_eq!(record["kind"], "unrecognized");
    assert_eq!(record["client"], "bob");
}
