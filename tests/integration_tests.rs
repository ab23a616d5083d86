use std::env;
use std::io::{Cursor, Write};

use chrono::NaiveDate;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use caltrain_timetable::engine::TimetableEngine;
use caltrain_timetable::fetch::BasicClient;
use caltrain_timetable::stations::Direction;

fn zip_feed(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, text) in entries {
        writer
            .start_file(name.to_string(), SimpleFileOptions::default())
            .unwrap();
        writer.write_all(text.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn sample_feed() -> Vec<u8> {
    zip_feed(&[
        (
            "routes.txt",
            "route_id,route_short_name,route_long_name,route_type\nR1,L1,Local,2\n",
        ),
        (
            "stops.txt",
            "stop_id,stop_name,stop_code,stop_lat,stop_lon\n\
             S1,Foo Northbound,FOO-N,37.70,-122.40\n\
             S2,Bar Northbound,BAR-N,37.60,-122.30\n\
             S3,Foo Southbound,FOO-S,37.70,-122.40\n\
             S4,Bar Southbound,BAR-S,37.60,-122.30\n",
        ),
        (
            "stop_times.txt",
            "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
             T1,08:00:00,08:00:00,S1,1\n\
             T1,08:20:00,08:20:00,S2,2\n",
        ),
        (
            "calendar.txt",
            "service_id,monday,tuesday,wednesday,thursday,friday,saturday,sunday\n\
             WK,1,1,1,1,1,0,0\n",
        ),
        (
            "trips.txt",
            "trip_id,route_id,service_id,trip_headsign\nT1,R1,WK,Bar\n",
        ),
    ])
}

#[test]
fn test_full_pipeline() {
    let mut engine = TimetableEngine::new();
    engine.load_feed_bytes(&sample_feed()).unwrap();

    let from = engine.find_station("Foo", Direction::Northbound).unwrap();
    let to = engine.find_station("Bar", Direction::Northbound).unwrap();
    let entries = engine.query_timetable(from, to);

    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.train.route_type, "Local");
    assert_eq!(entry.departure_time, "08:00:00");
    assert_eq!(entry.arrival_time, "08:20:00");
    assert_eq!(entry.num_stops, 1);
    assert_eq!(entry.duration_minutes(), Some(20));

    // Weekday-only service: runs on a Wednesday, not on the weekend.
    let wednesday = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
    let saturday = NaiveDate::from_ymd_opt(2026, 8, 8).unwrap();
    assert!(entry.train.runs_on(wednesday));
    assert!(!entry.train.runs_on(saturday));
}

#[test]
fn test_cross_direction_queries_are_empty() {
    let mut engine = TimetableEngine::new();
    engine.load_feed_bytes(&sample_feed()).unwrap();

    let north = engine.find_station("Foo", Direction::Northbound).unwrap();
    let south = engine.find_station("Bar", Direction::Southbound).unwrap();

    assert!(engine.query_timetable(north, south).is_empty());
    assert!(engine.query_timetable(south, north).is_empty());
}

#[test]
fn test_direction_toggle_reresolves_by_display_name() {
    let mut engine = TimetableEngine::new();
    engine.load_feed_bytes(&sample_feed()).unwrap();

    let north = engine.find_station("Foo", Direction::Northbound).unwrap();
    let south = engine
        .find_station(&north.display_name, Direction::Southbound)
        .unwrap();

    assert_eq!(north.id, "S1");
    assert_eq!(south.id, "S3");
    assert_eq!(north.display_name, south.display_name);
}

#[tokio::test]
async fn test_load_from_file_path_and_idempotent_reload() {
    let path = format!(
        "{}/caltrain_timetable_test_feed.zip",
        env::temp_dir().display()
    );
    std::fs::write(&path, sample_feed()).unwrap();

    let mut engine = TimetableEngine::new();
    let client = BasicClient::new();
    engine.load_feed(&client, &path).await.unwrap();
    assert_eq!(engine.station_display_names(), vec!["Bar", "Foo"]);

    // A second load, even pointing somewhere unreachable, is a no-op.
    engine
        .load_feed(&client, "/nonexistent/other-feed.zip")
        .await
        .unwrap();
    assert_eq!(engine.station_display_names(), vec!["Bar", "Foo"]);

    std::fs::remove_file(&path).unwrap();
}
