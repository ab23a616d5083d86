//! Rendering for the CLI: plain-text tables and JSON.

use anyhow::Result;
use serde::Serialize;

use crate::stations::Station;
use crate::time;
use crate::timetable::TimetableEntry;

/// Prints any serializable result as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_stations(stations: &[&Station]) {
    println!("{:<28} {:<12} {:<10}", "Station", "Direction", "Code");
    for station in stations {
        let direction = match station.direction {
            Some(direction) => direction.to_string(),
            None => "-".to_string(),
        };
        println!(
            "{:<28} {:<12} {:<10}",
            station.display_name, direction, station.code
        );
    }
}

pub fn print_timetable(entries: &[TimetableEntry]) {
    if entries.is_empty() {
        println!("No trains running between these stations.");
        return;
    }

    println!(
        "{:<12} {:<16} {:<16} {:<16} {:<10} {:>5}",
        "Train", "Type", "Departure", "Arrival", "Duration", "Stops"
    );
    for entry in entries {
        let duration = entry
            .duration_minutes()
            .map(format_duration)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<12} {:<16} {:<16} {:<16} {:<10} {:>5}",
            entry.train.id,
            entry.train.route_type,
            time::format_clock(&entry.departure_time),
            time::format_clock(&entry.arrival_time),
            duration,
            entry.num_stops
        );
    }
}

fn format_duration(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}
