//! Directional point-to-point timetable queries.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::gtfs::StopTime;
use crate::stations::Station;
use crate::time;
use crate::trains::Train;

/// One scheduled connection between the queried station pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimetableEntry {
    pub train: Train,
    pub from_station: Station,
    pub to_station: Station,
    pub departure_time: String,
    pub arrival_time: String,
    /// Stops strictly after the origin, up to and including the destination.
    pub num_stops: usize,
}

impl TimetableEntry {
    pub fn duration_minutes(&self) -> Option<u32> {
        time::duration_minutes(&self.departure_time, &self.arrival_time)
    }
}

/// Finds every trip serving both stations in order, stamped with the
/// pair-specific departure and arrival.
///
/// Stations on opposite directions never share a physical traversal, so a
/// cross-direction pair yields no results. Results are sorted ascending by
/// the raw departure string; hours above 23 keep next-day trips after
/// same-day ones, and the sort is stable so ties keep encounter order.
pub fn query_timetable(
    from: &Station,
    to: &Station,
    stop_times: &[StopTime],
    trains: &HashMap<String, Train>,
) -> Vec<TimetableEntry> {
    if from.direction != to.direction {
        return Vec::new();
    }

    let relevant: Vec<&StopTime> = stop_times
        .iter()
        .filter(|st| st.stop_id == from.id || st.stop_id == to.id)
        .collect();

    let mut entries = Vec::new();
    let mut processed: HashSet<&str> = HashSet::new();

    for origin in relevant.iter().copied() {
        if origin.stop_id != from.id || processed.contains(origin.trip_id.as_str()) {
            continue;
        }

        // The destination row must come later along the trip's path. A trip
        // that visits the destination before the origin (loop and
        // out-and-back patterns) must not match.
        let destination = relevant.iter().copied().find(|st| {
            st.trip_id == origin.trip_id
                && st.stop_id == to.id
                && st.stop_sequence > origin.stop_sequence
        });

        let Some(destination) = destination else {
            continue;
        };
        let Some(train) = trains.get(origin.trip_id.as_str()) else {
            continue;
        };

        let mut train = train.clone();
        train.departure_time = origin.departure_time.clone();
        train.arrival_time = destination.arrival_time.clone();

        entries.push(TimetableEntry {
            train,
            from_station: from.clone(),
            to_station: to.clone(),
            departure_time: origin.departure_time.clone(),
            arrival_time: destination.arrival_time.clone(),
            num_stops: stops_between(stop_times, &origin.trip_id, &from.id, &to.id),
        });
        processed.insert(origin.trip_id.as_str());
    }

    entries.sort_by(|a, b| a.departure_time.cmp(&b.departure_time));

    debug!(
        from = %from.display_name,
        to = %to.display_name,
        entries = entries.len(),
        "Timetable query complete"
    );
    entries
}

/// Counts the stops a trip makes after the origin, through the destination.
/// Returns 0 if either endpoint is not on the trip.
pub fn stops_between(stop_times: &[StopTime], trip_id: &str, from_id: &str, to_id: &str) -> usize {
    let mut rows: Vec<&StopTime> = stop_times
        .iter()
        .filter(|st| st.trip_id == trip_id)
        .collect();
    rows.sort_by_key(|st| st.stop_sequence);

    let origin = rows.iter().find(|st| st.stop_id == from_id);
    let destination = rows.iter().find(|st| st.stop_id == to_id);
    let (Some(origin), Some(destination)) = (origin, destination) else {
        return 0;
    };

    rows.iter()
        .filter(|st| {
            st.stop_sequence > origin.stop_sequence && st.stop_sequence <= destination.stop_sequence
        })
        .count()
}
