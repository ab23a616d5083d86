//! Station catalog derived from raw stop records.
//!
//! Caltrain encodes travel direction in the stop name rather than a feed
//! field ("Palo Alto Caltrain Northbound"), so the catalog infers a
//! direction from that suffix and keeps a stripped display name for
//! pick-lists. Stops whose name carries no direction keyword stay in the
//! catalog as direction-neutral; they simply never match direction-scoped
//! lookups.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::gtfs;

const DIRECTION_KEYWORDS: [(&str, Direction); 2] = [
    ("Northbound", Direction::Northbound),
    ("Southbound", Direction::Southbound),
];

const AGENCY_SUFFIX: &str = " Caltrain";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Northbound,
    Southbound,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Northbound => Direction::Southbound,
            Direction::Southbound => Direction::Northbound,
        }
    }

    /// Scans a stop name for a direction keyword; first match wins.
    fn from_stop_name(name: &str) -> Option<Self> {
        DIRECTION_KEYWORDS
            .iter()
            .find(|(keyword, _)| name.contains(keyword))
            .map(|&(_, direction)| direction)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Northbound => write!(f, "Northbound"),
            Direction::Southbound => write!(f, "Southbound"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub direction: Option<Direction>,
    pub display_name: String,
    pub code: String,
    pub location: Location,
}

impl Station {
    fn from_stop(stop: &gtfs::Stop) -> Self {
        let code = if stop.stop_code.is_empty() {
            stop.stop_id.clone()
        } else {
            stop.stop_code.clone()
        };

        Station {
            id: stop.stop_id.clone(),
            name: stop.stop_name.clone(),
            direction: Direction::from_stop_name(&stop.stop_name),
            display_name: display_name(&stop.stop_name),
            code,
            location: Location {
                lat: parse_coordinate(&stop.stop_lat),
                lon: parse_coordinate(&stop.stop_lon),
            },
        }
    }
}

/// Strips the direction keywords and the agency suffix from a stop name.
fn display_name(name: &str) -> String {
    let mut stripped = name.to_string();
    for (keyword, _) in DIRECTION_KEYWORDS {
        stripped = stripped.replace(&format!(" {keyword}"), "");
    }
    stripped.replace(AGENCY_SUFFIX, "").trim().to_string()
}

/// Unparseable coordinates become NaN so a bad row degrades the ordering
/// of one station instead of rejecting it.
fn parse_coordinate(s: &str) -> f64 {
    s.parse().unwrap_or(f64::NAN)
}

/// Builds the catalog, ordered northwest-first along the line (higher
/// latitude and lower longitude sort earlier). NaN locations sort last.
pub fn build_catalog(stops: &[gtfs::Stop]) -> Vec<Station> {
    let mut stations: Vec<Station> = stops.iter().map(Station::from_stop).collect();

    stations.sort_by(|a, b| {
        let score_a = a.location.lat - a.location.lon;
        let score_b = b.location.lat - b.location.lon;
        match (score_a.is_nan(), score_b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => score_b.partial_cmp(&score_a).unwrap_or(Ordering::Equal),
        }
    });

    stations
}

/// The distinct display names across both directions, sorted ascending.
pub fn display_names(stations: &[Station]) -> Vec<String> {
    let names: BTreeSet<&str> = stations.iter().map(|s| s.display_name.as_str()).collect();
    names.into_iter().map(String::from).collect()
}

/// Stations serving the given direction. Direction-neutral stations never
/// appear here.
pub fn by_direction(stations: &[Station], direction: Direction) -> Vec<&Station> {
    stations
        .iter()
        .filter(|s| s.direction == Some(direction))
        .collect()
}

/// Resolves a display name to the station serving it in one direction.
/// This is what a direction toggle uses to re-resolve a selection to its
/// same-name counterpart on the opposite platform.
pub fn find<'a>(
    stations: &'a [Station],
    display_name: &str,
    direction: Direction,
) -> Option<&'a Station> {
    stations
        .iter()
        .find(|s| s.display_name == display_name && s.direction == Some(direction))
}
