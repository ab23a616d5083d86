//! Raw record types for the five GTFS tables this engine reads.
//!
//! These mirror the feed's columns one to one and stay as close to the wire
//! as possible: coordinates remain strings until the station catalog parses
//! them, times keep the `HH:MM[:SS]` rollover convention, and calendar day
//! flags keep their literal `"1"`/`"0"` text.

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Stop {
    pub stop_id: String,
    pub stop_name: String,
    #[serde(default)]
    pub stop_code: String,
    #[serde(default)]
    pub stop_lat: String,
    #[serde(default)]
    pub stop_lon: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Route {
    pub route_id: String,
    #[serde(default)]
    pub route_short_name: String,
    #[serde(default)]
    pub route_long_name: String,
    #[serde(default)]
    pub route_type: String,
    pub route_desc: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Trip {
    pub trip_id: String,
    pub route_id: String,
    pub service_id: String,
    pub trip_headsign: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StopTime {
    pub trip_id: String,
    pub arrival_time: String,
    pub departure_time: String,
    pub stop_id: String,
    pub stop_sequence: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Calendar {
    pub service_id: String,
    #[serde(default)]
    pub monday: String,
    #[serde(default)]
    pub tuesday: String,
    #[serde(default)]
    pub wednesday: String,
    #[serde(default)]
    pub thursday: String,
    #[serde(default)]
    pub friday: String,
    #[serde(default)]
    pub saturday: String,
    #[serde(default)]
    pub sunday: String,
}
