//! Trip assembly: joins trips to their route classification and calendar
//! service pattern.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use tracing::debug;

use crate::gtfs;

/// The seven calendar day flags collapsed to the three service patterns the
/// schedule actually distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ServiceDays {
    pub weekday: bool,
    pub saturday: bool,
    pub sunday: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Train {
    pub id: String,
    pub route_id: String,
    pub route_type: String,
    pub headsign: String,
    pub service: ServiceDays,
    /// Empty until a timetable query stamps the pair-specific time.
    pub departure_time: String,
    pub arrival_time: String,
}

impl Train {
    /// Whether this train runs on the given calendar date. Pure day-of-week
    /// logic; calendar exceptions and holidays are not consulted.
    pub fn runs_on(&self, date: NaiveDate) -> bool {
        match date.weekday() {
            Weekday::Sat => self.service.saturday,
            Weekday::Sun => self.service.sunday,
            _ => self.service.weekday,
        }
    }
}

fn flag(value: &str) -> bool {
    value == "1"
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Joins each trip to its calendar entry (first match on service id; no
/// entry leaves all day flags false) and its route (missing route yields
/// the "Unknown" classification).
pub fn assemble(
    trips: &[gtfs::Trip],
    routes: &[gtfs::Route],
    calendar: &[gtfs::Calendar],
) -> Vec<Train> {
    let routes_by_id: HashMap<&str, &gtfs::Route> =
        routes.iter().map(|r| (r.route_id.as_str(), r)).collect();

    let trains: Vec<Train> = trips
        .iter()
        .map(|trip| {
            let service = calendar
                .iter()
                .find(|c| c.service_id == trip.service_id)
                .map(|c| ServiceDays {
                    weekday: flag(&c.monday)
                        || flag(&c.tuesday)
                        || flag(&c.wednesday)
                        || flag(&c.thursday)
                        || flag(&c.friday),
                    saturday: flag(&c.saturday),
                    sunday: flag(&c.sunday),
                })
                .unwrap_or_default();

            let route_type = routes_by_id
                .get(trip.route_id.as_str())
                .and_then(|route| {
                    non_empty(&route.route_long_name).or_else(|| non_empty(&route.route_short_name))
                })
                .unwrap_or_else(|| "Unknown".to_string());

            Train {
                id: trip.trip_id.clone(),
                route_id: trip.route_id.clone(),
                route_type,
                headsign: trip.trip_headsign.clone().unwrap_or_default(),
                service,
                departure_time: String::new(),
                arrival_time: String::new(),
            }
        })
        .collect();

    debug!(trains = trains.len(), "Assembled trains");
    trains
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(id: &str, route_id: &str, service_id: &str, headsign: Option<&str>) -> gtfs::Trip {
        gtfs::Trip {
            trip_id: id.to_string(),
            route_id: route_id.to_string(),
            service_id: service_id.to_string(),
            trip_headsign: headsign.map(String::from),
        }
    }

    fn route(id: &str, short: &str, long: &str) -> gtfs::Route {
        gtfs::Route {
            route_id: id.to_string(),
            route_short_name: short.to_string(),
            route_long_name: long.to_string(),
            route_type: "2".to_string(),
            route_desc: None,
        }
    }

    fn weekday_calendar(service_id: &str) -> gtfs::Calendar {
        gtfs::Calendar {
            service_id: service_id.to_string(),
            monday: "1".to_string(),
            tuesday: "1".to_string(),
            wednesday: "1".to_string(),
            thursday: "1".to_string(),
            friday: "1".to_string(),
            saturday: "0".to_string(),
            sunday: "0".to_string(),
        }
    }

    #[test]
    fn test_service_days_collapse() {
        let mut saturday_only = weekday_calendar("SAT");
        saturday_only.monday = "0".to_string();
        saturday_only.tuesday = "0".to_string();
        saturday_only.wednesday = "0".to_string();
        saturday_only.thursday = "0".to_string();
        saturday_only.friday = "0".to_string();
        saturday_only.saturday = "1".to_string();

        let trains = assemble(
            &[trip("T1", "R1", "WK", None), trip("T2", "R1", "SAT", None)],
            &[route("R1", "", "Local")],
            &[weekday_calendar("WK"), saturday_only],
        );

        assert_eq!(
            trains[0].service,
            ServiceDays {
                weekday: true,
                saturday: false,
                sunday: false
            }
        );
        assert_eq!(
            trains[1].service,
            ServiceDays {
                weekday: false,
                saturday: true,
                sunday: false
            }
        );
    }

    #[test]
    fn test_single_weekday_flag_counts_as_weekday() {
        let mut friday_only = weekday_calendar("FRI");
        friday_only.monday = "0".to_string();
        friday_only.tuesday = "0".to_string();
        friday_only.wednesday = "0".to_string();
        friday_only.thursday = "0".to_string();

        let trains = assemble(
            &[trip("T1", "R1", "FRI", None)],
            &[route("R1", "", "Local")],
            &[friday_only],
        );

        assert!(trains[0].service.weekday);
    }

    #[test]
    fn test_missing_calendar_entry_clears_all_flags() {
        let trains = assemble(
            &[trip("T1", "R1", "GHOST", None)],
            &[route("R1", "", "Local")],
            &[weekday_calendar("WK")],
        );

        assert_eq!(trains[0].service, ServiceDays::default());
    }

    #[test]
    fn test_route_type_prefers_long_name() {
        let trains = assemble(
            &[trip("T1", "R1", "WK", None)],
            &[route("R1", "L1", "Baby Bullet")],
            &[weekday_calendar("WK")],
        );
        assert_eq!(trains[0].route_type, "Baby Bullet");
    }

    #[test]
    fn test_route_type_falls_back_to_short_name() {
        let trains = assemble(
            &[trip("T1", "R1", "WK", None)],
            &[route("R1", "L1", "")],
            &[weekday_calendar("WK")],
        );
        assert_eq!(trains[0].route_type, "L1");
    }

    #[test]
    fn test_missing_route_is_unknown() {
        let trains = assemble(&[trip("T1", "GHOST", "WK", None)], &[], &[weekday_calendar("WK")]);
        assert_eq!(trains[0].route_type, "Unknown");
    }

    #[test]
    fn test_headsign_defaults_to_empty() {
        let trains = assemble(
            &[
                trip("T1", "R1", "WK", Some("San Francisco")),
                trip("T2", "R1", "WK", None),
            ],
            &[route("R1", "", "Local")],
            &[weekday_calendar("WK")],
        );

        assert_eq!(trains[0].headsign, "San Francisco");
        assert_eq!(trains[1].headsign, "");
    }

    #[test]
    fn test_runs_on_day_of_week() {
        let trains = assemble(
            &[trip("T1", "R1", "WK", None)],
            &[route("R1", "", "Local")],
            &[weekday_calendar("WK")],
        );
        let train = &trains[0];

        // 2026-08-04 is a Tuesday, 2026-08-08 a Saturday, 2026-08-09 a Sunday.
        assert!(train.runs_on(NaiveDate::from_ymd_opt(2026, 8, 4).unwrap()));
        assert!(!train.runs_on(NaiveDate::from_ymd_opt(2026, 8, 8).unwrap()));
        assert!(!train.runs_on(NaiveDate::from_ymd_opt(2026, 8, 9).unwrap()));
    }
}
