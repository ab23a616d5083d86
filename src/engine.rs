//! The query engine: owns one loaded feed and answers station and
//! timetable lookups over it.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::LoadError;
use crate::fetch::{self, HttpClient};
use crate::gtfs::StopTime;
use crate::parser;
use crate::stations::{self, Direction, Station};
use crate::timetable::{self, TimetableEntry};
use crate::trains::{self, Train};

/// Collections built from one feed, written once at load completion and
/// read-only afterward. Queries over them are pure and never race a writer.
#[derive(Debug)]
struct LoadedFeed {
    stations: Vec<Station>,
    trains: HashMap<String, Train>,
    stop_times: Vec<StopTime>,
}

#[derive(Debug, Default)]
enum LoadState {
    #[default]
    Empty,
    Loaded(LoadedFeed),
}

/// An engine holds at most one feed for its lifetime. Loading is
/// all-or-nothing: a failure at any step leaves the engine empty, and once
/// a load succeeds every further load call is a no-op, even for a
/// different source.
#[derive(Debug, Default)]
pub struct TimetableEngine {
    state: LoadState,
}

impl TimetableEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, LoadState::Loaded(_))
    }

    fn feed(&self) -> Option<&LoadedFeed> {
        match &self.state {
            LoadState::Empty => None,
            LoadState::Loaded(feed) => Some(feed),
        }
    }

    /// Loads a feed from an HTTP(S) URL or a local file path.
    ///
    /// # Errors
    ///
    /// Fails if the source cannot be fetched or read, or if the payload is
    /// not a feed archive with a stops table. The engine stays empty on
    /// failure, so a retry starts clean.
    pub async fn load_feed<C: HttpClient>(
        &mut self,
        client: &C,
        source: &str,
    ) -> Result<(), LoadError> {
        if self.is_loaded() {
            debug!(source, "Feed already loaded, skipping fetch");
            return Ok(());
        }

        let bytes = if source.starts_with("http") {
            fetch::fetch_bytes(client, source).await?
        } else {
            std::fs::read(source)?
        };

        self.load_feed_bytes(&bytes)
    }

    /// Loads a feed from an already-fetched zip payload.
    pub fn load_feed_bytes(&mut self, bytes: &[u8]) -> Result<(), LoadError> {
        if self.is_loaded() {
            debug!("Feed already loaded, ignoring payload");
            return Ok(());
        }

        let tables = parser::parse_feed(bytes)?;

        let stations = stations::build_catalog(&tables.stops);
        let trains: HashMap<String, Train> = trains::assemble(
            tables.trips.as_deref().unwrap_or_default(),
            tables.routes.as_deref().unwrap_or_default(),
            tables.calendar.as_deref().unwrap_or_default(),
        )
        .into_iter()
        .map(|train| (train.id.clone(), train))
        .collect();
        let stop_times = tables.stop_times.unwrap_or_default();

        info!(
            stations = stations.len(),
            trains = trains.len(),
            stop_times = stop_times.len(),
            "Feed loaded"
        );

        self.state = LoadState::Loaded(LoadedFeed {
            stations,
            trains,
            stop_times,
        });
        Ok(())
    }

    /// The full station catalog, ordered northwest-first along the line.
    pub fn stations(&self) -> &[Station] {
        self.feed().map(|f| f.stations.as_slice()).unwrap_or(&[])
    }

    /// Distinct display names across both directions, sorted ascending.
    pub fn station_display_names(&self) -> Vec<String> {
        stations::display_names(self.stations())
    }

    pub fn stations_by_direction(&self, direction: Direction) -> Vec<&Station> {
        stations::by_direction(self.stations(), direction)
    }

    pub fn find_station(&self, display_name: &str, direction: Direction) -> Option<&Station> {
        stations::find(self.stations(), display_name, direction)
    }

    /// All trips serving both stations in order, sorted by departure time.
    pub fn query_timetable(&self, from: &Station, to: &Station) -> Vec<TimetableEntry> {
        match self.feed() {
            Some(feed) => timetable::query_timetable(from, to, &feed.stop_times, &feed.trains),
            None => Vec::new(),
        }
    }
}
