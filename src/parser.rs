//! Extracts and decodes the GTFS tables from a zipped feed payload.

use std::io::{Cursor, Read};

use tracing::{debug, info};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::decode::decode_table;
use crate::error::LoadError;
use crate::gtfs;

/// The decoded tables of one feed. `None` means the table was absent from
/// the archive, as opposed to present but empty.
#[derive(Debug)]
pub struct FeedTables {
    pub stops: Vec<gtfs::Stop>,
    pub routes: Option<Vec<gtfs::Route>>,
    pub trips: Option<Vec<gtfs::Trip>>,
    pub stop_times: Option<Vec<gtfs::StopTime>>,
    pub calendar: Option<Vec<gtfs::Calendar>>,
}

/// Decodes a zipped GTFS feed from raw bytes.
///
/// Tables are read in dependency order. Every table except `stops.txt` is
/// optional; a feed without stops has nothing to build a station catalog
/// from and fails the load.
///
/// # Errors
///
/// Returns an error if the bytes are not a readable zip archive, if an
/// entry cannot be read, or if `stops.txt` is missing.
pub fn parse_feed(bytes: &[u8]) -> Result<FeedTables, LoadError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let routes = read_entry(&mut archive, "routes.txt")?
        .map(|text| decode_table::<gtfs::Route>("routes.txt", &text));

    let stops = read_entry(&mut archive, "stops.txt")?
        .map(|text| decode_table::<gtfs::Stop>("stops.txt", &text))
        .ok_or(LoadError::MissingTable("stops.txt"))?;

    let stop_times = read_entry(&mut archive, "stop_times.txt")?
        .map(|text| decode_table::<gtfs::StopTime>("stop_times.txt", &text));

    let calendar = read_entry(&mut archive, "calendar.txt")?
        .map(|text| decode_table::<gtfs::Calendar>("calendar.txt", &text));

    let trips = read_entry(&mut archive, "trips.txt")?
        .map(|text| decode_table::<gtfs::Trip>("trips.txt", &text));

    info!(
        stops = stops.len(),
        routes = routes.as_ref().map(Vec::len),
        trips = trips.as_ref().map(Vec::len),
        stop_times = stop_times.as_ref().map(Vec::len),
        calendar = calendar.as_ref().map(Vec::len),
        "Feed tables decoded"
    );

    Ok(FeedTables {
        stops,
        routes,
        trips,
        stop_times,
        calendar,
    })
}

/// Reads a named archive entry to text, or `None` if the entry is absent.
fn read_entry<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>, LoadError> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => {
            debug!(table = name, "Table absent from feed archive");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let mut text = String::new();
    file.read_to_string(&mut text)?;
    Ok(Some(text))
}
