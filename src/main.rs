//! CLI entry point: loads a Caltrain GTFS feed and answers station and
//! timetable queries from the terminal.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use caltrain_timetable::engine::TimetableEngine;
use caltrain_timetable::fetch::BasicClient;
use caltrain_timetable::output;
use caltrain_timetable::stations::Direction;

const DEFAULT_FEED_URL: &str =
    "https://data.trilliumtransit.com/gtfs/caltrain-ca-us/caltrain-ca-us.zip";

#[derive(Parser)]
#[command(name = "caltrain_timetable")]
#[command(about = "Query point-to-point timetables from a static GTFS feed", long_about = None)]
struct Cli {
    /// Feed URL or local zip path; falls back to $GTFS_FEED_URL, then the
    /// published Caltrain feed
    #[arg(short, long)]
    feed: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the stations in the feed
    Stations {
        /// Only list stations serving this direction
        #[arg(short, long)]
        direction: Option<DirectionArg>,
    },
    /// Show the timetable between two stations
    Timetable {
        /// Display name of the origin station, e.g. "Palo Alto"
        from: String,

        /// Display name of the destination station
        to: String,

        #[arg(short, long, default_value = "northbound")]
        direction: DirectionArg,

        /// Only show trains running on this date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Emit JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Northbound,
    Southbound,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Northbound => Direction::Northbound,
            DirectionArg::Southbound => Direction::Southbound,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    tracing_subscriber::registry().with(stderr_layer).init();

    let cli = Cli::parse();

    let feed = cli
        .feed
        .or_else(|| std::env::var("GTFS_FEED_URL").ok())
        .unwrap_or_else(|| DEFAULT_FEED_URL.to_string());

    let mut engine = TimetableEngine::new();
    let client = BasicClient::new();
    engine
        .load_feed(&client, &feed)
        .await
        .with_context(|| format!("failed to load feed from {feed:?}"))?;

    match cli.command {
        Commands::Stations { direction } => match direction {
            Some(direction) => {
                output::print_stations(&engine.stations_by_direction(direction.into()));
            }
            None => {
                let all: Vec<_> = engine.stations().iter().collect();
                output::print_stations(&all);
            }
        },
        Commands::Timetable {
            from,
            to,
            direction,
            date,
            json,
        } => {
            let direction = Direction::from(direction);
            let from_station = engine
                .find_station(&from, direction)
                .with_context(|| format!("no {direction} station named {from:?}"))?;
            let to_station = engine
                .find_station(&to, direction)
                .with_context(|| format!("no {direction} station named {to:?}"))?;

            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let entries: Vec<_> = engine
                .query_timetable(from_station, to_station)
                .into_iter()
                .filter(|entry| entry.train.runs_on(date))
                .collect();

            if json {
                output::print_json(&entries)?;
            } else {
                println!(
                    "Schedule: {} -> {} ({direction}, {date})",
                    from_station.display_name, to_station.display_name
                );
                output::print_timetable(&entries);
            }
        }
    }

    Ok(())
}
