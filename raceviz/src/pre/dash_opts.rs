use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(
    version = "0.1.0",
    name = "raceviz",
    about = "Derives chart data from motorsport session and season results"
)]
pub struct DashOpts {
    // FLAGS ---------------------------------------------------------------------------------------
    /// Activate debug printing
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Print the chart data as JSON (for a renderer) instead of result tables
    #[arg(short, long, global = true)]
    pub json: bool,

    // OPTIONS -------------------------------------------------------------------------------------
    /// Set path to the style table (JSON, season -> label -> color and dash style)
    #[arg(short, long, global = true)]
    pub stylefile_path: Option<PathBuf>,

    #[command(subcommand)]
    pub chart: Chart,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Chart {
    /// Position of every driver at the end of each lap
    Positions {
        /// Set path to the session data file (JSON)
        #[arg(short = 'p', long)]
        sessionfile_path: PathBuf,
    },

    /// Lap times of one or more drivers with their fastest laps
    Laptimes {
        /// Set path to the session data file (JSON)
        #[arg(short = 'p', long)]
        sessionfile_path: PathBuf,

        /// Drivers to compare (all drivers of the session if none is given)
        #[arg(short = 'r', long = "driver")]
        drivers: Vec<String>,

        /// Only consider quick laps (no in/out and safety car laps)
        #[arg(short, long)]
        quick_only: bool,
    },

    /// Gap of every driver's qualifying time to the pole time
    Qualifying {
        /// Set path to the session data file (JSON)
        #[arg(short = 'p', long)]
        sessionfile_path: PathBuf,
    },

    /// Lap time distribution and degradation rate per tire compound
    Tyres {
        /// Set path to the session data file (JSON)
        #[arg(short = 'p', long)]
        sessionfile_path: PathBuf,
    },

    /// Cumulative championship points per round
    Standings {
        /// Set path to the season data file (JSON)
        #[arg(short = 'p', long)]
        seasonfile_path: PathBuf,

        /// Attribute team points to the end-of-season team instead of the team of each round
        #[arg(long)]
        end_of_season_teams: bool,
    },

    /// Time delta between two laps along the lap distance
    Compare {
        /// Set path to the telemetry file (CSV) of lap a
        #[arg(short = 'a', long)]
        telemetry_a: PathBuf,

        /// Set path to the telemetry file (CSV) of lap b
        #[arg(short = 'b', long)]
        telemetry_b: PathBuf,

        /// Set path to the telemetry file (CSV) of the reference lap (lap a if not given)
        #[arg(short = 'f', long)]
        reference: Option<PathBuf>,

        /// Set window size of the delta smoothing, must be odd and at least 5
        #[arg(short, long, default_value = "9")]
        window: usize,

        /// Set polynomial order of the delta smoothing, must be less than the window size
        #[arg(short, long, default_value = "2")]
        order: usize,
    },

    /// Track map with the fastest driver per minisector
    Trackmap {
        /// Lap telemetry per driver, e.g. --lap VER=ver_fastest.csv (the first lap is the
        /// reference)
        #[arg(short, long = "lap", value_parser = parse_driver_lap, required = true)]
        laps: Vec<(String, PathBuf)>,

        /// Set circuit rotation in degrees
        #[arg(short, long, default_value = "0.0", allow_hyphen_values = true)]
        rotation: f64,

        /// Set number of minisectors
        #[arg(short, long, default_value = "25")]
        minisectors: usize,

        /// Set season used to look up the driver colors in the style table
        #[arg(long)]
        season: Option<u32>,
    },
}

/// parse_driver_lap splits an argument of the form DRIVER=path.
fn parse_driver_lap(arg: &str) -> Result<(String, PathBuf), String> {
    match arg.split_once('=') {
        Some((driver, path)) if !driver.is_empty() && !path.is_empty() => {
            Ok((driver.to_owned(), PathBuf::from(path)))
        }
        _ => Err(format!("expected DRIVER=path, got {}", arg)),
    }
}
