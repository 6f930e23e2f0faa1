use crate::core::championship::RoundResult;
use crate::core::colors::StyleTable;
use crate::core::laps::LapRecord;
use crate::core::qualifying::QualifyingSegments;
use crate::core::telemetry::TelemetrySample;
use anyhow::Context;
use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::Path;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SessionType {
    Fp1,
    Fp2,
    Fp3,
    Sq,
    S,
    Q,
    R,
}

/// SessionData contains the data of one session as exported from the telemetry source.
///
/// * `season` - Season of the event
/// * `event` - Event name, e.g. Bahrain Grand Prix
/// * `session` - Session type
/// * `laps` - All laps of all drivers
/// * `qualifying` - Qualifying segment times (only filled for qualifying sessions)
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionData {
    pub season: u32,
    pub event: String,
    pub session: SessionType,
    #[serde(default)]
    pub laps: Vec<LapRecord>,
    #[serde(default)]
    pub qualifying: Vec<QualifyingSegments>,
}

/// * `round` - Round number
/// * `event` - Event name
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScheduleEntry {
    pub round: u32,
    pub event: String,
}

/// SeasonData contains the schedule and the per-round results of a season.
///
/// * `season` - Season
/// * `schedule` - Events in championship order
/// * `results` - Main race results of every round
/// * `sprint_results` - Secondary event (sprint) results, bonus points are added to the round
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SeasonData {
    pub season: u32,
    pub schedule: Vec<ScheduleEntry>,
    #[serde(default)]
    pub results: Vec<RoundResult>,
    #[serde(default)]
    pub sprint_results: Vec<RoundResult>,
}

impl SeasonData {
    /// round_order returns the rounds in schedule order.
    pub fn round_order(&self) -> Vec<u32> {
        self.schedule.iter().map(|entry| entry.round).collect()
    }

    pub fn event_name(&self, round: u32) -> Option<&str> {
        self.schedule
            .iter()
            .find(|entry| entry.round == round)
            .map(|entry| entry.event.as_str())
    }
}

/// read_json opens the file and decodes its JSON content.
fn read_json<T: DeserializeOwned>(filepath: &Path, what: &str) -> anyhow::Result<T> {
    // open file
    let fh = OpenOptions::new()
        .read(true)
        .open(filepath)
        .context(format!(
            "Failed to open {} file {}!",
            what,
            filepath.display()
        ))?;

    // read and parse file content
    let data = serde_json::from_reader(&fh).context(format!(
        "Failed to parse {} file {}!",
        what,
        filepath.display()
    ))?;
    Ok(data)
}

pub fn read_session_data(filepath: &Path) -> anyhow::Result<SessionData> {
    let session_data: SessionData = read_json(filepath, "session")?;

    info!(
        "Loaded {} {} {:?} with {} laps",
        session_data.season,
        session_data.event,
        session_data.session,
        session_data.laps.len()
    );

    Ok(session_data)
}

pub fn read_season_data(filepath: &Path) -> anyhow::Result<SeasonData> {
    let season_data: SeasonData = read_json(filepath, "season")?;

    info!(
        "Loaded season {} with {} rounds",
        season_data.season,
        season_data.schedule.len()
    );

    Ok(season_data)
}

pub fn read_style_table(filepath: &Path) -> anyhow::Result<StyleTable> {
    read_json(filepath, "style")
}

/// read_telemetry_csv reads the telemetry samples of one lap (columns distance, time, x, y).
pub fn read_telemetry_csv(filepath: &Path) -> anyhow::Result<Vec<TelemetrySample>> {
    // open file
    let fh = OpenOptions::new()
        .read(true)
        .open(filepath)
        .context(format!(
            "Failed to open telemetry file {}!",
            filepath.display()
        ))?;

    // read and parse csv telemetry data
    let mut csv_reader = csv::Reader::from_reader(&fh);
    let mut samples: Vec<TelemetrySample> = vec![];

    for result in csv_reader.deserialize() {
        let sample: TelemetrySample = result.context(format!(
            "Failed to parse telemetry file {}!",
            filepath.display()
        ))?;
        samples.push(sample);
    }

    info!(
        "Loaded {} telemetry samples from {}",
        samples.len(),
        filepath.display()
    );

    Ok(samples)
}
