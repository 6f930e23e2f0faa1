use helpers::general::{argmin, AnalysisError};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Compound {
    Soft,
    Medium,
    Hard,
    Intermediate,
    Wet,
    #[serde(other)]
    Unknown,
}

impl Default for Compound {
    fn default() -> Self {
        Compound::Unknown
    }
}

/// * `driver` - Driver abbreviation, e.g. HAM
/// * `team` - Team the driver raced for in this session
/// * `lap_number` - Lap number (starting at 1)
/// * `lap_time` - (s) Lap time, None if not recorded (e.g. lap not completed)
/// * `compound` - Tire compound fitted during the lap
/// * `position` - Position at the end of the lap, None if not available
/// * `quick_lap` - True if the lap is representative racing pace (no in/out or safety car lap)
/// * `stint` - Stint number
/// * `tyre_life` - (laps) Age of the fitted tires at the end of the lap
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LapRecord {
    pub driver: String,
    #[serde(default)]
    pub team: String,
    pub lap_number: u32,
    pub lap_time: Option<f64>,
    #[serde(default)]
    pub compound: Compound,
    pub position: Option<u32>,
    #[serde(default)]
    pub quick_lap: bool,
    #[serde(default)]
    pub stint: Option<u32>,
    #[serde(default)]
    pub tyre_life: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PositionSeries {
    pub driver: String,
    pub lap_numbers: Vec<u32>,
    pub positions: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FastestLap {
    pub lap_number: u32,
    pub lap_time: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LapTimeSeries {
    pub driver: String,
    pub lap_numbers: Vec<u32>,
    pub lap_times: Vec<f64>,
    pub fastest: FastestLap,
}

/// drivers_in_order returns the distinct drivers in the order of their first appearance.
pub fn drivers_in_order(laps: &[LapRecord]) -> Vec<String> {
    let mut drivers: Vec<String> = Vec::new();

    for lap in laps.iter() {
        if !drivers.iter().any(|d| d == &lap.driver) {
            drivers.push(lap.driver.to_owned());
        }
    }

    drivers
}

/// position_evolution returns the position of each driver at the end of each lap. Laps without a
/// position are skipped, drivers without any position are omitted.
pub fn position_evolution(laps: &[LapRecord]) -> Vec<PositionSeries> {
    let mut series_all = Vec::new();

    for driver in drivers_in_order(laps) {
        let mut tmp_laps: Vec<(u32, u32)> = laps
            .iter()
            .filter(|lap| lap.driver == driver)
            .filter_map(|lap| lap.position.map(|pos| (lap.lap_number, pos)))
            .collect();

        if tmp_laps.is_empty() {
            debug!("No positions available for driver {}", driver);
            continue;
        }

        tmp_laps.sort_by_key(|&(lap_number, _)| lap_number);

        series_all.push(PositionSeries {
            driver,
            lap_numbers: tmp_laps.iter().map(|&(lap_number, _)| lap_number).collect(),
            positions: tmp_laps.iter().map(|&(_, pos)| pos).collect(),
        });
    }

    series_all
}

/// lap_time_series returns the timed laps of a driver sorted by lap number together with the
/// fastest lap (earliest one in case of equal lap times). Only quick laps are considered if
/// quick_only is set.
pub fn lap_time_series(
    laps: &[LapRecord],
    driver: &str,
    quick_only: bool,
) -> Result<LapTimeSeries, AnalysisError> {
    let mut tmp_laps: Vec<(u32, f64)> = laps
        .iter()
        .filter(|lap| lap.driver == driver && (!quick_only || lap.quick_lap))
        .filter_map(|lap| {
            lap.lap_time
                .filter(|t| t.is_finite())
                .map(|t| (lap.lap_number, t))
        })
        .collect();

    if tmp_laps.is_empty() {
        return Err(AnalysisError::MissingData(format!(
            "No timed laps available for driver {}!",
            driver
        )));
    }

    tmp_laps.sort_by_key(|&(lap_number, _)| lap_number);

    let lap_numbers: Vec<u32> = tmp_laps.iter().map(|&(lap_number, _)| lap_number).collect();
    let lap_times: Vec<f64> = tmp_laps.iter().map(|&(_, t)| t).collect();

    // lap_times is not empty at this point
    let idx_fastest = argmin(&lap_times).unwrap_or(0);

    Ok(LapTimeSeries {
        driver: driver.to_owned(),
        fastest: FastestLap {
            lap_number: lap_numbers[idx_fastest],
            lap_time: lap_times[idx_fastest],
        },
        lap_numbers,
        lap_times,
    })
}

/// lap_time_comparison returns the lap time series of several drivers in the given order.
pub fn lap_time_comparison(
    laps: &[LapRecord],
    drivers: &[String],
    quick_only: bool,
) -> Result<Vec<LapTimeSeries>, AnalysisError> {
    drivers
        .iter()
        .map(|driver| lap_time_series(laps, driver, quick_only))
        .collect()
}
