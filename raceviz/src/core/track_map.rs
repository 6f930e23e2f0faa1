use crate::core::telemetry::{check_trace, scale_trace, TelemetrySample};
use helpers::general::{lin_interp, AnalysisError};
use helpers::geometry::{bounding_box, rotate, Point2d};
use log::debug;
use serde::Serialize;

/// TrackMap holds the positional samples of a lap rotated by the circuit rotation, such that the
/// track is drawn in its usual orientation.
#[derive(Debug, Clone, Serialize)]
pub struct TrackMap {
    pub distance: Vec<f64>,
    pub points: Vec<Point2d>,
}

impl TrackMap {
    /// from_samples creates the track map, rotation_deg is the circuit rotation in degrees.
    pub fn from_samples(samples: &[TelemetrySample], rotation_deg: f64) -> TrackMap {
        let points: Vec<Point2d> = samples.iter().map(|s| s.position()).collect();

        TrackMap {
            distance: samples.iter().map(|s| s.distance).collect(),
            points: rotate(&points, rotation_deg.to_radians()),
        }
    }

    /// length returns the length of the polyline through the points.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[1].as_vector2d().sub(&w[0].as_vector2d()).abs())
            .sum()
    }

    /// axes_expansion returns [x_min, x_max, y_min, y_max] of a square area that contains the
    /// whole track plus padding, None for an empty map.
    pub fn axes_expansion(&self, padding_size: f64) -> Option<[f64; 4]> {
        let [mut x_min, mut x_max, mut y_min, mut y_max] = bounding_box(&self.points)?;

        // apply padding
        x_min -= padding_size;
        x_max += padding_size;
        y_min -= padding_size;
        y_max += padding_size;

        // update min and max values such that its a square shape
        let width = x_max - x_min;
        let height = y_max - y_min;

        if width > height {
            let diff = width - height;
            y_min -= diff / 2.0;
            y_max += diff / 2.0;
        } else {
            let diff = height - width;
            x_min -= diff / 2.0;
            x_max += diff / 2.0;
        }

        Some([x_min, x_max, y_min, y_max])
    }
}

/// * `idx` - Index of the minisector (0-based)
/// * `start` - (m) Start of the minisector on the reference distance
/// * `end` - (m) End of the minisector on the reference distance
/// * `driver` - Driver with the shortest time through the minisector
/// * `time` - (s) Time of that driver through the minisector
#[derive(Debug, Clone, Serialize)]
pub struct MiniSector {
    pub idx: usize,
    pub start: f64,
    pub end: f64,
    pub driver: String,
    pub time: f64,
}

/// minisector_overlay splits the lap into n_minisectors minisectors of equal length (on the
/// distance of the first trace) and determines the fastest driver through each of them. All
/// traces are scaled to the lap distance of the first trace. On equal times the driver listed
/// first wins.
pub fn minisector_overlay(
    traces: &[(String, Vec<TelemetrySample>)],
    n_minisectors: usize,
) -> Result<Vec<MiniSector>, AnalysisError> {
    if n_minisectors == 0 {
        return Err(AnalysisError::InvalidInput(
            "Number of minisectors must be at least one!".to_owned(),
        ));
    }

    let (ref_driver, ref_trace) = traces.first().ok_or_else(|| {
        AnalysisError::InvalidInput("At least one trace is required for the overlay!".to_owned())
    })?;

    let ref_max_distance = check_trace(ref_trace, ref_driver)?;
    let sector_length = ref_max_distance / n_minisectors as f64;
    let boundaries: Vec<f64> = (0..=n_minisectors)
        .map(|i| i as f64 * sector_length)
        .collect();

    // elapsed time of every driver at every minisector boundary
    let mut boundary_times: Vec<(&str, Vec<f64>)> = Vec::with_capacity(traces.len());

    for (driver, trace) in traces.iter() {
        let max_distance = check_trace(trace, driver)?;
        let scaled = scale_trace(trace, max_distance, ref_max_distance);

        boundary_times.push((
            driver.as_str(),
            boundaries
                .iter()
                .map(|&d| lin_interp(d, &scaled.distance, &scaled.time))
                .collect(),
        ));
    }

    let mut minisectors = Vec::with_capacity(n_minisectors);

    for idx in 0..n_minisectors {
        let mut fastest: Option<(&str, f64)> = None;

        for (driver, times) in boundary_times.iter() {
            let t_sector = times[idx + 1] - times[idx];

            if fastest.map_or(true, |(_, t_best)| t_sector < t_best) {
                fastest = Some((*driver, t_sector));
            }
        }

        // boundary_times contains at least the reference driver
        if let Some((driver, time)) = fastest {
            minisectors.push(MiniSector {
                idx,
                start: boundaries[idx],
                end: boundaries[idx + 1],
                driver: driver.to_owned(),
                time,
            });
        }
    }

    debug!(
        "Determined the fastest driver in {} minisectors of {:.1}m",
        minisectors.len(),
        sector_length
    );

    Ok(minisectors)
}
