use crate::core::smoothing::savgol;
use helpers::general::{is_non_decreasing, lin_interp, AnalysisError};
use helpers::geometry::Point2d;
use log::debug;
use serde::{Deserialize, Serialize};

/// * `distance` - (m) Distance driven since the start of the lap
/// * `time` - (s) Time elapsed since the start of the lap
/// * `x` - (m) Position x coordinate
/// * `y` - (m) Position y coordinate
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct TelemetrySample {
    pub distance: f64,
    pub time: f64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl TelemetrySample {
    pub fn position(&self) -> Point2d {
        Point2d {
            x: self.x,
            y: self.y,
        }
    }
}

/// AlignedTrace contains two lap traces interpolated onto a common distance grid. It only lives
/// for the duration of a comparison and is never written back to the traces.
///
/// * `distance` - (m) Reference distance grid
/// * `time_a` - (s) Interpolated elapsed time of trace a
/// * `time_b` - (s) Interpolated elapsed time of trace b
/// * `delta` - (s) time_a - time_b, positive where trace a is behind
#[derive(Debug, Clone, Serialize)]
pub struct AlignedTrace {
    pub distance: Vec<f64>,
    pub time_a: Vec<f64>,
    pub time_b: Vec<f64>,
    pub delta: Vec<f64>,
}

impl AlignedTrace {
    /// smoothed_delta returns a Savitzky-Golay smoothed copy of the delta series for plotting.
    pub fn smoothed_delta(&self, window: usize, order: usize) -> Result<Vec<f64>, AnalysisError> {
        savgol(&self.delta, window, order)
    }

    /// final_delta returns the delta at the end of the reference grid.
    pub fn final_delta(&self) -> Option<f64> {
        self.delta.last().copied()
    }
}

/// Distance and time columns of a trace, distances rescaled to a reference length.
pub(crate) struct ScaledTrace {
    pub distance: Vec<f64>,
    pub time: Vec<f64>,
}

/// check_trace assures that a trace can be used for interpolation: at least two samples,
/// non-decreasing distances, finite times and a positive lap distance.
pub(crate) fn check_trace(trace: &[TelemetrySample], name: &str) -> Result<f64, AnalysisError> {
    if trace.len() < 2 {
        return Err(AnalysisError::InsufficientData(format!(
            "Trace {} contains {} samples, but at least 2 are required for interpolation!",
            name,
            trace.len()
        )));
    }

    let distance: Vec<f64> = trace.iter().map(|s| s.distance).collect();

    if distance.iter().any(|d| !d.is_finite()) || !is_non_decreasing(&distance) {
        return Err(AnalysisError::InvalidInput(format!(
            "Distances of trace {} are not non-decreasing!",
            name
        )));
    }

    if let Some(sample) = trace.iter().find(|s| !s.time.is_finite()) {
        return Err(AnalysisError::InvalidInput(format!(
            "Trace {} contains the non-finite time {} at {}m!",
            name, sample.time, sample.distance
        )));
    }

    let max_distance = distance[distance.len() - 1];

    if max_distance <= 0.0 {
        return Err(AnalysisError::InvalidInput(format!(
            "Trace {} does not cover any distance!",
            name
        )));
    }

    Ok(max_distance)
}

/// scale_trace stretches or compresses the distance column of a trace uniformly such that its
/// maximum equals ref_max_distance.
pub(crate) fn scale_trace(
    trace: &[TelemetrySample],
    max_distance: f64,
    ref_max_distance: f64,
) -> ScaledTrace {
    let scale_factor = ref_max_distance / max_distance;

    ScaledTrace {
        distance: trace.iter().map(|s| s.distance * scale_factor).collect(),
        time: trace.iter().map(|s| s.time).collect(),
    }
}

/// align interpolates the elapsed times of two traces onto the distance grid of a reference
/// trace (trace a if no reference is given). Both traces are scaled to the lap distance of the
/// reference beforehand to remove measurement drift. Outside of its measured range, a trace's
/// time is clamped to its first or last value.
pub fn align(
    trace_a: &[TelemetrySample],
    trace_b: &[TelemetrySample],
    reference: Option<&[TelemetrySample]>,
) -> Result<AlignedTrace, AnalysisError> {
    let reference = reference.unwrap_or(trace_a);

    let ref_max_distance = check_trace(reference, "reference")?;
    let max_distance_a = check_trace(trace_a, "a")?;
    let max_distance_b = check_trace(trace_b, "b")?;

    debug!(
        "Aligning traces with lap distances {:.1}m and {:.1}m to {:.1}m",
        max_distance_a, max_distance_b, ref_max_distance
    );

    let scaled_a = scale_trace(trace_a, max_distance_a, ref_max_distance);
    let scaled_b = scale_trace(trace_b, max_distance_b, ref_max_distance);

    let distance: Vec<f64> = reference.iter().map(|s| s.distance).collect();

    let time_a: Vec<f64> = distance
        .iter()
        .map(|&d| lin_interp(d, &scaled_a.distance, &scaled_a.time))
        .collect();
    let time_b: Vec<f64> = distance
        .iter()
        .map(|&d| lin_interp(d, &scaled_b.distance, &scaled_b.time))
        .collect();

    let delta = time_a
        .iter()
        .zip(time_b.iter())
        .map(|(t_a, t_b)| t_a - t_b)
        .collect();

    Ok(AlignedTrace {
        distance,
        time_a,
        time_b,
        delta,
    })
}
