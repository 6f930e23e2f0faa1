use crate::core::laps::{Compound, LapRecord};
use helpers::general::{linear_fit, quantile};
use serde::Serialize;
use std::collections::BTreeMap;

/// * `compound` - Tire compound
/// * `lap_times` - (s) Lap times of all quick laps on this compound
/// * `count` - Number of laps
/// * `min`, `q1`, `median`, `q3`, `max`, `mean` - (s) Distribution of the lap times
/// * `degr_rate` - (s/lap) Slope of a linear fit of lap time over tire age, None if fewer than
/// two distinct tire ages are available
#[derive(Debug, Clone, Serialize)]
pub struct CompoundDistribution {
    pub compound: Compound,
    pub lap_times: Vec<f64>,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
    pub degr_rate: Option<f64>,
}

/// tyre_degradation groups the quick laps by compound and returns the lap time distribution of
/// each compound together with a linear degradation rate.
pub fn tyre_degradation(laps: &[LapRecord]) -> Vec<CompoundDistribution> {
    // (lap_time, tyre_life) per compound, BTreeMap orders from soft to wet
    let mut grouped: BTreeMap<Compound, Vec<(f64, Option<u32>)>> = BTreeMap::new();

    for lap in laps.iter().filter(|lap| lap.quick_lap) {
        if let Some(lap_time) = lap.lap_time.filter(|t| t.is_finite()) {
            grouped
                .entry(lap.compound)
                .or_default()
                .push((lap_time, lap.tyre_life));
        }
    }

    grouped
        .into_iter()
        .map(|(compound, laps_compound)| {
            let lap_times: Vec<f64> = laps_compound.iter().map(|&(t, _)| t).collect();

            let mut sorted = lap_times.clone();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

            // linear degradation model t = k_0 + k_1 * age
            let (ages, times): (Vec<f64>, Vec<f64>) = laps_compound
                .iter()
                .filter_map(|&(t, age)| age.map(|age| (age as f64, t)))
                .unzip();
            let degr_rate = linear_fit(&ages, &times).map(|(k_1, _k_0)| k_1);

            // grouped only contains non-empty groups -> quantiles exist
            CompoundDistribution {
                compound,
                count: lap_times.len(),
                min: sorted[0],
                q1: quantile(&sorted, 0.25).unwrap_or(sorted[0]),
                median: quantile(&sorted, 0.5).unwrap_or(sorted[0]),
                q3: quantile(&sorted, 0.75).unwrap_or(sorted[0]),
                max: sorted[sorted.len() - 1],
                mean: lap_times.iter().sum::<f64>() / lap_times.len() as f64,
                lap_times,
                degr_rate,
            }
        })
        .collect()
}
