use helpers::general::AnalysisError;
use log::warn;
use serde::{Deserialize, Serialize};

/// Knockout qualifying segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Segment {
    Q1,
    Q2,
    Q3,
}

/// * `driver` - Driver abbreviation
/// * `team` - Team of the driver
/// * `q1` - (s) Best lap time in Q1
/// * `q2` - (s) Best lap time in Q2 (None if eliminated in Q1 or no time set)
/// * `q3` - (s) Best lap time in Q3 (None if eliminated earlier or no time set)
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QualifyingSegments {
    pub driver: String,
    #[serde(default)]
    pub team: String,
    pub q1: Option<f64>,
    pub q2: Option<f64>,
    pub q3: Option<f64>,
}

impl QualifyingSegments {
    /// best_time returns the time of the latest segment the driver set a time in (Q3 before Q2
    /// before Q1), even if an earlier segment was faster.
    pub fn best_time(&self) -> Option<(Segment, f64)> {
        [(Segment::Q3, self.q3), (Segment::Q2, self.q2), (Segment::Q1, self.q1)]
            .iter()
            .find_map(|&(segment, t)| t.filter(|t| t.is_finite()).map(|t| (segment, t)))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QualifyingGap {
    pub driver: String,
    pub team: String,
    pub segment: Segment,
    pub best_time: f64,
    pub delta: f64,
}

impl QualifyingGap {
    /// color_label returns the team as label for the color lookup, the driver if the team is
    /// unknown such that drivers without a team do not share one label.
    pub fn color_label(&self) -> &str {
        if self.team.trim().is_empty() {
            &self.driver
        } else {
            &self.team
        }
    }
}

/// * `pole_time` - (s) Fastest Q3 time
/// * `entries` - Drivers sorted by their selected time
/// * `missing` - Drivers without any qualifying time
/// * `anomalies` - Drivers whose selected time is faster than the pole time (corrupt data)
#[derive(Debug, Clone, Serialize)]
pub struct QualifyingGaps {
    pub pole_time: f64,
    pub entries: Vec<QualifyingGap>,
    pub missing: Vec<String>,
    pub anomalies: Vec<String>,
}

/// best_time is the free function form of QualifyingSegments::best_time.
pub fn best_time(segments: &QualifyingSegments) -> Option<(Segment, f64)> {
    segments.best_time()
}

/// qualifying_gaps determines the time gap of every driver to the pole time. The pole time is
/// the fastest time among the drivers that set a Q3 time.
pub fn qualifying_gaps(results: &[QualifyingSegments]) -> Result<QualifyingGaps, AnalysisError> {
    let mut entries = Vec::with_capacity(results.len());
    let mut missing = vec![];

    for result in results.iter() {
        match result.best_time() {
            Some((segment, best_time)) => entries.push(QualifyingGap {
                driver: result.driver.to_owned(),
                team: result.team.to_owned(),
                segment,
                best_time,
                delta: 0.0,
            }),
            None => {
                warn!("Driver {} has no qualifying time", result.driver);
                missing.push(result.driver.to_owned());
            }
        }
    }

    // the best time of a Q3 participant is its Q3 time
    let pole_time = entries
        .iter()
        .filter(|entry| entry.segment == Segment::Q3)
        .map(|entry| entry.best_time)
        .fold(None, |acc: Option<f64>, t| {
            Some(acc.map_or(t, |acc| acc.min(t)))
        })
        .ok_or_else(|| AnalysisError::MissingData("No driver set a Q3 time!".to_owned()))?;

    entries.sort_by(|a, b| {
        a.best_time
            .partial_cmp(&b.best_time)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.driver.cmp(&b.driver))
    });

    let mut anomalies = vec![];

    for entry in entries.iter_mut() {
        entry.delta = entry.best_time - pole_time;

        if entry.delta < 0.0 {
            warn!(
                "Driver {} is {:.3}s faster than the pole time in {:?}, check the data!",
                entry.driver, -entry.delta, entry.segment
            );
            anomalies.push(entry.driver.to_owned());
        }
    }

    Ok(QualifyingGaps {
        pole_time,
        entries,
        missing,
        anomalies,
    })
}
