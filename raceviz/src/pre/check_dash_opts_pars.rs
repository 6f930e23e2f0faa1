use crate::pre::dash_opts::{Chart, DashOpts};
use crate::pre::read_data::{SeasonData, SessionData, SessionType};
use helpers::general::AnalysisError;
use log::warn;
use std::collections::HashSet;

/// check_dash_opts assures that the inserted options are within reasonable limits and raises an
/// error if not. It is executed before any data file is read.
pub fn check_dash_opts(dash_opts: &DashOpts) -> anyhow::Result<()> {
    match &dash_opts.chart {
        Chart::Compare { window, order, .. } => {
            if *window < 5 || window % 2 == 0 {
                return Err(AnalysisError::InvalidInput(format!(
                    "window is {}, but must be an odd number of at least 5!",
                    window
                ))
                .into());
            }
            if order >= window {
                return Err(AnalysisError::InvalidInput(format!(
                    "order is {}, but must be less than the window size {}!",
                    order, window
                ))
                .into());
            }
        }
        Chart::Trackmap {
            laps,
            rotation,
            minisectors,
            ..
        } => {
            if *minisectors < 1 {
                return Err(AnalysisError::InvalidInput(
                    "minisectors must be at least equal to one!".to_owned(),
                )
                .into());
            }
            if !rotation.is_finite() {
                return Err(AnalysisError::InvalidInput(format!(
                    "rotation is {}, which is not a finite angle!",
                    rotation
                ))
                .into());
            }

            let mut drivers = HashSet::new();
            if let Some((driver, _)) = laps.iter().find(|(driver, _)| !drivers.insert(driver)) {
                return Err(AnalysisError::InvalidInput(format!(
                    "A lap of driver {} is inserted more than once!",
                    driver
                ))
                .into());
            }
        }
        _ => (),
    }

    Ok(())
}

/// check_session_pars assures that the session data fits the requested chart.
pub fn check_session_pars(chart: &Chart, session_data: &SessionData) -> anyhow::Result<()> {
    match chart {
        Chart::Positions { .. } | Chart::Tyres { .. } => {
            if session_data.laps.is_empty() {
                return Err(AnalysisError::MissingData(format!(
                    "No laps found for {} {}!",
                    session_data.season, session_data.event
                ))
                .into());
            }
        }
        Chart::Laptimes { drivers, .. } => {
            if session_data.laps.is_empty() {
                return Err(AnalysisError::MissingData(format!(
                    "No laps found for {} {}!",
                    session_data.season, session_data.event
                ))
                .into());
            }

            for driver in drivers.iter() {
                if !session_data.laps.iter().any(|lap| &lap.driver == driver) {
                    return Err(AnalysisError::MissingData(format!(
                        "Driver {} did not drive in {} {}!",
                        driver, session_data.season, session_data.event
                    ))
                    .into());
                }
            }
        }
        Chart::Qualifying { .. } => {
            if !matches!(session_data.session, SessionType::Q | SessionType::Sq) {
                warn!(
                    "Session {:?} is not a qualifying session",
                    session_data.session
                );
            }
            if session_data.qualifying.is_empty() {
                return Err(AnalysisError::MissingData(format!(
                    "No qualifying results found for {} {}!",
                    session_data.season, session_data.event
                ))
                .into());
            }
        }
        _ => (),
    }

    Ok(())
}

/// check_season_pars assures that the schedule is consistent with the results.
pub fn check_season_pars(season_data: &SeasonData) -> anyhow::Result<()> {
    let mut rounds = HashSet::with_capacity(season_data.schedule.len());

    for entry in season_data.schedule.iter() {
        if !rounds.insert(entry.round) {
            return Err(AnalysisError::InvalidInput(format!(
                "Round {} ({}) appears more than once in the schedule!",
                entry.round, entry.event
            ))
            .into());
        }
    }

    if let Some(res) = season_data
        .results
        .iter()
        .chain(season_data.sprint_results.iter())
        .find(|res| !rounds.contains(&res.round))
    {
        return Err(AnalysisError::InvalidInput(format!(
            "Result of {} refers to round {}, which is not part of the schedule!",
            res.driver, res.round
        ))
        .into());
    }

    Ok(())
}
