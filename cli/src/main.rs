use clap::Parser;
use log::{info, warn, LevelFilter};
use raceviz::core::championship::{driver_and_team_standings, TeamAttribution};
use raceviz::core::colors::{ColorAssigner, ColorAssignment, StyleTable};
use raceviz::core::laps::{drivers_in_order, lap_time_series, position_evolution};
use raceviz::core::qualifying::qualifying_gaps;
use raceviz::core::telemetry::align;
use raceviz::core::track_map::{minisector_overlay, TrackMap};
use raceviz::core::tyres::tyre_degradation;
use raceviz::interfaces::render_interface::DashStyle;
use raceviz::post::report;
use raceviz::pre::check_dash_opts_pars::{check_dash_opts, check_season_pars, check_session_pars};
use raceviz::pre::dash_opts::{Chart, DashOpts};
use raceviz::pre::read_data::{
    read_season_data, read_session_data, read_style_table, read_telemetry_csv,
};
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;

// color of labels without a color of their own, never assigned to a series
const NO_COLOR: &str = "gray";

// padding around the track map (m)
const TRACK_MAP_PADDING: f64 = 50.0;

/// Chart data together with the style of every series, handed to the renderer as JSON.
#[derive(Serialize)]
struct StyledChart<'a, T: Serialize> {
    data: &'a T,
    colors: &'a ColorAssignment,
    dashes: Vec<(&'a str, DashStyle)>,
}

fn main() -> anyhow::Result<()> {
    // PRE-PROCESSING ------------------------------------------------------------------------------
    // get options from the command line arguments and set up logging
    let dash_opts: DashOpts = DashOpts::parse();

    colog::default_builder()
        .filter_level(if dash_opts.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    // check options and read the style table
    check_dash_opts(&dash_opts)?;

    let style_table = match &dash_opts.stylefile_path {
        Some(stylefile_path) => read_style_table(stylefile_path)?,
        None => StyleTable::default(),
    };

    // EXECUTION -----------------------------------------------------------------------------------
    let t_start = Instant::now();

    let output = match &dash_opts.chart {
        Chart::Positions { sessionfile_path } => {
            let session_data = read_session_data(sessionfile_path)?;
            check_session_pars(&dash_opts.chart, &session_data)?;

            let series = position_evolution(&session_data.laps);
            let labels: Vec<&str> = series.iter().map(|s| s.driver.as_str()).collect();
            let colors = assign_colors(&style_table, session_data.season, &labels)?;

            if dash_opts.json {
                to_json(&StyledChart {
                    data: &series,
                    colors: &colors,
                    dashes: dash_styles(&style_table, session_data.season, &labels),
                })?
            } else {
                report::format_positions(&series, Some(&colors))
            }
        }

        Chart::Laptimes {
            sessionfile_path,
            drivers,
            quick_only,
        } => {
            let session_data = read_session_data(sessionfile_path)?;
            check_session_pars(&dash_opts.chart, &session_data)?;

            let drivers = if drivers.is_empty() {
                drivers_in_order(&session_data.laps)
            } else {
                drivers.to_owned()
            };

            // the series of the drivers are independent of each other
            let series = drivers
                .par_iter()
                .map(|driver| lap_time_series(&session_data.laps, driver, *quick_only))
                .collect::<Result<Vec<_>, _>>()?;

            if dash_opts.json {
                let labels: Vec<&str> = drivers.iter().map(|d| d.as_str()).collect();
                let colors = assign_colors(&style_table, session_data.season, &labels)?;
                to_json(&StyledChart {
                    data: &series,
                    colors: &colors,
                    dashes: dash_styles(&style_table, session_data.season, &labels),
                })?
            } else {
                report::format_lap_times(&series)
            }
        }

        Chart::Qualifying { sessionfile_path } => {
            let session_data = read_session_data(sessionfile_path)?;
            check_session_pars(&dash_opts.chart, &session_data)?;

            let gaps = qualifying_gaps(&session_data.qualifying)?;

            if dash_opts.json {
                let labels: Vec<&str> = gaps.entries.iter().map(|e| e.color_label()).collect();
                let colors = assign_colors(&style_table, session_data.season, &labels)?;
                to_json(&StyledChart {
                    data: &gaps,
                    colors: &colors,
                    dashes: vec![],
                })?
            } else {
                report::format_qualifying(&gaps)
            }
        }

        Chart::Tyres { sessionfile_path } => {
            let session_data = read_session_data(sessionfile_path)?;
            check_session_pars(&dash_opts.chart, &session_data)?;

            let distributions = tyre_degradation(&session_data.laps);

            if distributions.is_empty() {
                warn!("No quick laps available, the tyre chart is empty");
            }

            if dash_opts.json {
                to_json(&distributions)?
            } else {
                report::format_tyres(&distributions)
            }
        }

        Chart::Standings {
            seasonfile_path,
            end_of_season_teams,
        } => {
            let season_data = read_season_data(seasonfile_path)?;
            check_season_pars(&season_data)?;

            let attribution = if *end_of_season_teams {
                warn!("Team points are attributed to the end-of-season team of each driver");
                TeamAttribution::EndOfSeason
            } else {
                TeamAttribution::PerRound
            };

            let (drivers, teams) = driver_and_team_standings(
                &season_data.results,
                &season_data.sprint_results,
                &season_data.round_order(),
                attribution,
            )?;

            if dash_opts.json {
                let mut labels: Vec<&str> =
                    drivers.entries.iter().map(|e| e.competitor.as_str()).collect();
                labels.extend(teams.entries.iter().map(|e| e.competitor.as_str()));
                let colors = assign_colors(&style_table, season_data.season, &labels)?;
                to_json(&StyledChart {
                    data: &(&drivers, &teams),
                    colors: &colors,
                    dashes: dash_styles(&style_table, season_data.season, &labels),
                })?
            } else {
                format!(
                    "{}{}{}",
                    report::format_schedule(&season_data),
                    report::format_standings("Drivers' championship", &drivers),
                    report::format_standings("Constructors' championship", &teams)
                )
            }
        }

        Chart::Compare {
            telemetry_a,
            telemetry_b,
            reference,
            window,
            order,
        } => {
            let trace_a = read_telemetry_csv(telemetry_a)?;
            let trace_b = read_telemetry_csv(telemetry_b)?;
            let trace_ref = match reference {
                Some(reference) => Some(read_telemetry_csv(reference)?),
                None => None,
            };

            let aligned = align(&trace_a, &trace_b, trace_ref.as_deref())?;

            // smoothing is for display only, the raw delta is used if the lap is too short
            let smoothed = match aligned.smoothed_delta(*window, *order) {
                Ok(smoothed) => smoothed,
                Err(e) => {
                    warn!("Delta is not smoothed: {}", e);
                    aligned.delta.to_owned()
                }
            };

            if let Some(final_delta) = aligned.final_delta() {
                info!("Delta at the end of the lap is {:+.3}s", final_delta);
            }

            if dash_opts.json {
                to_json(&(&aligned, &smoothed))?
            } else {
                report::format_comparison(&aligned, &smoothed)
            }
        }

        Chart::Trackmap {
            laps,
            rotation,
            minisectors,
            season,
        } => {
            // the telemetry files are independent of each other
            let traces = laps
                .par_iter()
                .map(|(driver, path)| {
                    read_telemetry_csv(path).map(|trace| (driver.to_owned(), trace))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;

            let overlay = minisector_overlay(&traces, *minisectors)?;
            let track_map = TrackMap::from_samples(&traces[0].1, *rotation);

            let labels: Vec<&str> = traces.iter().map(|(driver, _)| driver.as_str()).collect();
            let colors = match season {
                Some(season) => assign_colors(&style_table, *season, &labels)?,
                None => ColorAssigner::default().assign(&labels, |_| None)?,
            };

            info!("Track map length is {:.1}m", track_map.length());

            if dash_opts.json {
                to_json(&StyledChart {
                    data: &(
                        &track_map,
                        track_map.axes_expansion(TRACK_MAP_PADDING),
                        &overlay,
                    ),
                    colors: &colors,
                    dashes: vec![],
                })?
            } else {
                report::format_minisectors(&overlay, Some(&colors))
            }
        }
    };

    info!(
        "Execution time (total): {}ms",
        t_start.elapsed().as_millis()
    );

    // POST-PROCESSING -----------------------------------------------------------------------------
    println!("{}", output);

    Ok(())
}

/// assign_colors assigns the colors of the style table to the labels, falling back to the
/// default palette for unknown labels and duplicate colors.
fn assign_colors(
    style_table: &StyleTable,
    season: u32,
    labels: &[&str],
) -> anyhow::Result<ColorAssignment> {
    let colors = ColorAssigner::default()
        .with_sentinel(NO_COLOR)
        .assign(labels, |label| style_table.preferred_color(season, label))?;

    for entry in colors.entries.iter().filter(|e| e.from_fallback) {
        info!("{} is drawn with fallback color {}", entry.label, entry.color);
    }

    Ok(colors)
}

fn dash_styles<'a>(
    style_table: &StyleTable,
    season: u32,
    labels: &[&'a str],
) -> Vec<(&'a str, DashStyle)> {
    labels
        .iter()
        .map(|&label| (label, style_table.dash_style(season, label)))
        .collect()
}

fn to_json<T: Serialize>(data: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}
