use crate::core::championship::Standings;
use crate::core::colors::ColorAssignment;
use crate::core::laps::{LapTimeSeries, PositionSeries};
use crate::core::qualifying::QualifyingGaps;
use crate::core::telemetry::AlignedTrace;
use crate::core::track_map::MiniSector;
use crate::core::tyres::CompoundDistribution;
use crate::pre::read_data::SeasonData;

/// fmt_laptime formats a time in seconds as m:ss.sss.
pub fn fmt_laptime(t: f64) -> String {
    let minutes = (t / 60.0).floor();
    format!("{}:{:06.3}", minutes as i64, t - minutes * 60.0)
}

fn color_suffix(colors: Option<&ColorAssignment>, label: &str) -> String {
    colors
        .and_then(|colors| colors.entries.iter().find(|e| e.label == label))
        .map(|entry| format!(" [{}]", entry.rgb.to_hex()))
        .unwrap_or_default()
}

pub fn format_positions(series_all: &[PositionSeries], colors: Option<&ColorAssignment>) -> String {
    let mut out = String::from("RESULT: Positions\n");

    for series in series_all.iter() {
        out.push_str(&format!(
            "{:>4}{}: ",
            series.driver,
            color_suffix(colors, &series.driver)
        ));

        let tmp: Vec<String> = series
            .lap_numbers
            .iter()
            .zip(series.positions.iter())
            .map(|(lap, pos)| format!("L{}=P{}", lap, pos))
            .collect();

        out.push_str(&tmp.join(", "));
        out.push('\n');
    }

    out
}

pub fn format_lap_times(series_all: &[LapTimeSeries]) -> String {
    let mut out = String::from("RESULT: Lap times\n");

    for series in series_all.iter() {
        out.push_str(&format!(
            "{} (fastest lap {}: {})\n",
            series.driver,
            series.fastest.lap_number,
            fmt_laptime(series.fastest.lap_time)
        ));

        for (lap, t) in series.lap_numbers.iter().zip(series.lap_times.iter()) {
            out.push_str(&format!("{:3}, {:8.3}s\n", lap, t));
        }
    }

    out
}

pub fn format_qualifying(gaps: &QualifyingGaps) -> String {
    let mut out = format!("RESULT: Qualifying (pole {})\n", fmt_laptime(gaps.pole_time));

    for (i, entry) in gaps.entries.iter().enumerate() {
        out.push_str(&format!(
            "{:2}. {:>4} {:<16} {:?} {} {:+7.3}s\n",
            i + 1,
            entry.driver,
            entry.team,
            entry.segment,
            fmt_laptime(entry.best_time),
            entry.delta
        ));
    }

    if !gaps.missing.is_empty() {
        out.push_str(&format!("No time: {}\n", gaps.missing.join(", ")));
    }
    if !gaps.anomalies.is_empty() {
        out.push_str(&format!(
            "Faster than pole (check data): {}\n",
            gaps.anomalies.join(", ")
        ));
    }

    out
}

pub fn format_tyres(distributions: &[CompoundDistribution]) -> String {
    let mut out = String::from(
        "RESULT: Tyre degradation\ncompound,     laps,      min,   median,      max, degr (s/lap)\n",
    );

    for distr in distributions.iter() {
        out.push_str(&format!(
            "{:<12}, {:5}, {:8.3}, {:8.3}, {:8.3}, {}\n",
            format!("{:?}", distr.compound),
            distr.count,
            distr.min,
            distr.median,
            distr.max,
            distr
                .degr_rate
                .map(|rate| format!("{:+.3}", rate))
                .unwrap_or_else(|| "-".to_owned())
        ));
    }

    out
}

/// format_schedule lists the event of every round, the standings tables refer to the rounds only.
pub fn format_schedule(season_data: &SeasonData) -> String {
    let mut out = format!("RESULT: Schedule {}\n", season_data.season);

    for round in season_data.round_order() {
        out.push_str(&format!(
            "R{:<3}, {}\n",
            round,
            season_data.event_name(round).unwrap_or("-")
        ));
    }

    out
}

pub fn format_standings(title: &str, standings: &Standings) -> String {
    let mut out = format!("RESULT: {}\n", title);

    let header: Vec<String> = standings.rounds.iter().map(|r| format!("R{:<3}", r)).collect();
    out.push_str(&format!("{:<20}, {}\n", "", header.join(", ")));

    for entry in standings.entries.iter() {
        let cumulative: Vec<String> = entry
            .cumulative
            .iter()
            .map(|pts| format!("{:4}", pts))
            .collect();
        out.push_str(&format!(
            "{:<20}, {}\n",
            entry.competitor,
            cumulative.join(", ")
        ));
    }

    out
}

pub fn format_comparison(aligned: &AlignedTrace, smoothed: &[f64]) -> String {
    let mut out = String::from("RESULT: Delta time (a - b)\ndistance,    delta, smoothed\n");

    for ((d, delta), smooth) in aligned
        .distance
        .iter()
        .zip(aligned.delta.iter())
        .zip(smoothed.iter())
    {
        out.push_str(&format!("{:8.1}, {:+8.3}, {:+8.3}\n", d, delta, smooth));
    }

    out
}

pub fn format_minisectors(minisectors: &[MiniSector], colors: Option<&ColorAssignment>) -> String {
    let mut out = String::from("RESULT: Fastest driver per minisector\n");

    for ms in minisectors.iter() {
        out.push_str(&format!(
            "{:3}, {:8.1}m - {:8.1}m, {:>4}{}, {:6.3}s\n",
            ms.idx + 1,
            ms.start,
            ms.end,
            ms.driver,
            color_suffix(colors, &ms.driver),
            ms.time
        ));
    }

    out
}
