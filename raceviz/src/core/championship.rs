use helpers::general::AnalysisError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

/// * `round` - Round of the championship
/// * `competitor` - Driver abbreviation or team name
/// * `points` - Points earned in this round (>= 0)
/// * `position` - Finishing position, only used for breaking ties in the standings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PointsRow {
    pub round: u32,
    pub competitor: String,
    pub points: f64,
    #[serde(default)]
    pub position: Option<u32>,
}

/// * `round` - Round of the championship
/// * `driver` - Driver abbreviation
/// * `team` - Team the driver raced for in this round
/// * `points` - Points earned in the event (main race or secondary event)
/// * `position` - Finishing position
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RoundResult {
    pub round: u32,
    pub driver: String,
    pub team: String,
    pub points: f64,
    #[serde(default)]
    pub position: Option<u32>,
}

/// Determines which team receives the points a driver scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamAttribution {
    /// Team the driver raced for in the respective round.
    PerRound,
    /// Team the driver raced for in their last round of the season. Reassigns points scored for
    /// earlier teams, only available for comparison.
    EndOfSeason,
}

impl Default for TeamAttribution {
    fn default() -> Self {
        TeamAttribution::PerRound
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StandingsEntry {
    pub competitor: String,
    pub per_round: Vec<f64>,
    pub cumulative: Vec<f64>,
    pub total: f64,
    pub wins: u32,
    pub second_places: u32,
}

/// * `rounds` - Rounds in championship order
/// * `entries` - Competitors sorted by their final total (ties: wins, second places, name)
#[derive(Debug, Clone, Serialize)]
pub struct Standings {
    pub rounds: Vec<u32>,
    pub entries: Vec<StandingsEntry>,
}

impl Standings {
    pub fn get(&self, competitor: &str) -> Option<&StandingsEntry> {
        self.entries.iter().find(|e| e.competitor == competitor)
    }
}

/// merge_bonus_points converts the main event results and the secondary event (e.g. sprint)
/// results into points rows. Only main event positions take part in the tie-break, therefore
/// secondary event rows are stored without a position.
pub fn merge_bonus_points(results: &[RoundResult], bonus_results: &[RoundResult]) -> Vec<PointsRow> {
    let mut rows: Vec<PointsRow> = results
        .iter()
        .map(|res| PointsRow {
            round: res.round,
            competitor: res.driver.to_owned(),
            points: res.points,
            position: res.position,
        })
        .collect();

    rows.extend(bonus_results.iter().map(|res| PointsRow {
        round: res.round,
        competitor: res.driver.to_owned(),
        points: res.points,
        position: None,
    }));

    rows
}

/// accumulate pivots the points rows into a competitor x round table (points of several rows for
/// the same competitor and round are summed, missing entries count as zero points) and calculates
/// the running total of every competitor along round_order.
pub fn accumulate(rows: &[PointsRow], round_order: &[u32]) -> Result<Standings, AnalysisError> {
    // index of each round within the championship order
    let mut round_idxs: HashMap<u32, usize> = HashMap::with_capacity(round_order.len());

    for (idx, &round) in round_order.iter().enumerate() {
        if round_idxs.insert(round, idx).is_some() {
            return Err(AnalysisError::InvalidInput(format!(
                "Round {} appears more than once in the round order!",
                round
            )));
        }
    }

    // pivot rows, BTreeMap keeps the result independent of the row order
    let mut table: BTreeMap<&str, (Vec<f64>, u32, u32)> = BTreeMap::new();

    for row in rows.iter() {
        if !row.points.is_finite() || row.points < 0.0 {
            return Err(AnalysisError::InvalidInput(format!(
                "Points of {} in round {} must be a non-negative number, but are {}!",
                row.competitor, row.round, row.points
            )));
        }

        let idx = *round_idxs.get(&row.round).ok_or_else(|| {
            AnalysisError::InvalidInput(format!(
                "Round {} of {} is not part of the round order!",
                row.round, row.competitor
            ))
        })?;

        let entry = table
            .entry(row.competitor.as_str())
            .or_insert_with(|| (vec![0.0; round_order.len()], 0, 0));

        entry.0[idx] += row.points;

        match row.position {
            Some(1) => entry.1 += 1,
            Some(2) => entry.2 += 1,
            _ => (),
        }
    }

    let mut entries: Vec<StandingsEntry> = table
        .into_iter()
        .map(|(competitor, (per_round, wins, second_places))| {
            let cumulative: Vec<f64> = per_round
                .iter()
                .scan(0.0, |sum, &pts| {
                    *sum += pts;
                    Some(*sum)
                })
                .collect();

            StandingsEntry {
                competitor: competitor.to_owned(),
                total: cumulative.last().copied().unwrap_or(0.0),
                per_round,
                cumulative,
                wins,
                second_places,
            }
        })
        .collect();

    entries.sort_by(compare_standings_entries);

    debug!(
        "Accumulated {} rows into standings of {} competitors over {} rounds",
        rows.len(),
        entries.len(),
        round_order.len()
    );

    Ok(Standings {
        rounds: round_order.to_vec(),
        entries,
    })
}

/// compare_standings_entries orders by total points (descending), then by number of wins and
/// second places (descending) and finally by competitor name (ascending).
fn compare_standings_entries(a: &StandingsEntry, b: &StandingsEntry) -> Ordering {
    total_key(b.total)
        .cmp(&total_key(a.total))
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| b.second_places.cmp(&a.second_places))
        .then_with(|| a.competitor.cmp(&b.competitor))
}

// totals are compared at a resolution of 1e-6 points such that float noise does not decide
const TOTAL_RESOLUTION: f64 = 1.0e6;

fn total_key(total: f64) -> i64 {
    (total * TOTAL_RESOLUTION).round() as i64
}

/// TeamMembership stores the team of every driver for every round, such that mid-season team
/// changes are respected.
#[derive(Debug, Clone, Default)]
pub struct TeamMembership {
    teams: HashMap<(u32, String), String>,
}

impl TeamMembership {
    pub fn new() -> TeamMembership {
        Default::default()
    }

    /// insert sets the team of a driver for a round. A different team for an already known
    /// round and driver is rejected.
    pub fn insert(&mut self, round: u32, driver: &str, team: &str) -> Result<(), AnalysisError> {
        match self.teams.get(&(round, driver.to_owned())) {
            Some(known) if known != team => Err(AnalysisError::InvalidInput(format!(
                "Driver {} is assigned to both {} and {} in round {}!",
                driver, known, team, round
            ))),
            Some(_) => Ok(()),
            None => {
                self.teams
                    .insert((round, driver.to_owned()), team.to_owned());
                Ok(())
            }
        }
    }

    pub fn from_results<'a, I>(results: I) -> Result<TeamMembership, AnalysisError>
    where
        I: IntoIterator<Item = &'a RoundResult>,
    {
        let mut membership = TeamMembership::new();

        for res in results {
            membership.insert(res.round, &res.driver, &res.team)?;
        }

        Ok(membership)
    }

    pub fn team_of(&self, round: u32, driver: &str) -> Option<&str> {
        self.teams
            .get(&(round, driver.to_owned()))
            .map(|team| team.as_str())
    }

    /// final_team_of returns the team of the driver in the last round of round_order in which the
    /// driver has a team.
    pub fn final_team_of(&self, driver: &str, round_order: &[u32]) -> Option<&str> {
        round_order
            .iter()
            .rev()
            .find_map(|&round| self.team_of(round, driver))
    }
}

/// team_rows maps every driver points row to a team points row according to the chosen
/// attribution. Positions are kept such that the tie-break counts team wins.
pub fn team_rows(
    driver_rows: &[PointsRow],
    membership: &TeamMembership,
    attribution: TeamAttribution,
    round_order: &[u32],
) -> Result<Vec<PointsRow>, AnalysisError> {
    let mut warned: HashSet<&str> = HashSet::new();

    driver_rows
        .iter()
        .map(|row| {
            let team = match attribution {
                TeamAttribution::PerRound => membership.team_of(row.round, &row.competitor),
                TeamAttribution::EndOfSeason => {
                    let team = membership.final_team_of(&row.competitor, round_order);
                    if team != membership.team_of(row.round, &row.competitor)
                        && warned.insert(row.competitor.as_str())
                    {
                        debug!(
                            "Points of {} are reassigned to the end-of-season team",
                            row.competitor
                        );
                    }
                    team
                }
            }
            .ok_or_else(|| {
                AnalysisError::MissingData(format!(
                    "No team known for driver {} in round {}!",
                    row.competitor, row.round
                ))
            })?;

            Ok(PointsRow {
                round: row.round,
                competitor: team.to_owned(),
                points: row.points,
                position: row.position,
            })
        })
        .collect()
}

/// driver_and_team_standings accumulates the driver standings and the team standings (with the
/// given attribution) from main and secondary event results.
pub fn driver_and_team_standings(
    results: &[RoundResult],
    bonus_results: &[RoundResult],
    round_order: &[u32],
    attribution: TeamAttribution,
) -> Result<(Standings, Standings), AnalysisError> {
    let driver_rows = merge_bonus_points(results, bonus_results);
    let membership = TeamMembership::from_results(results.iter().chain(bonus_results.iter()))?;

    let drivers = accumulate(&driver_rows, round_order)?;
    let teams = accumulate(
        &team_rows(&driver_rows, &membership, attribution, round_order)?,
        round_order,
    )?;

    Ok((drivers, teams))
}
