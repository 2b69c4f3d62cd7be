use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::engine::season_average;
use crate::models::{Player, ResultsHistory, Week, REGULAR_SEASON_WEEKS};

/// One line of the league table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    /// 1-based rank.
    pub seed: usize,
    pub player: Player,
    pub weeks: [Option<u8>; REGULAR_SEASON_WEEKS as usize],
    pub average: f64,
    /// Week 1 was a substitute score later averaged with week 2.
    pub week_one_adjusted: bool,
}

/// League table ordered by season average, highest first, ties by display name.
pub fn standings(players: &[Player], history: &ResultsHistory) -> Vec<StandingRow> {
    let mut rows: Vec<StandingRow> = players
        .iter()
        .map(|player| {
            let results = history.player(&player.id);
            let mut weeks = [None; REGULAR_SEASON_WEEKS as usize];
            for (slot, week) in weeks.iter_mut().zip(Week::all()) {
                *slot = results.points(week);
            }
            StandingRow {
                seed: 0,
                player: player.clone(),
                weeks,
                average: season_average(&results),
                week_one_adjusted: results.week_one_adjusted(),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.average
            .partial_cmp(&a.average)
            .unwrap_or(Ordering::Equal)
            // Same ordinal name order as week-2+ court ranking.
            .then_with(|| a.player.display_name.cmp(&b.player.display_name))
    });
    for (i, row) in rows.iter_mut().enumerate() {
        row.seed = i + 1;
    }
    rows
}

/// Players still missing a result for `week`.
pub fn missing_count(players: &[Player], history: &ResultsHistory, week: Week) -> usize {
    players
        .iter()
        .filter(|p| history.get(&p.id).and_then(|r| r.get(week)).is_none())
        .count()
}

/// Week 1 is always open; later weeks open once every player has a result for the week before.
pub fn assignments_unlocked(players: &[Player], history: &ResultsHistory, week: Week) -> bool {
    match week.previous() {
        None => true,
        Some(prev) => !players.is_empty() && missing_count(players, history, prev) == 0,
    }
}
