use serde::{Deserialize, Serialize};

use super::{LeagueStore, WriteMode};
use crate::engine::{build_assignments, CourtAssignment};
use crate::error::{ScoreError, StoreError};
use crate::models::{League, Player, PlayerId, PlayerResults, RecordedResult, ResultsHistory, Week, WeekResultRow};
use crate::season::{standings, StandingRow};

/// A single league held in memory: settings, roster and result rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    pub league: League,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub results: Vec<WeekResultRow>,
}

impl LeagueSnapshot {
    pub fn new(league: League) -> Self {
        Self { league, players: Vec::new(), results: Vec::new() }
    }

    /// Results grouped per player; fails if the rows break (player, week) uniqueness.
    pub fn history(&self) -> Result<ResultsHistory, ScoreError> {
        ResultsHistory::from_rows(&self.results)
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Look a player up by id, then by case-insensitive display name.
    pub fn find_player(&self, query: &str) -> Option<&Player> {
        let query = query.trim();
        self.players
            .iter()
            .find(|p| p.id.as_str() == query)
            .or_else(|| self.players.iter().find(|p| p.display_name.eq_ignore_ascii_case(query)))
    }

    /// Add a player unless the roster already has them by name or email.
    ///
    /// Returns the new id, or `None` when the name is blank or a match exists.
    pub fn add_player(&mut self, name: &str, email: Option<&str>, dupr_id: Option<&str>) -> Option<PlayerId> {
        let name = name.trim();
        if name.is_empty() || self.players.iter().any(|p| p.matches(name, email)) {
            return None;
        }

        let non_empty = |v: Option<&str>| v.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string);
        let player = Player {
            id: PlayerId::generate(),
            display_name: name.to_string(),
            email: non_empty(email),
            dupr_id: non_empty(dupr_id),
        };
        let id = player.id.clone();
        tracing::info!(player = %id, name, "player added");
        self.players.push(player);
        Some(id)
    }

    /// Remove a player together with every result recorded for them.
    pub fn remove_player(&mut self, id: &PlayerId) -> Result<Player, StoreError> {
        let index = self
            .players
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| StoreError::PlayerNotFound(id.clone()))?;
        let removed = self.players.remove(index);
        let before = self.results.len();
        self.results.retain(|row| &row.player_id != id);
        tracing::info!(player = %id, results = before - self.results.len(), "player removed");
        Ok(removed)
    }

    pub fn assignments(&self, week: Week) -> Result<Vec<CourtAssignment>, ScoreError> {
        let history = self.history()?;
        Ok(build_assignments(&self.players, &history, week, &self.league.court_config()))
    }

    pub fn standings(&self) -> Result<Vec<StandingRow>, ScoreError> {
        let history = self.history()?;
        Ok(standings(&self.players, &history))
    }

    fn ensure_player(&self, id: &PlayerId) -> Result<(), StoreError> {
        self.player(id).map(|_| ()).ok_or_else(|| StoreError::PlayerNotFound(id.clone()))
    }
}

impl LeagueStore for LeagueSnapshot {
    fn roster(&self, league_id: &str) -> Result<Vec<Player>, StoreError> {
        if league_id != self.league.id {
            return Err(StoreError::LeagueNotFound(league_id.to_string()));
        }
        Ok(self.players.clone())
    }

    fn player_results(&self, player_id: &PlayerId) -> Result<PlayerResults, StoreError> {
        self.ensure_player(player_id)?;
        let mut results = PlayerResults::new();
        for row in self.results.iter().filter(|row| &row.player_id == player_id) {
            results.set(row.week, row.result());
        }
        Ok(results)
    }

    fn write_result(
        &mut self,
        player_id: &PlayerId,
        week: Week,
        result: RecordedResult,
        mode: WriteMode,
    ) -> Result<(), StoreError> {
        self.ensure_player(player_id)?;
        let row = WeekResultRow::new(player_id.clone(), week, result);
        match self.results.iter_mut().find(|r| &r.player_id == player_id && r.week == week) {
            Some(_) if mode == WriteMode::Insert => Err(StoreError::Conflict {
                player: player_id.clone(),
                week: week.number(),
            }),
            Some(existing) => {
                *existing = row;
                Ok(())
            }
            None => {
                self.results.push(row);
                Ok(())
            }
        }
    }
}
