//! Storage seam and the score-recording workflow.
//!
//! The engine never reads or writes storage itself. [`record_score`] is the
//! one place that reads a player's results, credits the entry and writes the
//! outcome back through a [`LeagueStore`].

pub mod snapshot;

use serde::{Deserialize, Serialize};

use crate::engine::{credit_score, WeekOnePatch};
use crate::error::{RecordError, StoreError};
use crate::models::{Player, PlayerId, PlayerResults, RecordedResult, Week};

pub use snapshot::LeagueSnapshot;

/// How a write treats an occupied (player, week) slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Fail with [`StoreError::Conflict`].
    Insert,
    /// Overwrite.
    Upsert,
}

/// Record-oriented datastore holding rosters and weekly results.
pub trait LeagueStore {
    fn roster(&self, league_id: &str) -> Result<Vec<Player>, StoreError>;

    /// All recorded results for a player across weeks 1-6.
    fn player_results(&self, player_id: &PlayerId) -> Result<PlayerResults, StoreError>;

    fn write_result(
        &mut self,
        player_id: &PlayerId,
        week: Week,
        result: RecordedResult,
        mode: WriteMode,
    ) -> Result<(), StoreError>;
}

/// Who is entering the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySurface {
    /// Players submit once per week; re-entry is refused.
    Player,
    /// Organizers may overwrite.
    Admin,
}

impl EntrySurface {
    fn write_mode(self) -> WriteMode {
        match self {
            EntrySurface::Player => WriteMode::Insert,
            EntrySurface::Admin => WriteMode::Upsert,
        }
    }
}

/// A raw score as typed by a scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player_id: PlayerId,
    pub week: Week,
    pub points: f64,
    #[serde(default)]
    pub was_substitute: bool,
    /// Usually the substitute's name.
    #[serde(default)]
    pub note: String,
}

/// What [`record_score`] wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedScore {
    pub week: Week,
    pub credited: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_one: Option<RecordedResult>,
}

/// Credit `entry` and persist it, applying the week-1 correction when one fires.
pub fn record_score<S: LeagueStore + ?Sized>(
    store: &mut S,
    entry: &ScoreEntry,
    surface: EntrySurface,
) -> Result<RecordedScore, RecordError> {
    let existing = store.player_results(&entry.player_id)?;

    if surface == EntrySurface::Player && existing.slot(entry.week).is_recorded() {
        return Err(RecordError::AlreadyRecorded {
            player: entry.player_id.clone(),
            week: entry.week.number(),
        });
    }

    let outcome = credit_score(entry.points, entry.was_substitute, &existing, entry.week)?;
    let result = RecordedResult {
        points: outcome.credited,
        was_substitute: entry.was_substitute,
        note: entry.note.clone(),
    };
    store.write_result(&entry.player_id, entry.week, result, surface.write_mode())?;
    tracing::info!(
        player = %entry.player_id,
        week = entry.week.number(),
        credited = outcome.credited,
        substitute = entry.was_substitute,
        "score recorded"
    );

    let week_one = match outcome.week_one_patch {
        Some(patch) => apply_week_one_patch(store, &entry.player_id, &existing, &patch)?,
        None => None,
    };

    Ok(RecordedScore { week: entry.week, credited: outcome.credited, week_one })
}

fn apply_week_one_patch<S: LeagueStore + ?Sized>(
    store: &mut S,
    player_id: &PlayerId,
    existing: &PlayerResults,
    patch: &WeekOnePatch,
) -> Result<Option<RecordedResult>, RecordError> {
    let Some(current) = existing.get(patch.week) else {
        return Ok(None);
    };
    let patched = patch.apply(current);
    store.write_result(player_id, patch.week, patched.clone(), WriteMode::Upsert)?;
    tracing::info!(player = %player_id, points = patched.points, "week 1 substitute score adjusted");
    Ok(Some(patched))
}
