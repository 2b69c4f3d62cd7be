//! Weekly result records.
//!
//! Storage rows arrive flat (`WeekResultRow`); the engine works on
//! [`PlayerResults`], six typed slots per player where an empty slot is
//! [`ResultSlot::Unset`] rather than a missing field.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::PlayerId;
use crate::error::ScoreError;

/// Number of algorithmically scheduled weeks. Week 7 (playoffs) is handled on-site.
pub const REGULAR_SEASON_WEEKS: u8 = 6;

/// Highest score a player can post in one week.
pub const MAX_POINTS: u8 = 72;

/// Regular-season week number, always within 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Week(u8);

impl Week {
    pub const FIRST: Week = Week(1);
    pub const SECOND: Week = Week(2);
    pub const LAST: Week = Week(REGULAR_SEASON_WEEKS);

    pub fn new(week: i64) -> Result<Self, ScoreError> {
        if (1..=i64::from(REGULAR_SEASON_WEEKS)).contains(&week) {
            Ok(Week(week as u8))
        } else {
            Err(ScoreError::InvalidWeek(week))
        }
    }

    /// Clamp any week number into the regular season.
    pub fn saturating(week: i64) -> Self {
        Week(week.clamp(1, i64::from(REGULAR_SEASON_WEEKS)) as u8)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn previous(self) -> Option<Week> {
        (self.0 > 1).then(|| Week(self.0 - 1))
    }

    pub fn all() -> impl Iterator<Item = Week> {
        (1..=REGULAR_SEASON_WEEKS).map(Week)
    }

    fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl TryFrom<i64> for Week {
    type Error = ScoreError;

    fn try_from(week: i64) -> Result<Self, Self::Error> {
        Week::new(week)
    }
}

impl From<Week> for u8 {
    fn from(week: Week) -> Self {
        week.0
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored (credited) weekly score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedResult {
    pub points: u8,
    #[serde(default)]
    pub was_substitute: bool,
    #[serde(default)]
    pub note: String,
}

/// Reject stored points above [`MAX_POINTS`].
pub fn check_points(points: u8) -> Result<u8, ScoreError> {
    if points <= MAX_POINTS {
        Ok(points)
    } else {
        Err(ScoreError::InvalidPoints(f64::from(points)))
    }
}

impl RecordedResult {
    pub fn new(points: u8) -> Self {
        Self { points, was_substitute: false, note: String::new() }
    }

    pub fn substitute(points: u8, note: impl Into<String>) -> Self {
        Self { points, was_substitute: true, note: note.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResultSlot {
    #[default]
    Unset,
    Recorded(RecordedResult),
}

impl ResultSlot {
    pub fn recorded(&self) -> Option<&RecordedResult> {
        match self {
            ResultSlot::Unset => None,
            ResultSlot::Recorded(result) => Some(result),
        }
    }

    pub fn is_recorded(&self) -> bool {
        matches!(self, ResultSlot::Recorded(_))
    }
}

/// One player's six weekly slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResults {
    slots: [ResultSlot; REGULAR_SEASON_WEEKS as usize],
}

impl PlayerResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, week: Week) -> &ResultSlot {
        &self.slots[week.index()]
    }

    pub fn get(&self, week: Week) -> Option<&RecordedResult> {
        self.slot(week).recorded()
    }

    pub fn points(&self, week: Week) -> Option<u8> {
        self.get(week).map(|r| r.points)
    }

    pub fn set(&mut self, week: Week, result: RecordedResult) {
        self.slots[week.index()] = ResultSlot::Recorded(result);
    }

    pub fn clear(&mut self, week: Week) {
        self.slots[week.index()] = ResultSlot::Unset;
    }

    /// Recorded weeks in ascending order.
    pub fn recorded(&self) -> impl Iterator<Item = (Week, &RecordedResult)> {
        Week::all().filter_map(move |week| self.get(week).map(|r| (week, r)))
    }

    /// Copy with one week blanked out.
    pub fn without(&self, week: Week) -> Self {
        let mut copy = self.clone();
        copy.clear(week);
        copy
    }

    /// Week 1 was a substitute score and has since been averaged with week 2.
    pub fn week_one_adjusted(&self) -> bool {
        self.get(Week::FIRST).is_some_and(|r| r.was_substitute) && self.slot(Week::SECOND).is_recorded()
    }
}

/// Flat storage row, one per (player, week).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekResultRow {
    pub player_id: PlayerId,
    pub week: Week,
    pub points: u8,
    #[serde(default)]
    pub was_substitute: bool,
    #[serde(default)]
    pub note: String,
}

impl WeekResultRow {
    pub fn new(player_id: PlayerId, week: Week, result: RecordedResult) -> Self {
        Self {
            player_id,
            week,
            points: result.points,
            was_substitute: result.was_substitute,
            note: result.note,
        }
    }

    pub fn result(&self) -> RecordedResult {
        RecordedResult {
            points: self.points,
            was_substitute: self.was_substitute,
            note: self.note.clone(),
        }
    }
}

/// Every player's results for one league.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsHistory {
    by_player: BTreeMap<PlayerId, PlayerResults>,
}

impl ResultsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group storage rows by player.
    ///
    /// Two rows for one (player, week) are rejected, as are points above 72.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a WeekResultRow>) -> Result<Self, ScoreError> {
        let mut history = Self::new();
        for row in rows {
            check_points(row.points)?;
            let results = history.by_player.entry(row.player_id.clone()).or_default();
            if results.slot(row.week).is_recorded() {
                return Err(ScoreError::DuplicateResult {
                    player: row.player_id.clone(),
                    week: row.week.number(),
                });
            }
            results.set(row.week, row.result());
        }
        Ok(history)
    }

    /// Results for a player; players with no rows get an empty record.
    pub fn player(&self, id: &PlayerId) -> PlayerResults {
        self.by_player.get(id).cloned().unwrap_or_default()
    }

    pub fn get(&self, id: &PlayerId) -> Option<&PlayerResults> {
        self.by_player.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_bounds() {
        assert!(Week::new(0).is_err());
        assert!(Week::new(7).is_err());
        assert_eq!(Week::new(6).map(Week::number), Ok(6));
        assert_eq!(Week::saturating(9), Week::LAST);
        assert_eq!(Week::saturating(-3), Week::FIRST);
        assert_eq!(Week::FIRST.previous(), None);
        assert_eq!(Week::LAST.previous().map(Week::number), Some(5));
    }

    #[test]
    fn test_week_deserialize_rejects_playoffs() {
        assert!(serde_json::from_str::<Week>("7").is_err());
        assert_eq!(serde_json::from_str::<Week>("3").ok(), Week::new(3).ok());
    }

    #[test]
    fn test_from_rows_rejects_duplicates() {
        let row = WeekResultRow::new("p1".into(), Week::FIRST, RecordedResult::new(30));
        let err = ResultsHistory::from_rows([&row, &row]).unwrap_err();
        assert_eq!(err, ScoreError::DuplicateResult { player: "p1".into(), week: 1 });
    }

    #[test]
    fn test_from_rows_rejects_points_over_max() {
        let row = WeekResultRow::new("p1".into(), Week::FIRST, RecordedResult::new(250));
        let err = ResultsHistory::from_rows([&row]).unwrap_err();
        assert_eq!(err, ScoreError::InvalidPoints(250.0));

        let top = WeekResultRow::new("p1".into(), Week::FIRST, RecordedResult::new(MAX_POINTS));
        assert!(ResultsHistory::from_rows([&top]).is_ok());
    }

    #[test]
    fn test_week_one_adjusted_flag() {
        let mut results = PlayerResults::new();
        results.set(Week::FIRST, RecordedResult::substitute(30, "Pat"));
        assert!(!results.week_one_adjusted());
        results.set(Week::SECOND, RecordedResult::new(50));
        assert!(results.week_one_adjusted());
    }
}
