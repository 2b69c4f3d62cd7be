//! Substitute score crediting.
//!
//! A substitute's raw score is credited inside a band below the absent
//! player's own prior average: never above it, never more than
//! [`SUBSTITUTE_BAND`] points under it. When week 2 is recorded for a player
//! whose week 1 was played by a substitute, week 1 is re-credited as the
//! rounded mean of both weeks. That correction is returned as a patch for
//! the caller to write; nothing here touches storage.

use serde::{Deserialize, Serialize};

use super::average::prior_history;
use crate::error::ScoreError;
use crate::models::{PlayerResults, RecordedResult, Week, MAX_POINTS};

/// Width of the band below the prior average that a substitute score is held to.
pub const SUBSTITUTE_BAND: f64 = 15.0;

pub const WEEK_ONE_ADJUSTED_NOTE: &str = "Adjusted to avg of W1 & W2";

/// Joins an appended annotation onto an existing note.
pub const NOTE_SEPARATOR: &str = " — ";

/// Instruction to overwrite week 1 after a week-2 entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekOnePatch {
    pub week: Week,
    pub new_points: u8,
    pub note_append: String,
}

impl WeekOnePatch {
    /// `existing` with the annotation appended.
    pub fn merged_note(&self, existing: &str) -> String {
        if existing.is_empty() {
            self.note_append.clone()
        } else {
            format!("{existing}{NOTE_SEPARATOR}{}", self.note_append)
        }
    }

    /// The week-1 record after the patch is applied.
    pub fn apply(&self, week_one: &RecordedResult) -> RecordedResult {
        RecordedResult {
            points: self.new_points,
            was_substitute: week_one.was_substitute,
            note: self.merged_note(&week_one.note),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditOutcome {
    /// Points to store for the target week, within 0..=72.
    pub credited: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_one_patch: Option<WeekOnePatch>,
}

/// Reject non-finite or out-of-range entries.
pub fn validate_points(entered: f64) -> Result<f64, ScoreError> {
    if entered.is_finite() && (0.0..=f64::from(MAX_POINTS)).contains(&entered) {
        Ok(entered)
    } else {
        Err(ScoreError::InvalidPoints(entered))
    }
}

fn clamp_round(value: f64) -> u8 {
    value.clamp(0.0, f64::from(MAX_POINTS)).round() as u8
}

/// Points credited for one entry, plus the week-1 correction it triggers.
///
/// `existing` holds the player's results as stored before this entry. The
/// substitute band uses the average of weeks before `week`, with `week`
/// itself excluded on re-entry. Without any history the entry is credited as-is.
pub fn credit_score(
    entered: f64,
    was_substitute: bool,
    existing: &PlayerResults,
    week: Week,
) -> Result<CreditOutcome, ScoreError> {
    let entered = validate_points(entered)?;

    let raw = if was_substitute {
        match prior_history(&existing.without(week), week.number()) {
            Some(avg) => {
                let held = entered.max(avg - SUBSTITUTE_BAND).min(avg);
                tracing::debug!(entered, avg, held, week = week.number(), "substitute score held to band");
                held
            }
            None => entered,
        }
    } else {
        entered
    };
    let credited = clamp_round(raw);

    Ok(CreditOutcome { credited, week_one_patch: week_one_patch(existing, week, credited) })
}

/// Week-2 entries re-credit a substitute-played week 1 as the mean of both weeks.
fn week_one_patch(existing: &PlayerResults, week: Week, credited: u8) -> Option<WeekOnePatch> {
    if week != Week::SECOND {
        return None;
    }
    let week_one = existing.get(Week::FIRST).filter(|r| r.was_substitute)?;
    let new_points = clamp_round((f64::from(week_one.points) + f64::from(credited)) / 2.0);
    tracing::debug!(old = week_one.points, new_points, "week 1 substitute score averaged with week 2");

    Some(WeekOnePatch {
        week: Week::FIRST,
        new_points,
        note_append: WEEK_ONE_ADJUSTED_NOTE.to_string(),
    })
}
