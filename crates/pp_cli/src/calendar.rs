//! Which week a command works on, judged by the league's own calendar date.

use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use pp_core::{suggest_result_week, upcoming_week, EmailPhase, Week};

/// Calendar date in `zone` at the instant `now`.
pub fn league_today(now: DateTime<Utc>, zone: Tz) -> NaiveDate {
    now.with_timezone(&zone).date_naive()
}

/// Week for court listings and scoresheets.
///
/// An explicit week wins, then the week an email phase announces, then the
/// upcoming week by date.
pub fn schedule_week(
    start: Option<NaiveDate>,
    week: Option<i64>,
    phase: Option<EmailPhase>,
    today: NaiveDate,
) -> Result<Week> {
    match (week, phase) {
        (Some(_), Some(_)) => bail!("Pass either a week or an email phase, not both"),
        (Some(week), None) => Ok(Week::new(week)?),
        (None, Some(phase)) => Ok(phase.target_week()),
        (None, None) => Ok(upcoming_week(start, today)),
    }
}

/// Week for score entry: the explicit week, else the one suggested by date.
pub fn entry_week(start: Option<NaiveDate>, week: Option<i64>, today: NaiveDate) -> Result<Week> {
    match week {
        Some(week) => Ok(Week::new(week)?),
        None => Ok(suggest_result_week(start, today)),
    }
}
