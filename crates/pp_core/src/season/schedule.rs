use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ParsePhaseError;
use crate::models::{Week, REGULAR_SEASON_WEEKS};

/// Play date of `week`, one week apart from the league start.
pub fn week_date(start: NaiveDate, week: u8) -> Option<NaiveDate> {
    let offset = 7 * u64::from(week.saturating_sub(1));
    start.checked_add_days(Days::new(offset))
}

/// Week whose scoresheets are due on `today`.
///
/// Whole weeks elapsed since the start, plus one, held to 1..=6. Leagues
/// without a start date are always in week 1.
pub fn upcoming_week(start: Option<NaiveDate>, today: NaiveDate) -> Week {
    let Some(start) = start else {
        return Week::FIRST;
    };
    let days = (today - start).num_days();
    Week::saturating(days.div_euclid(7) + 1)
}

/// Default week offered for score entry.
///
/// The week played within the next six days, else the earliest week still
/// ahead, else the final week once the season has passed.
pub fn suggest_result_week(start: Option<NaiveDate>, today: NaiveDate) -> Week {
    let Some(start) = start else {
        return Week::FIRST;
    };
    let dated: Vec<(Week, i64)> = Week::all()
        .filter_map(|w| week_date(start, w.number()).map(|d| (w, (d - today).num_days())))
        .collect();

    dated
        .iter()
        .find(|(_, ahead)| (0..=6).contains(ahead))
        .or_else(|| dated.iter().find(|(_, ahead)| *ahead >= 0))
        .map_or(Week::LAST, |(w, _)| *w)
}

/// Which announcement an email preview is for, and the week it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailPhase {
    Intro,
    W1,
    W2,
    W3,
    W4,
    W5,
}

impl EmailPhase {
    /// The intro mail carries week-1 courts; the mail after week N carries week N+1.
    pub fn target_week(self) -> Week {
        let n = match self {
            EmailPhase::Intro => 1,
            EmailPhase::W1 => 2,
            EmailPhase::W2 => 3,
            EmailPhase::W3 => 4,
            EmailPhase::W4 => 5,
            EmailPhase::W5 => i64::from(REGULAR_SEASON_WEEKS),
        };
        Week::saturating(n)
    }
}

impl FromStr for EmailPhase {
    type Err = ParsePhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "intro" => Ok(EmailPhase::Intro),
            "w1" => Ok(EmailPhase::W1),
            "w2" => Ok(EmailPhase::W2),
            "w3" => Ok(EmailPhase::W3),
            "w4" => Ok(EmailPhase::W4),
            "w5" => Ok(EmailPhase::W5),
            _ => Err(ParsePhaseError(s.to_string())),
        }
    }
}
