//! JSON entry points for callers outside Rust (route handlers, PDF workers).
//!
//! Each function takes a request document and returns a response document or
//! an error message suitable for showing to the caller.

use serde::{Deserialize, Serialize};

use crate::engine::{build_assignments, credit_score, CourtAssignment, WeekOnePatch};
use crate::models::{check_points, CourtConfig, Player, PlayerResults, RecordedResult, ResultsHistory, Week, WeekResultRow};

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentRequest {
    pub schema_version: u8,
    pub week: i64,
    pub players: Vec<Player>,
    #[serde(default)]
    pub results: Vec<WeekResultRow>,
    #[serde(default)]
    pub enabled_courts: Vec<u32>,
    #[serde(default)]
    pub seed: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentResponse {
    pub schema_version: u8,
    pub week: Week,
    pub courts: Vec<CourtAssignment>,
}

/// One already-stored week for the player being scored.
#[derive(Debug, Clone, Deserialize)]
pub struct PriorWeek {
    pub week: i64,
    pub points: u8,
    #[serde(default)]
    pub was_substitute: bool,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreditRequest {
    pub schema_version: u8,
    pub week: i64,
    pub points: f64,
    #[serde(default)]
    pub was_substitute: bool,
    #[serde(default)]
    pub prior: Vec<PriorWeek>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreditResponse {
    pub schema_version: u8,
    pub week: Week,
    pub credited: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_one_patch: Option<WeekOnePatch>,
}

fn check_schema(version: u8) -> Result<(), String> {
    if version == SCHEMA_VERSION {
        Ok(())
    } else {
        Err(format!("Unsupported schema_version {version}, expected {SCHEMA_VERSION}"))
    }
}

pub fn build_assignments_json(request_json: &str) -> Result<String, String> {
    let request: AssignmentRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid assignment request: {e}"))?;
    check_schema(request.schema_version)?;

    let week = Week::new(request.week).map_err(|e| e.to_string())?;
    let history = ResultsHistory::from_rows(&request.results).map_err(|e| e.to_string())?;
    let config = CourtConfig { enabled_courts: request.enabled_courts, seed: request.seed };

    let response = AssignmentResponse {
        schema_version: SCHEMA_VERSION,
        week,
        courts: build_assignments(&request.players, &history, week, &config),
    };
    serde_json::to_string(&response).map_err(|e| format!("Failed to encode response: {e}"))
}

pub fn credit_score_json(request_json: &str) -> Result<String, String> {
    let request: CreditRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid credit request: {e}"))?;
    check_schema(request.schema_version)?;

    let week = Week::new(request.week).map_err(|e| e.to_string())?;
    let mut prior = PlayerResults::new();
    for entry in request.prior {
        let prior_week = Week::new(entry.week).map_err(|e| e.to_string())?;
        if prior.slot(prior_week).is_recorded() {
            return Err(format!("Duplicate prior result for week {prior_week}"));
        }
        let points = check_points(entry.points).map_err(|e| e.to_string())?;
        prior.set(
            prior_week,
            RecordedResult { points, was_substitute: entry.was_substitute, note: entry.note },
        );
    }

    let outcome = credit_score(request.points, request.was_substitute, &prior, week).map_err(|e| e.to_string())?;
    let response = CreditResponse {
        schema_version: SCHEMA_VERSION,
        week,
        credited: outcome.credited,
        week_one_patch: outcome.week_one_patch,
    };
    serde_json::to_string(&response).map_err(|e| format!("Failed to encode response: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assignments_round_trip() {
        let request = json!({
            "schema_version": 1,
            "week": 2,
            "players": [
                {"id": "a", "display_name": "Avery"},
                {"id": "b", "display_name": "Blake"},
                {"id": "c", "display_name": "Casey"},
                {"id": "d", "display_name": "Drew"},
                {"id": "e", "display_name": "Emery"}
            ],
            "results": [
                {"player_id": "e", "week": 1, "points": 60},
                {"player_id": "a", "week": 1, "points": 10}
            ],
            "enabled_courts": [2, 6]
        });

        let out = build_assignments_json(&request.to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed["week"], 2);
        assert_eq!(parsed["courts"][0]["court"], 6);
        assert_eq!(parsed["courts"][0]["players"][0]["display_name"], "Emery");
        assert_eq!(parsed["courts"][0]["players"][1]["display_name"], "Avery");
        assert_eq!(parsed["courts"][1]["court"], 2);
        assert_eq!(parsed["courts"][1]["players"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_assignments_reject_playoff_week() {
        let request = json!({"schema_version": 1, "week": 7, "players": []});
        let err = build_assignments_json(&request.to_string()).unwrap_err();
        assert!(err.contains("Invalid week"), "{err}");
    }

    #[test]
    fn test_schema_version_checked() {
        let request = json!({"schema_version": 9, "week": 1, "points": 10.0});
        let err = credit_score_json(&request.to_string()).unwrap_err();
        assert!(err.contains("schema_version"));
    }

    #[test]
    fn test_credit_with_week_one_patch() {
        let request = json!({
            "schema_version": 1,
            "week": 2,
            "points": 50,
            "prior": [{"week": 1, "points": 30, "was_substitute": true, "note": "Jordan"}]
        });

        let out = credit_score_json(&request.to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["credited"], 50);
        assert_eq!(parsed["week_one_patch"]["week"], 1);
        assert_eq!(parsed["week_one_patch"]["new_points"], 40);
        assert_eq!(parsed["week_one_patch"]["note_append"], "Adjusted to avg of W1 & W2");
    }

    #[test]
    fn test_assignments_reject_stored_points_over_max() {
        let request = json!({
            "schema_version": 1,
            "week": 2,
            "players": [{"id": "a", "display_name": "Avery"}],
            "results": [{"player_id": "a", "week": 1, "points": 250}]
        });
        let err = build_assignments_json(&request.to_string()).unwrap_err();
        assert!(err.contains("Invalid points: 250"), "{err}");
    }

    #[test]
    fn test_credit_rejects_prior_points_over_max() {
        let request = json!({
            "schema_version": 1,
            "week": 3,
            "points": 10,
            "was_substitute": true,
            "prior": [{"week": 1, "points": 200}]
        });
        let err = credit_score_json(&request.to_string()).unwrap_err();
        assert!(err.contains("Invalid points: 200"), "{err}");
    }

    #[test]
    fn test_credit_rejects_bad_points() {
        let request = json!({"schema_version": 1, "week": 3, "points": 90});
        let err = credit_score_json(&request.to_string()).unwrap_err();
        assert!(err.contains("between 0 and 72"));
    }
}
