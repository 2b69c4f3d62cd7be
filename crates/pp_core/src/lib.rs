//! # pp_core - League Court Assignment & Score Crediting Engine
//!
//! Pure functions over a league roster and its weekly results:
//!
//! - week-1 court groupings from a seeded, reproducible shuffle
//! - later weeks ranked by average before the target week, dealt onto courts
//!   from the highest number down
//! - substitute scores held to a band below the absent player's average, with
//!   the week-2 correction of a substitute-played week 1
//!
//! The engine does no I/O. Storage sits behind [`store::LeagueStore`], and
//! [`store::record_score`] is the workflow that reads, credits and writes.

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod season;
pub mod store;

pub use api::{build_assignments_json, credit_score_json, SCHEMA_VERSION};
pub use engine::{
    build_assignments, credit_score, prior_average, prior_history, season_average, shuffle,
    CourtAssignment, CreditOutcome, WeekOnePatch,
};
pub use error::{ParsePhaseError, RecordError, Result, ScoreError, StoreError};
pub use models::{
    CourtConfig, League, Player, PlayerId, PlayerResults, RecordedResult, ResultSlot,
    ResultsHistory, Week, WeekResultRow,
};
pub use season::{standings, suggest_result_week, upcoming_week, EmailPhase, StandingRow};
pub use store::{record_score, EntrySurface, LeagueSnapshot, LeagueStore, ScoreEntry, WriteMode};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
