pub mod assignment;
pub mod average;
pub mod credit;
pub mod shuffle;

pub use assignment::{
    build_assignments, candidate_courts, order_players, CourtAssignment, MAX_DEFAULT_COURTS,
    PLAYERS_PER_COURT,
};
pub use average::{prior_average, prior_history, season_average};
pub use credit::{
    credit_score, validate_points, CreditOutcome, WeekOnePatch, NOTE_SEPARATOR, SUBSTITUTE_BAND,
    WEEK_ONE_ADJUSTED_NOTE,
};
pub use shuffle::{seed_hash, shuffle, SeededRng};
