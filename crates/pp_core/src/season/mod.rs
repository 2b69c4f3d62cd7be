//! Season bookkeeping around the engine: calendar, standings and gating.

pub mod schedule;
pub mod standings;

pub use schedule::{suggest_result_week, upcoming_week, week_date, EmailPhase};
pub use standings::{assignments_unlocked, missing_count, standings, StandingRow};
