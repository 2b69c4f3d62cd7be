pub mod league;
pub mod player;
pub mod results;

pub use league::{CourtConfig, League, FALLBACK_SEED};
pub use player::{Player, PlayerId};
pub use results::{
    check_points, PlayerResults, RecordedResult, ResultSlot, ResultsHistory, Week, WeekResultRow, MAX_POINTS,
    REGULAR_SEASON_WEEKS,
};
