use thiserror::Error;

use crate::models::PlayerId;

/// Rejections raised while validating or crediting a weekly score.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    #[error("Invalid points: {0}. Enter a score between 0 and 72")]
    InvalidPoints(f64),

    #[error("Invalid week: {0}. Regular-season weeks are 1-6")]
    InvalidWeek(i64),

    #[error("Duplicate result for player {player} in week {week}")]
    DuplicateResult { player: PlayerId, week: u8 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown email phase '{0}'. Expected intro or w1-w5")]
pub struct ParsePhaseError(pub String);

/// Failures reported by a [`crate::store::LeagueStore`] implementation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("League not found: {0}")]
    LeagueNotFound(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("Result already exists for player {player} in week {week}")]
    Conflict { player: PlayerId, week: u8 },
}

/// Errors from the score-recording workflow.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error(transparent)]
    Score(#[from] ScoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("A score for week {week} is already submitted for player {player}")]
    AlreadyRecorded { player: PlayerId, week: u8 },
}

impl RecordError {
    /// Whether the caller can fix the request and try again.
    pub fn is_user_error(&self) -> bool {
        match self {
            RecordError::Score(_) => true,
            RecordError::AlreadyRecorded { .. } => true,
            RecordError::Store(StoreError::Conflict { .. }) => true,
            RecordError::Store(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoreError>;
