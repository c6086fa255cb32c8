use thiserror::Error;

/// Errors surfaced by the duel engine and its collaborator boundaries.
///
/// Illegal control actions (e.g. `pause` while idle) are deliberately not
/// errors - the state machine ignores them and logs at debug level.
#[derive(Error, Debug, Clone)]
pub enum DuelError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Commentary unavailable: {0}")]
    CommentaryUnavailable(String),

    #[error("Score history is empty")]
    EmptyHistory,
}
