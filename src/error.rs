//! Error types for the engine and its configuration

use crate::board::{Outcome, BOARD_SIZE};

/// Errors raised when a move or cell write is rejected.
///
/// Every variant is detected before the board, frontier or hash is touched,
/// so a rejected call never leaves partial state behind.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GomokuError {
    /// Coordinates outside `[0, BOARD_SIZE)`
    #[error("move ({row}, {col}) is outside the {size}x{size} board", size = BOARD_SIZE)]
    OutOfBounds { row: i32, col: i32 },

    /// Target cell already holds a stone
    #[error("cell ({row}, {col}) is already occupied")]
    OccupiedCell { row: i32, col: i32 },

    /// Raw cell state outside {-1, 0, 1}; only an internal bug produces this
    #[error("invalid cell state {0}, expected -1, 0 or 1")]
    InvalidState(i8),

    /// The frontier held no playable cell for the search
    #[error("no candidate moves available")]
    NoCandidates,

    /// A move was submitted after the game ended
    #[error("game is already over: {0:?}")]
    GameOver(Outcome),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, GomokuError>;

/// Errors raised while building an [`EngineConfig`](crate::config::EngineConfig).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment override could not be parsed
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },

    /// Search depth of zero would never produce a move
    #[error("search depth must be at least 1")]
    ZeroDepth,

    /// Candidate limit of zero would never produce a move
    #[error("candidate limit must be at least 1")]
    ZeroCandidates,
}
