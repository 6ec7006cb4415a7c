//! Error types returned by the engine and its hosts

use crate::session::SessionId;

/// Errors raised while constructing a board
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("board dimensions must be positive (height {height}, width {width}, win length {win_length})")]
    ZeroDimension {
        height: usize,
        width: usize,
        win_length: usize,
    },

    #[error("the number of tokens in a row required for victory ({win_length}) must not exceed either dimension of the board ({height}x{width})")]
    WinLengthTooLong {
        height: usize,
        width: usize,
        win_length: usize,
    },

    #[error("invalid position: {0}")]
    InvalidPosition(String),
}

/// A rejected move. The game state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("Invalid move, column {column} out of range. Columns must be between 0 and {}", .width - 1)]
    OutOfRange { column: usize, width: usize },

    #[error("Invalid move, column {column} full")]
    ColumnFull { column: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("No valid moves available")]
    NoValidMoves,
}

/// Errors surfaced by the session registry to transport adapters
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("unknown session {0}")]
    UnknownSession(SessionId),

    #[error("The game is over")]
    GameOver,

    #[error("No moves to undo")]
    NothingToUndo,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Search(#[from] SearchError),
}
