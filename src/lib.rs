//! An engine for 'Connect N', the gravity-drop game of Connect 4 played on
//! any board size with any winning line length
//!
//! The engine tracks the game with full undo history and recommends moves
//! with a depth-limited minimax search using alpha-beta pruning.
//!
//! # Basic Usage
//!
//! ```
//! use connect_n::{GameResult, GameState, Player, Searcher};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut game = GameState::new(6, 7, 4)?;
//! for &column in [0, 6, 1, 6, 2, 5].iter() {
//!     game.apply_move(column)?;
//! }
//!
//! let best_move = Searcher::default().best_move(&game)?;
//! assert_eq!(best_move, 3);
//! assert_eq!(game.apply_move(best_move)?, GameResult::Win(Player::A));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod grid;

pub mod game;

pub mod eval;

pub mod search;

pub mod view;

pub mod config;

pub mod session;

pub mod protocol;

pub mod survey;

mod test;

pub use config::Config;
pub use error::{ConfigError, MoveError, SearchError, SessionError};
pub use game::{GameResult, GameState};
pub use grid::{Cell, Grid, Player};
pub use search::{MoveKind, SearchReport, Searcher};
pub use view::GameView;

/// The default height of the game board in tiles
pub const DEFAULT_HEIGHT: usize = 6;

/// The default width of the game board in tiles
pub const DEFAULT_WIDTH: usize = 7;

/// The default number of tokens in a row needed to win
pub const DEFAULT_WIN_LENGTH: usize = 4;

/// The default search depth in plies
pub const DEFAULT_DEPTH: usize = 8;

// the default board must be winnable
const_assert!(DEFAULT_WIN_LENGTH <= DEFAULT_HEIGHT);
const_assert!(DEFAULT_WIN_LENGTH <= DEFAULT_WIDTH);
const_assert!(DEFAULT_DEPTH > 0);

/// Starts a new game, player A to move
pub fn new_game(height: usize, width: usize, win_length: usize) -> Result<GameState, ConfigError> {
    GameState::new(height, width, win_length)
}

/// A read-only snapshot of a game
pub fn state(game: &GameState) -> GameView {
    game.view()
}

pub fn apply_move(game: &mut GameState, column: usize) -> Result<GameResult, MoveError> {
    game.apply_move(column)
}

pub fn undo_move(game: &mut GameState) -> bool {
    game.undo_move()
}

pub fn reset_game(game: &mut GameState) {
    game.reset()
}

/// Recommends a move with a search of the default depth
pub fn best_move(game: &GameState) -> Result<usize, SearchError> {
    Searcher::default().best_move(game)
}
