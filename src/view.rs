//! A read-only projection of a game for hosts to serialize

use serde::Serialize;

use crate::{
    game::{GameResult, GameState},
    grid::{Cell, Player},
};

/// Bumped whenever a field of [`GameView`] changes meaning
pub const VIEW_VERSION: u32 = 1;

/// Everything a front end needs to draw a game, detached from the game itself
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameView {
    pub version: u32,
    pub height: usize,
    pub width: usize,
    pub win_length: usize,
    /// Row-major, top row first
    pub cells: Vec<Cell>,
    pub current_player: Player,
    pub is_game_over: bool,
    pub winner: Option<Player>,
    pub last_result: GameResult,
    /// Moves played since the last reset
    pub moves: usize,
}

impl From<&GameState> for GameView {
    fn from(state: &GameState) -> Self {
        let grid = state.grid();
        Self {
            version: VIEW_VERSION,
            height: grid.height(),
            width: grid.width(),
            win_length: grid.win_length(),
            cells: grid.cells().to_vec(),
            current_player: state.current_player(),
            is_game_over: state.is_terminal(),
            winner: state.winner(),
            last_result: state.last_result(),
            moves: state.move_count(),
        }
    }
}

impl GameState {
    pub fn view(&self) -> GameView {
        GameView::from(self)
    }
}
