//! The game state machine: move application, win and draw detection and
//! undo history

use serde::Serialize;

use crate::error::{ConfigError, MoveError};
use crate::grid::{Grid, Player};

/// The outcome of applying a move
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Serialize)]
pub enum GameResult {
    Ongoing,
    Win(Player),
    Draw,
}

impl GameResult {
    pub fn is_over(self) -> bool {
        match self {
            GameResult::Ongoing => false,
            _ => true,
        }
    }
}

// everything undo needs to restore the position before a move
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Snapshot {
    grid: Grid,
    current_player: Player,
    last_result: GameResult,
}

/// A game in progress
///
/// Mutated only through [`apply_move`], [`undo_move`] and [`reset`]. Cloning
/// copies the whole state, history included; [`fork`] gives the cheaper
/// history-less copy used to explore hypothetical continuations.
///
/// [`apply_move`]: #method.apply_move
/// [`undo_move`]: #method.undo_move
/// [`reset`]: #method.reset
/// [`fork`]: #method.fork
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    grid: Grid,
    current_player: Player,
    last_result: GameResult,
    history: Vec<Snapshot>,
}

impl GameState {
    /// Starts a new game on an empty board, player A to move
    pub fn new(height: usize, width: usize, win_length: usize) -> Result<Self, ConfigError> {
        Ok(Self::from_position(Grid::new(height, width, win_length)?, Player::A))
    }

    /// Starts from an arbitrary position with no history
    pub fn from_position(grid: Grid, current_player: Player) -> Self {
        let last_result = if grid.is_full() {
            GameResult::Draw
        } else {
            GameResult::Ongoing
        };
        Self {
            grid,
            current_player,
            last_result,
            history: Vec::new(),
        }
    }

    /// Replays a sequence of columns from the empty board
    pub fn from_moves(
        height: usize,
        width: usize,
        win_length: usize,
        columns: &[usize],
    ) -> anyhow::Result<Self> {
        let mut state = Self::new(height, width, win_length)?;
        for &column in columns {
            state.apply_move(column)?;
        }
        Ok(state)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// The result of the most recent move, `Ongoing` on a fresh board
    pub fn last_result(&self) -> GameResult {
        self.last_result
    }

    /// Number of moves that can be undone
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    pub fn is_terminal(&self) -> bool {
        self.last_result.is_over() || self.grid.is_full()
    }

    pub fn winner(&self) -> Option<Player> {
        match self.last_result {
            GameResult::Win(player) => Some(player),
            _ => None,
        }
    }

    pub fn is_valid_move(&self, column: usize) -> bool {
        self.grid.is_valid_move(column)
    }

    pub fn valid_moves(&self) -> Vec<usize> {
        self.grid.valid_moves()
    }

    /// Drops the current player's token into `column`
    ///
    /// On success the previous state is pushed onto the history and the
    /// turn passes to the opponent unless the move ended the game. An
    /// invalid column leaves the state untouched.
    pub fn apply_move(&mut self, column: usize) -> Result<GameResult, MoveError> {
        if column >= self.grid.width() {
            return Err(MoveError::OutOfRange {
                column,
                width: self.grid.width(),
            });
        }
        if !self.grid.is_valid_move(column) {
            return Err(MoveError::ColumnFull { column });
        }

        self.history.push(Snapshot {
            grid: self.grid.clone(),
            current_player: self.current_player,
            last_result: self.last_result,
        });

        let row = self.grid.drop_token(column, self.current_player.token());
        let result = if let Some(winner) = self.grid.winner_at(row, column) {
            GameResult::Win(winner)
        } else if self.grid.is_full() {
            GameResult::Draw
        } else {
            GameResult::Ongoing
        };

        if !result.is_over() {
            self.current_player = self.current_player.other();
        }
        self.last_result = result;
        Ok(result)
    }

    /// Takes back the most recent move. Returns false if there is nothing
    /// to undo.
    pub fn undo_move(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                self.grid = snapshot.grid;
                self.current_player = snapshot.current_player;
                self.last_result = snapshot.last_result;
                true
            }
            None => false,
        }
    }

    /// Returns to the empty board with player A to move
    pub fn reset(&mut self) {
        self.grid.clear();
        self.history.clear();
        self.current_player = Player::A;
        self.last_result = GameResult::Ongoing;
    }

    /// An independent copy of the position without the undo history
    pub fn fork(&self) -> Self {
        Self {
            grid: self.grid.clone(),
            current_player: self.current_player,
            last_result: self.last_result,
            history: Vec::new(),
        }
    }

    /// Hands the turn to the other player without placing a token
    pub(crate) fn pass_turn(&mut self) {
        self.current_player = self.current_player.other();
    }
}
