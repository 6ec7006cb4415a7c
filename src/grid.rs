//! Board geometry and storage

use serde::Serialize;

use std::fmt;

use crate::error::ConfigError;

/// One of the two sides of the game. `A` always moves first.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Serialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// The token this player drops into the grid
    pub fn token(self) -> Cell {
        match self {
            Player::A => Cell::TokenA,
            Player::B => Cell::TokenB,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => write!(f, "A"),
            Player::B => write!(f, "B"),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Serialize)]
pub enum Cell {
    Empty,
    TokenA,
    TokenB,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        match self {
            Cell::Empty => true,
            _ => false,
        }
    }

    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::TokenA => Some(Player::A),
            Cell::TokenB => Some(Player::B),
        }
    }

    fn swapped(self) -> Self {
        match self {
            Cell::Empty => Cell::Empty,
            Cell::TokenA => Cell::TokenB,
            Cell::TokenB => Cell::TokenA,
        }
    }
}

/// The four line orientations as (row step, column step): horizontal,
/// vertical, diagonal down-right and diagonal down-left
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A fixed-size connect-N board
///
/// Row 0 is the top of the board and row `height - 1` the bottom, where
/// tokens land first. Each column keeps a fill pointer holding the next free
/// row, counting up from the bottom; `-1` marks a full column.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    height: usize,
    width: usize,
    win_length: usize,
    cells: Vec<Cell>, // row-major, top row first
    column_fill: Vec<isize>,
}

impl Grid {
    /// Creates an empty grid
    ///
    /// Fails if a dimension is zero or if `win_length` exceeds the height or
    /// the width of the board.
    pub fn new(height: usize, width: usize, win_length: usize) -> Result<Self, ConfigError> {
        check_dimensions(height, width, win_length)?;

        Ok(Self {
            height,
            width,
            win_length,
            cells: vec![Cell::Empty; height * width],
            column_fill: vec![height as isize - 1; width],
        })
    }

    /// Builds a grid from text rows, top row first
    ///
    /// `.` is an empty cell, `A` and `B` are the players' tokens. Every
    /// token must rest on the bottom or on another token.
    pub fn from_rows<S: AsRef<str>>(rows: &[S], win_length: usize) -> Result<Self, ConfigError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        let mut grid = Self::new(height, width, win_length)?;

        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            if line.chars().count() != width {
                return Err(ConfigError::InvalidPosition(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    line.chars().count(),
                    width
                )));
            }
            for (column, symbol) in line.chars().enumerate() {
                grid.cells[row * width + column] = match symbol {
                    '.' => Cell::Empty,
                    'A' => Cell::TokenA,
                    'B' => Cell::TokenB,
                    _ => {
                        return Err(ConfigError::InvalidPosition(format!(
                            "could not parse '{}' as a cell",
                            symbol
                        )))
                    }
                };
            }
        }

        for column in 0..width {
            let empty = (0..height)
                .take_while(|&row| grid.get(row, column).is_empty())
                .count();
            if (empty..height).any(|row| grid.get(row, column).is_empty()) {
                return Err(ConfigError::InvalidPosition(format!(
                    "column {} has a floating token",
                    column
                )));
            }
            grid.column_fill[column] = empty as isize - 1;
        }

        Ok(grid)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    pub fn get(&self, row: usize, column: usize) -> Cell {
        self.cells[row * self.width + column]
    }

    /// All cells in row-major order, top row first
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The next free row of a column, or `None` if the column is full or
    /// does not exist
    pub fn column_fill(&self, column: usize) -> Option<usize> {
        match self.column_fill.get(column) {
            Some(&row) if row >= 0 => Some(row as usize),
            _ => None,
        }
    }

    pub fn is_valid_move(&self, column: usize) -> bool {
        self.column_fill(column).is_some()
    }

    /// Valid columns in ascending order
    pub fn valid_moves(&self) -> Vec<usize> {
        (0..self.width).filter(|&c| self.is_valid_move(c)).collect()
    }

    pub fn is_full(&self) -> bool {
        self.column_fill.iter().all(|&row| row < 0)
    }

    /// Drops a token into a column, returning the row it landed on.
    /// The caller checks the column first.
    pub(crate) fn drop_token(&mut self, column: usize, token: Cell) -> usize {
        let row = self.column_fill[column] as usize;
        self.cells[row * self.width + column] = token;
        self.column_fill[column] -= 1;
        row
    }

    /// Steps from `(row, column)` along a direction, returning the cell
    /// position if it stays on the board
    pub fn offset(
        &self,
        row: usize,
        column: usize,
        (dr, dc): (isize, isize),
        steps: isize,
    ) -> Option<(usize, usize)> {
        let r = row as isize + dr * steps;
        let c = column as isize + dc * steps;
        if r < 0 || c < 0 || r >= self.height as isize || c >= self.width as isize {
            None
        } else {
            Some((r as usize, c as usize))
        }
    }

    /// Length of the run of equal tokens through `(row, column)` along a
    /// direction, counted both ways. An empty cell has no run.
    pub fn line_length(&self, row: usize, column: usize, direction: (isize, isize)) -> usize {
        let token = self.get(row, column);
        if token.is_empty() {
            return 0;
        }

        let mut count = 1;
        for &sign in [1isize, -1].iter() {
            let mut steps = sign;
            while let Some((r, c)) = self.offset(row, column, direction, steps) {
                if self.get(r, c) != token {
                    break;
                }
                count += 1;
                steps += sign;
            }
        }
        count
    }

    /// The owner of a winning line through `(row, column)`, if any
    pub fn winner_at(&self, row: usize, column: usize) -> Option<Player> {
        let owner = self.get(row, column).owner()?;
        if DIRECTIONS
            .iter()
            .any(|&direction| self.line_length(row, column, direction) >= self.win_length)
        {
            Some(owner)
        } else {
            None
        }
    }

    /// Empties every cell
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = Cell::Empty;
        }
        for fill in self.column_fill.iter_mut() {
            *fill = self.height as isize - 1;
        }
    }

    /// The same position with the two players' tokens exchanged
    pub fn swapped(&self) -> Self {
        let mut grid = self.clone();
        for cell in grid.cells.iter_mut() {
            *cell = cell.swapped();
        }
        grid
    }
}

pub(crate) fn check_dimensions(height: usize, width: usize, win_length: usize) -> Result<(), ConfigError> {
    if height == 0 || width == 0 || win_length == 0 {
        return Err(ConfigError::ZeroDimension {
            height,
            width,
            win_length,
        });
    }
    if win_length > height || win_length > width {
        return Err(ConfigError::WinLengthTooLong {
            height,
            width,
            win_length,
        });
    }
    Ok(())
}
