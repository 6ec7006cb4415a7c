//! Static evaluation of board positions

use crate::grid::{Cell, Grid, DIRECTIONS};

/// Score of a window completely filled by one player
pub const FULL_LINE_SCORE: i32 = 1000;

/// Scores a window holding `occupied` tokens of a single player
pub fn window_score(occupied: usize, win_length: usize) -> i32 {
    if occupied == 0 {
        0
    } else if occupied == win_length {
        FULL_LINE_SCORE
    } else {
        match occupied {
            1 => 1,
            2 => 10,
            _ => 50,
        }
    }
}

/// Evaluates a position from player A's point of view
///
/// Every run of `win_length` cells along the four line orientations is a
/// window. A window holding tokens of both players is dead and scores
/// nothing; otherwise it scores by how many tokens the single player present
/// has in it, positive for A and negative for B. Swapping every token
/// negates the score.
pub fn evaluate(grid: &Grid) -> i32 {
    let win_length = grid.win_length() as isize;
    let mut score = 0;

    for &direction in DIRECTIONS.iter() {
        for row in 0..grid.height() {
            for column in 0..grid.width() {
                // skip windows that would leave the board
                if grid
                    .offset(row, column, direction, win_length - 1)
                    .is_none()
                {
                    continue;
                }

                let (mut a, mut b) = (0, 0);
                for step in 0..win_length {
                    if let Some((r, c)) = grid.offset(row, column, direction, step) {
                        match grid.get(r, c) {
                            Cell::TokenA => a += 1,
                            Cell::TokenB => b += 1,
                            Cell::Empty => {}
                        }
                    }
                }

                if a > 0 && b > 0 {
                    continue;
                }
                score += window_score(a, grid.win_length());
                score -= window_score(b, grid.win_length());
            }
        }
    }
    score
}
