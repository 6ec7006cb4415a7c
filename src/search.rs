//! An agent recommending moves by depth-limited game tree search

use crate::{
    error::SearchError,
    eval::evaluate,
    game::{GameResult, GameState},
    grid::Player,
    DEFAULT_DEPTH,
};

/// The value of a decided game, positive when player A wins
pub const WIN_SCORE: i32 = 1000;

/// How a recommended move was found
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum MoveKind {
    /// the move wins on the spot
    ForcedWin,
    /// the move takes the cell the opponent would win on
    ForcedBlock,
    Minimax,
    Fallback,
}

/// The outcome of a search
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchReport {
    pub column: usize,
    pub kind: MoveKind,
    /// The minimax value of the position, only set for [`MoveKind::Minimax`]
    pub score: Option<i32>,
    /// The number of positions visited (for diagnostics only)
    pub nodes: usize,
}

struct Budget {
    nodes: usize,
    limit: Option<usize>,
}

impl Budget {
    fn exhausted(&self) -> bool {
        self.limit.map_or(false, |limit| self.nodes >= limit)
    }
}

/// Minimax search with alpha-beta pruning
///
/// # Notes
/// Before searching, the agent takes an immediate win if one exists and
/// otherwise blocks the column the opponent could win in next turn. Only
/// then does it run a minimax search to a fixed depth, maximizing for player
/// A and minimizing for player B. Leaves are scored with [`evaluate`] and a
/// decided game scores [`WIN_SCORE`] signed by its winner.
///
/// Moves are always tried in ascending column order and the best move is
/// only replaced by a strictly better one, so ties go to the lowest column
/// and results are fully deterministic.
///
/// A `Searcher` holds no state between calls. Every hypothetical move is
/// played on a fork of the caller's [`GameState`], which is never mutated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Searcher {
    depth: usize,
    node_limit: Option<usize>,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl Searcher {
    /// Creates a `Searcher` looking `depth` plies ahead
    pub fn new(depth: usize) -> Self {
        Self {
            depth,
            node_limit: None,
        }
    }

    /// Caps the number of positions visited per search
    ///
    /// Once the budget runs out every remaining position is scored
    /// statically, so the search returns the best move found so far.
    pub fn with_node_limit(mut self, node_limit: usize) -> Self {
        self.node_limit = Some(node_limit);
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Recommends a column for the player to move
    pub fn best_move(&self, state: &GameState) -> Result<usize, SearchError> {
        Ok(self.analyse(state)?.column)
    }

    /// Recommends a column for the player to move, reporting how it was found
    pub fn analyse(&self, state: &GameState) -> Result<SearchReport, SearchError> {
        let moves = state.valid_moves();
        let first = *moves.first().ok_or(SearchError::NoValidMoves)?;
        let player = state.current_player();
        let mut budget = Budget {
            nodes: 0,
            limit: self.node_limit,
        };

        // check for a win for the current player on this move
        for &column in moves.iter() {
            budget.nodes += 1;
            let mut next = state.fork();
            if next.apply_move(column) == Ok(GameResult::Win(player)) {
                return Ok(SearchReport {
                    column,
                    kind: MoveKind::ForcedWin,
                    score: None,
                    nodes: budget.nodes,
                });
            }
        }

        // check for a next turn win for the opponent and take its cell
        for &column in moves.iter() {
            budget.nodes += 1;
            let mut next = state.fork();
            next.pass_turn();
            if next.apply_move(column) == Ok(GameResult::Win(player.other())) {
                return Ok(SearchReport {
                    column,
                    kind: MoveKind::ForcedBlock,
                    score: None,
                    nodes: budget.nodes,
                });
            }
        }

        let (score, best_move) = self.minimax(
            state,
            self.depth,
            player == Player::A,
            i32::MIN,
            i32::MAX,
            &mut budget,
        );

        Ok(match best_move {
            Some(column) => SearchReport {
                column,
                kind: MoveKind::Minimax,
                score: Some(score),
                nodes: budget.nodes,
            },
            None => SearchReport {
                column: first,
                kind: MoveKind::Fallback,
                score: None,
                nodes: budget.nodes,
            },
        })
    }

    /// Performs game tree search
    ///
    /// Returns the value of the position and the move achieving it, `None`
    /// at a leaf.
    fn minimax(
        &self,
        state: &GameState,
        depth: usize,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
        budget: &mut Budget,
    ) -> (i32, Option<usize>) {
        budget.nodes += 1;

        let moves = state.valid_moves();
        // the root always expands so that a move is found even on a spent budget
        if depth == 0 || moves.is_empty() || (depth < self.depth && budget.exhausted()) {
            return (evaluate(state.grid()), None);
        }

        let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
        let mut best_move = None;

        for column in moves {
            let mut next = state.fork();
            let result = match next.apply_move(column) {
                Ok(result) => result,
                Err(_) => continue,
            };

            let score = match result {
                GameResult::Win(Player::A) => WIN_SCORE,
                GameResult::Win(Player::B) => -WIN_SCORE,
                GameResult::Draw => 0,
                GameResult::Ongoing => {
                    self.minimax(&next, depth - 1, !maximizing, alpha, beta, budget)
                        .0
                }
            };

            // nothing beats winning outright
            if result == GameResult::Win(state.current_player()) {
                return (score, Some(column));
            }

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(column);
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(column);
                }
                beta = beta.min(score);
            }

            // the opponent will never allow this line, prune the remaining moves
            if beta <= alpha {
                break;
            }
        }

        (best_score, best_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_valid_moves() {
        let grid = crate::grid::Grid::from_rows(&["AB", "BA"], 2).unwrap();
        let state = GameState::from_position(grid, Player::A);
        assert!(state.valid_moves().is_empty());
        assert_eq!(
            Searcher::default().best_move(&state),
            Err(SearchError::NoValidMoves)
        );
    }

    #[test]
    fn test_ties_go_to_lowest_column() {
        // one ply deep on an empty board, both corner columns score 3
        let state = GameState::new(4, 4, 4).unwrap();
        let report = Searcher::new(1).analyse(&state).unwrap();
        assert_eq!(report.kind, MoveKind::Minimax);
        assert_eq!(report.column, 0);
        assert_eq!(report.score, Some(3));
    }

    #[test]
    fn test_finds_three_ply_win() {
        // A on the bottom row with room on both sides: doubling it up in
        // column 2 makes two threats at once
        let state = GameState::from_moves(3, 5, 3, &[1, 1]).unwrap();
        let report = Searcher::new(3).analyse(&state).unwrap();
        assert_eq!(report.kind, MoveKind::Minimax);
        assert_eq!(report.column, 2);
        assert_eq!(report.score, Some(WIN_SCORE));
    }

    #[test]
    fn test_minimizes_for_player_b() {
        // mirror of the position above with B to move
        let grid = crate::grid::Grid::from_rows(&[".....", ".A...", ".B..."], 3).unwrap();
        let state = GameState::from_position(grid, Player::B);
        let report = Searcher::new(3).analyse(&state).unwrap();
        assert_eq!(report.column, 2);
        assert_eq!(report.score, Some(-WIN_SCORE));
    }

    #[test]
    fn test_forced_win_before_block() {
        // both sides have three on a row, A to move
        let state = GameState::from_moves(4, 4, 4, &[0, 0, 1, 1, 2, 2]).unwrap();
        let report = Searcher::default().analyse(&state).unwrap();
        assert_eq!(report.kind, MoveKind::ForcedWin);
        assert_eq!(report.column, 3);
    }

    #[test]
    fn test_node_limit_still_moves() {
        let state = GameState::new(6, 7, 4).unwrap();
        let report = Searcher::new(8).with_node_limit(1).analyse(&state).unwrap();
        assert!(state.is_valid_move(report.column));
        // the root expands each column once
        assert_eq!(report.nodes, 2 * 7 + 1 + 7);
    }

    #[test]
    fn test_search_leaves_state_untouched() {
        let state = GameState::from_moves(6, 7, 4, &[3, 3, 4, 2]).unwrap();
        let before = state.clone();
        let first = Searcher::new(4).best_move(&state).unwrap();
        let second = Searcher::new(4).best_move(&state).unwrap();
        assert_eq!(state, before);
        assert_eq!(first, second);
    }
}
