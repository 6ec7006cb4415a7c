#[cfg(test)]
pub mod test {
    use anyhow::Result;

    use crate::{
        eval::evaluate, new_game, ConfigError, GameResult, GameState, Grid, MoveError, MoveKind,
        Player, Searcher,
    };

    // a fixed but irregular game on the standard board, no winner along the way
    const LONG_GAME: [usize; 12] = [3, 3, 2, 4, 4, 2, 5, 6, 0, 1, 6, 0];

    // 4x4 draw filled row by row: AABB / BBAA / AABB / BBAA from the bottom
    const DRAWN_GAME: [usize; 16] = [0, 2, 1, 3, 2, 0, 3, 1, 0, 2, 1, 3, 2, 0, 3, 1];

    #[test]
    pub fn config_error() -> Result<()> {
        assert!(matches!(
            new_game(3, 3, 4),
            Err(ConfigError::WinLengthTooLong { .. })
        ));
        Ok(())
    }

    #[test]
    pub fn valid_moves_match_fill_pointers() -> Result<()> {
        let mut state = GameState::new(3, 4, 3)?;
        for &column in [0, 0, 0, 2, 2, 2, 1].iter() {
            for c in 0..6 {
                let expected = c < 4 && state.grid().column_fill(c).is_some();
                assert_eq!(state.is_valid_move(c), expected);
            }
            state.apply_move(column)?;
        }
        assert_eq!(state.valid_moves(), vec![1, 3]);
        Ok(())
    }

    #[test]
    pub fn apply_move_bookkeeping() -> Result<()> {
        let mut state = GameState::new(6, 7, 4)?;
        for (i, &column) in LONG_GAME.iter().enumerate() {
            let fill = state.grid().column_fill(column);
            assert_eq!(state.apply_move(column)?, GameResult::Ongoing);
            assert_eq!(
                state.grid().column_fill(column).map_or(-1, |r| r as isize),
                fill.map_or(-1, |r| r as isize) - 1
            );
            assert_eq!(state.move_count(), i + 1);
        }

        let mut decided = GameState::from_moves(2, 2, 2, &[0, 1])?;
        let before = decided.clone();
        decided.apply_move(0)?;
        assert!(decided.undo_move());
        assert_eq!(decided, before);

        let mut column_full = GameState::from_moves(2, 3, 2, &[0, 0])?;
        let before = column_full.clone();
        assert_eq!(
            column_full.apply_move(0),
            Err(MoveError::ColumnFull { column: 0 })
        );
        assert_eq!(column_full, before);
        Ok(())
    }

    #[test]
    pub fn undo_round_trip() -> Result<()> {
        let fresh = GameState::new(6, 7, 4)?;
        let mut state = fresh.clone();
        let mut snapshots = vec![];

        for &column in LONG_GAME.iter() {
            snapshots.push(state.clone());
            state.apply_move(column)?;
        }
        while let Some(snapshot) = snapshots.pop() {
            assert!(state.undo_move());
            assert_eq!(state, snapshot);
        }
        assert_eq!(state, fresh);
        assert!(!state.undo_move());
        Ok(())
    }

    #[test]
    pub fn reset_matches_fresh_game() -> Result<()> {
        let mut state = GameState::from_moves(5, 6, 4, &[0, 1, 2, 3, 4, 5, 5, 5])?;
        state.reset();
        assert_eq!(state, GameState::new(5, 6, 4)?);

        let mut won = GameState::from_moves(4, 4, 4, &[0, 1, 0, 1, 0, 1, 0])?;
        assert_eq!(won.winner(), Some(Player::A));
        won.reset();
        assert_eq!(won, GameState::new(4, 4, 4)?);
        Ok(())
    }

    #[test]
    pub fn evaluation_is_antisymmetric() -> Result<()> {
        let mut state = GameState::new(6, 7, 4)?;
        for &column in LONG_GAME.iter() {
            state.apply_move(column)?;
            let grid = state.grid();
            assert_eq!(evaluate(&grid.swapped()), -evaluate(grid));
        }
        Ok(())
    }

    #[test]
    pub fn win_reported_once() -> Result<()> {
        // A completes the diagonal rising from the bottom right
        let moves = [3, 2, 2, 1, 1, 0, 1, 0, 0, 6, 0];
        let mut state = GameState::new(6, 7, 4)?;
        let mut wins = vec![];
        for &column in moves.iter() {
            if let GameResult::Win(player) = state.apply_move(column)? {
                wins.push(player);
            }
        }
        assert_eq!(wins, vec![Player::A]);
        assert_eq!(state.last_result(), GameResult::Win(Player::A));
        Ok(())
    }

    #[test]
    pub fn forced_win() -> Result<()> {
        // A holds columns 0-2 of the bottom row, B stacked up column 0
        let state = GameState::from_moves(4, 4, 4, &[0, 0, 1, 0, 2, 0])?;
        let report = Searcher::default().analyse(&state)?;
        assert_eq!(report.column, 3);
        assert_eq!(report.kind, MoveKind::ForcedWin);
        Ok(())
    }

    #[test]
    pub fn forced_block() -> Result<()> {
        let grid = Grid::from_rows(&["....", "....", "....", "BBB."], 4)?;
        let state = GameState::from_position(grid, Player::A);
        let report = Searcher::default().analyse(&state)?;
        assert_eq!(report.column, 3);
        assert_eq!(report.kind, MoveKind::ForcedBlock);
        Ok(())
    }

    #[test]
    pub fn draw() -> Result<()> {
        let mut state = GameState::new(4, 4, 4)?;
        let (last, opening) = DRAWN_GAME.split_last().unwrap();
        for &column in opening.iter() {
            assert_eq!(state.apply_move(column)?, GameResult::Ongoing);
        }
        assert_eq!(state.apply_move(*last)?, GameResult::Draw);
        assert!(state.is_terminal());
        assert_eq!(state.winner(), None);
        Ok(())
    }

    #[test]
    pub fn undo_after_two_moves() -> Result<()> {
        let mut state = GameState::new(6, 7, 4)?;
        state.apply_move(0)?;
        let after_first = state.clone();
        state.apply_move(1)?;
        assert!(state.undo_move());
        assert_eq!(state, after_first);
        Ok(())
    }

    #[test]
    pub fn blocks_open_two() -> Result<()> {
        // B has columns 2 and 3 of the bottom row with both ends open
        let state = GameState::from_moves(6, 7, 4, &[0, 2, 0, 3])?;
        let report = Searcher::new(4).analyse(&state)?;
        assert_eq!(report.kind, MoveKind::Minimax);
        assert_eq!(report.column, 4);
        Ok(())
    }
}
