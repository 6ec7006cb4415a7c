//! Self-play survey of short openings
//!
//! Every sequence of `plies` opening moves is played out to the end by the
//! search engine on both sides, and the results are tallied. Games run in
//! parallel, each owned by a single worker.

use anyhow::Result;
use indicatif::*;
use log::info;
use rayon::prelude::*;

use std::time::Instant;

use crate::{
    config::Config,
    game::{GameResult, GameState},
    grid::Player,
    search::Searcher,
};

/// Tally of the survey's finished games
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurveySummary {
    pub openings: usize,
    pub a_wins: usize,
    pub b_wins: usize,
    pub draws: usize,
}

impl SurveySummary {
    fn record(mut self, result: GameResult) -> Self {
        self.openings += 1;
        match result {
            GameResult::Win(Player::A) => self.a_wins += 1,
            GameResult::Win(Player::B) => self.b_wins += 1,
            _ => self.draws += 1,
        }
        self
    }
}

pub struct Survey {
    config: Config,
    plies: usize,
    show_progress: bool,
}

impl Survey {
    pub fn new(config: Config, plies: usize) -> Self {
        Self {
            config,
            plies,
            show_progress: false,
        }
    }

    /// Draws a progress bar on the terminal while the survey runs
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Every position reachable in exactly `plies` moves, in ascending move
    /// order. Openings where the game ends early are left out.
    pub fn openings(&self) -> Result<Vec<GameState>> {
        let width = self.config.width;
        let mut openings = Vec::new();
        let mut moves = vec![0; self.plies];

        loop {
            if let Some(state) = self.replay(&moves)? {
                openings.push(state);
            }

            // advance to the next sequence, carrying the addition
            let mut digit = self.plies;
            loop {
                if digit == 0 {
                    return Ok(openings);
                }
                digit -= 1;
                moves[digit] += 1;
                if moves[digit] < width {
                    break;
                }
                moves[digit] = 0;
            }
        }
    }

    fn replay(&self, moves: &[usize]) -> Result<Option<GameState>> {
        let mut state = self.config.new_game()?;
        for &column in moves {
            match state.apply_move(column) {
                Ok(GameResult::Ongoing) => {}
                _ => return Ok(None),
            }
        }
        Ok(Some(state))
    }

    pub fn run(&self) -> Result<SurveySummary> {
        let start = Instant::now();
        let openings = self.openings()?;
        let searcher = self.config.searcher();

        let progress = if self.show_progress {
            ProgressBar::new(openings.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        progress.set_style(
            ProgressStyle::default_bar()
                .template("Surveying openings: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
                .progress_chars("█▓▒░  "),
        );

        let results = openings
            .into_par_iter()
            .map(|state| {
                let result = self_play(state, &searcher);
                progress.inc(1);
                result
            })
            .collect::<Result<Vec<_>>>()?;
        progress.finish();

        let summary = results
            .into_iter()
            .fold(SurveySummary::default(), SurveySummary::record);
        info!(
            "surveyed {} openings of {} plies in {}",
            summary.openings,
            self.plies,
            HumanDuration(start.elapsed())
        );
        Ok(summary)
    }
}

/// Lets the searcher play both sides until the game ends
pub fn self_play(mut state: GameState, searcher: &Searcher) -> Result<GameResult> {
    while !state.is_terminal() {
        let column = searcher.best_move(&state)?;
        state.apply_move(column)?;
    }
    Ok(match state.last_result() {
        GameResult::Ongoing => GameResult::Draw,
        result => result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> Config {
        Config {
            height: 4,
            width: 4,
            win_length: 3,
            depth: 2,
            node_limit: None,
        }
    }

    #[test]
    fn test_openings_enumerates_every_sequence() {
        assert_eq!(Survey::new(small_config(), 0).openings().unwrap().len(), 1);
        assert_eq!(Survey::new(small_config(), 1).openings().unwrap().len(), 4);
        assert_eq!(Survey::new(small_config(), 2).openings().unwrap().len(), 16);
    }

    #[test]
    fn test_openings_skip_finished_games() {
        // a 2-tall board fills a column in two plies
        let config = Config {
            height: 2,
            width: 2,
            win_length: 2,
            depth: 1,
            node_limit: None,
        };
        // after 0,0 the column is full and replaying 0 again fails; after
        // 0,1,0 player A has won vertically
        let openings = Survey::new(config, 3).openings().unwrap();
        assert!(openings.iter().all(|state| !state.is_terminal()));
        assert!(openings.len() < 8);
    }

    #[test]
    fn test_self_play_finishes() {
        let state = small_config().new_game().unwrap();
        let result = self_play(state, &Searcher::new(2)).unwrap();
        assert!(result.is_over());
    }

    #[test]
    fn test_run_tallies_every_opening() {
        let summary = Survey::new(small_config(), 1).run().unwrap();
        assert_eq!(summary.openings, 4);
        assert_eq!(summary.a_wins + summary.b_wins + summary.draws, 4);
    }
}
