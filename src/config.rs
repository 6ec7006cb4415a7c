use crate::{
    error::ConfigError,
    game::GameState,
    grid::check_dimensions,
    search::Searcher,
    DEFAULT_DEPTH, DEFAULT_HEIGHT, DEFAULT_WIDTH, DEFAULT_WIN_LENGTH,
};

/// Board and search settings shared by the front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub height: usize,
    pub width: usize,
    pub win_length: usize,
    /// Search depth in plies
    pub depth: usize,
    /// Optional cap on positions visited per search
    pub node_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            win_length: DEFAULT_WIN_LENGTH,
            depth: DEFAULT_DEPTH,
            node_limit: None,
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_dimensions(self.height, self.width, self.win_length)
    }

    pub fn new_game(&self) -> Result<GameState, ConfigError> {
        GameState::new(self.height, self.width, self.win_length)
    }

    pub fn searcher(&self) -> Searcher {
        let searcher = Searcher::new(self.depth);
        match self.node_limit {
            Some(limit) => searcher.with_node_limit(limit),
            None => searcher,
        }
    }
}
