//! A registry of games for hosts that serve more than one player

use log::{debug, info};

use std::collections::HashMap;

use crate::{
    error::SessionError,
    game::{GameResult, GameState},
    search::Searcher,
    view::GameView,
};

/// Identifies a game held by a [`SessionStore`]
pub type SessionId = u64;

/// Owns every live game, keyed by session id
///
/// Mutating calls take `&mut self`, so a host sharing the store between
/// requests has to serialize them, which gives each game exclusive access
/// for the duration of a call.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: HashMap<SessionId, GameState>,
    next_id: SessionId,
    searcher: Searcher,
}

impl SessionStore {
    pub fn new(searcher: Searcher) -> Self {
        Self {
            sessions: HashMap::new(),
            next_id: 0,
            searcher,
        }
    }

    /// Starts a game in a new session
    pub fn create(
        &mut self,
        height: usize,
        width: usize,
        win_length: usize,
    ) -> Result<(SessionId, GameView), SessionError> {
        let game = GameState::new(height, width, win_length)?;
        let id = self.next_id;
        self.next_id += 1;

        info!(
            "session {}: new {}x{} board, {} in a row to win",
            id, height, width, win_length
        );
        let view = game.view();
        self.sessions.insert(id, game);
        Ok((id, view))
    }

    pub fn view(&self, id: SessionId) -> Result<GameView, SessionError> {
        Ok(self.game(id)?.view())
    }

    /// Plays a column for the player to move. Finished games accept no
    /// further moves.
    pub fn apply_move(
        &mut self,
        id: SessionId,
        column: usize,
    ) -> Result<(GameResult, GameView), SessionError> {
        let game = self.game_mut(id)?;
        if game.is_terminal() {
            return Err(SessionError::GameOver);
        }

        let player = game.current_player();
        let result = game.apply_move(column)?;
        debug!(
            "session {}: player {} played column {} ({:?})",
            id, player, column, result
        );
        Ok((result, game.view()))
    }

    pub fn undo_move(&mut self, id: SessionId) -> Result<GameView, SessionError> {
        let game = self.game_mut(id)?;
        if !game.undo_move() {
            return Err(SessionError::NothingToUndo);
        }
        debug!("session {}: move undone, {} left", id, game.move_count());
        Ok(game.view())
    }

    pub fn reset(&mut self, id: SessionId) -> Result<GameView, SessionError> {
        let game = self.game_mut(id)?;
        game.reset();
        debug!("session {}: reset", id);
        Ok(game.view())
    }

    /// Recommends a column for the player to move without playing it
    pub fn best_move(&self, id: SessionId) -> Result<usize, SessionError> {
        let report = self.searcher.analyse(self.game(id)?)?;
        debug!(
            "session {}: best move {} ({:?}, score {:?}, {} nodes)",
            id, report.column, report.kind, report.score, report.nodes
        );
        Ok(report.column)
    }

    /// Drops a session and its game
    pub fn close(&mut self, id: SessionId) -> Result<(), SessionError> {
        self.sessions
            .remove(&id)
            .map(|_| info!("session {}: closed", id))
            .ok_or(SessionError::UnknownSession(id))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn game(&self, id: SessionId) -> Result<&GameState, SessionError> {
        self.sessions.get(&id).ok_or(SessionError::UnknownSession(id))
    }

    fn game_mut(&mut self, id: SessionId) -> Result<&mut GameState, SessionError> {
        self.sessions
            .get_mut(&id)
            .ok_or(SessionError::UnknownSession(id))
    }
}
