//! JSON requests and responses for driving sessions over a text transport
//!
//! Each request is one JSON object tagged by `op`, mirroring the endpoints of
//! the web front end (`create_board`, `get_board`, `reset`, `undo_move`,
//! `get_best_move`, `make_move`) plus `close`. Responses carry an HTTP style
//! status code so that a web host can forward them unchanged.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    error::SessionError,
    game::GameResult,
    session::{SessionId, SessionStore},
    view::GameView,
};

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    CreateBoard {
        height: usize,
        width: usize,
        win: usize,
    },
    GetBoard {
        session: SessionId,
    },
    Reset {
        session: SessionId,
    },
    UndoMove {
        session: SessionId,
    },
    GetBestMove {
        session: SessionId,
    },
    MakeMove {
        session: SessionId,
        column: usize,
    },
    Close {
        session: SessionId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Response {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<GameView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GameResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Response {
    fn ok() -> Self {
        Self {
            status: STATUS_OK,
            ..Self::default()
        }
    }

    fn board(board: GameView) -> Self {
        Self {
            board: Some(board),
            ..Self::ok()
        }
    }

    fn error(status: u16, detail: String) -> Self {
        Self {
            status,
            detail: Some(detail),
            ..Self::default()
        }
    }
}

impl From<SessionError> for Response {
    fn from(err: SessionError) -> Self {
        let status = match err {
            SessionError::UnknownSession(_) => STATUS_NOT_FOUND,
            _ => STATUS_BAD_REQUEST,
        };
        Response::error(status, err.to_string())
    }
}

/// Runs one request against the store
pub fn handle(store: &mut SessionStore, request: Request) -> Response {
    debug!("handling {:?}", request);
    let response = match request {
        Request::CreateBoard { height, width, win } => {
            store.create(height, width, win).map(|(id, board)| Response {
                session: Some(id),
                ..Response::board(board)
            })
        }
        Request::GetBoard { session } => store.view(session).map(Response::board),
        Request::Reset { session } => store.reset(session).map(Response::board),
        Request::UndoMove { session } => store.undo_move(session).map(Response::board),
        Request::GetBestMove { session } => store.best_move(session).map(|column| Response {
            column: Some(column),
            ..Response::ok()
        }),
        Request::MakeMove { session, column } => {
            store
                .apply_move(session, column)
                .map(|(result, board)| Response {
                    result: Some(result),
                    ..Response::board(board)
                })
        }
        Request::Close { session } => store.close(session).map(|_| Response::ok()),
    };

    response.unwrap_or_else(Response::from)
}

/// Parses a request line, runs it and renders the response as one JSON line
pub fn handle_line(store: &mut SessionStore, line: &str) -> String {
    let response = match serde_json::from_str::<Request>(line) {
        Ok(request) => handle(store, request),
        Err(err) => {
            warn!("rejected malformed request: {}", err);
            Response::error(STATUS_BAD_REQUEST, format!("malformed request: {}", err))
        }
    };

    serde_json::to_string(&response).unwrap_or_else(|err| {
        format!(
            "{{\"status\":500,\"detail\":\"failed to encode response: {}\"}}",
            err
        )
    })
}
