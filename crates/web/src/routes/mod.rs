use askama::Template;
use askama_axum::IntoResponse;
use axum::{
    extract::{Path, State},
    response::Response,
    Form,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use chess_tutor_core::{Color, Selection, Square, STARTING_FEN};

use crate::AppState;

pub mod sessions;
pub mod tutor;

/// Text slots shown around the board, kept between requests.
#[derive(Debug, Clone, Default)]
pub struct PageMessages {
    pub fen_input: String,
    pub status: String,
    pub error: String,
    pub result: String,
    /// Destination of the last analyzed move
    pub highlight: Option<Square>,
}

impl PageMessages {
    pub fn with_fen(fen: &str) -> Self {
        Self {
            fen_input: fen.to_string(),
            ..Self::default()
        }
    }

    pub fn ok(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.error.clear();
    }

    pub fn fail(&mut self, error: impl ToString) {
        self.status.clear();
        self.error = error.to_string();
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct BoardTemplate {
    pub title: String,
    pub fen_input: String,
    pub turn: String,
    pub squares: Vec<SquareView>,
    pub status: String,
    pub error: String,
    pub result: String,
    pub pending_move: String,
    pub challenges: Vec<ChallengeView>,
    pub sessions: Vec<String>,
    pub progression: ProgressionView,
}

pub struct SquareView {
    pub name: String,
    pub class: String,
    pub glyph: String,
}

pub struct ChallengeView {
    pub id: String,
    pub label: String,
}

pub struct ProgressionView {
    pub sessions_total: u32,
    pub challenges_completed: u32,
    pub current_challenge: String,
    pub average_score: String,
}

#[derive(serde::Deserialize)]
pub struct PositionForm {
    pub fen: String,
}

/// Renders the whole page from current state.
pub fn render_page(state: &AppState) -> Response {
    let board = state.board.lock().unwrap();
    let page = state.page.lock().unwrap();

    let selection = board.selection();
    let (from, to) = match selection {
        Selection::Idle => (None, None),
        Selection::FromSelected { from, .. } => (Some(*from), None),
        Selection::MoveReady(mv) => (Some(mv.from), Some(mv.to)),
    };
    let targets: HashSet<Square> = board.legal_targets().into_iter().collect();

    let squares = Square::all()
        .map(|square| {
            let mut class = String::from(if square.is_light() { "square light" } else { "square dark" });
            if Some(square) == from {
                class.push_str(" move-from");
            }
            if Some(square) == to || Some(square) == page.highlight {
                class.push_str(" move-to");
            } else if targets.contains(&square) {
                class.push_str(" target");
            }

            let glyph = board
                .position()
                .and_then(|p| p.piece_at(square))
                .map(|p| p.symbol().to_string())
                .unwrap_or_default();

            SquareView {
                name: square.to_string(),
                class,
                glyph,
            }
        })
        .collect();

    let turn = match board.position().map(|p| p.side_to_move) {
        Some(Color::White) => "White to move",
        Some(Color::Black) => "Black to move",
        None => "No position loaded",
    };

    let challenges = state
        .store
        .challenges()
        .unwrap_or_default()
        .into_iter()
        .map(|c| ChallengeView {
            label: c.label(),
            id: c.id,
        })
        .collect();

    let progression = state.store.progression().unwrap_or_default();

    let template = BoardTemplate {
        title: "Chess Tutor".to_string(),
        fen_input: page.fen_input.clone(),
        turn: turn.to_string(),
        squares,
        status: page.status.clone(),
        error: page.error.clone(),
        result: page.result.clone(),
        pending_move: board
            .pending_move()
            .map(|m| m.to_string())
            .unwrap_or_default(),
        challenges,
        sessions: state.store.list_sessions().unwrap_or_default(),
        progression: ProgressionView {
            sessions_total: progression.sessions_total,
            challenges_completed: progression.challenges_completed,
            current_challenge: progression
                .current_challenge
                .unwrap_or_else(|| "None".to_string()),
            average_score: format!("{:.1}", progression.average_score),
        },
    };

    template.into_response()
}

pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    render_page(&state)
}

/// Loads the typed position; a bad string leaves the board alone.
///
/// Returns whether the board changed.
pub fn load_into_board(state: &AppState, fen: &str) -> bool {
    let mut board = state.board.lock().unwrap();
    let mut page = state.page.lock().unwrap();
    page.fen_input = fen.trim().to_string();

    match board.load(fen) {
        Ok(position) => {
            info!(fen = %position, "board reloaded");
            page.highlight = None;
            page.ok("Position loaded");
            true
        }
        Err(e) => {
            page.fail(format!("Invalid position: {}", e));
            false
        }
    }
}

pub async fn load_position(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PositionForm>,
) -> Response {
    load_into_board(&state, &form.fen);
    render_page(&state)
}

pub async fn reset(State(state): State<Arc<AppState>>) -> Response {
    load_into_board(&state, STARTING_FEN);
    render_page(&state)
}

pub async fn click_square(
    State(state): State<Arc<AppState>>,
    Path(square): Path<String>,
) -> Response {
    {
        let mut board = state.board.lock().unwrap();
        let mut page = state.page.lock().unwrap();
        match board.click(&square) {
            Ok(outcome) => {
                page.highlight = None;
                page.ok(outcome.to_string());
            }
            Err(e) => page.fail(e),
        }
    }
    render_page(&state)
}

pub async fn clear_selection(State(state): State<Arc<AppState>>) -> Response {
    {
        state.board.lock().unwrap().clear();
        let mut page = state.page.lock().unwrap();
        page.highlight = None;
        page.ok("");
    }
    render_page(&state)
}

pub async fn health() -> &'static str {
    "OK"
}
