use axum::{extract::State, response::Response};
use std::sync::Arc;
use tracing::info;

use chess_tutor_core::notation::destination_of;
use chess_tutor_core::{BoardSession, PlayedMove, SelectionError};

use super::render_page;
use crate::AppState;

// ============================================================================
// HANDLERS
// ============================================================================

/// Explains the position currently typed in the FEN box.
pub async fn analyze_position(State(state): State<Arc<AppState>>) -> Response {
    let fen = state.page.lock().unwrap().fen_input.clone();
    info!("Position analysis requested");

    let answer = state.tutor.explain_position(&fen).await;

    {
        let mut page = state.page.lock().unwrap();
        match answer {
            Ok(text) => {
                page.result = text;
                page.ok("OK");
            }
            Err(e) => page.fail(e),
        }
    }
    render_page(&state)
}

/// Critiques the move selected on the board.
pub async fn analyze_move(State(state): State<Arc<AppState>>) -> Response {
    let pending = pending_move(&state.board.lock().unwrap());

    let (fen, played) = match pending {
        Ok(pending) => pending,
        Err(e) => {
            state.page.lock().unwrap().fail(e);
            return render_page(&state);
        }
    };
    info!(%played, "Move analysis requested");

    let answer = state.tutor.explain_move(&fen, &played).await;

    {
        let mut page = state.page.lock().unwrap();
        match answer {
            Ok(text) => {
                page.result = text;
                page.highlight = destination_of(&played.text());
                page.ok("OK");
            }
            Err(e) => page.fail(e),
        }
    }
    render_page(&state)
}

/// Position string and finished move, taken together so they match.
fn pending_move(board: &BoardSession) -> Result<(String, PlayedMove), SelectionError> {
    let played = board.pending_move()?;
    let fen = board
        .position()
        .map(|p| p.fen())
        .ok_or(SelectionError::NoPosition)?;
    Ok((fen, played))
}
