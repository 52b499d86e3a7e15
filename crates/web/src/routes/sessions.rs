use axum::{extract::State, response::Response, Form};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use chess_tutor_core::storage::{Loaded, MoveRecord, SessionRecord};

use super::{load_into_board, render_page};
use crate::AppState;

// ============================================================================
// FORMS
// ============================================================================

#[derive(Deserialize)]
pub struct LoadSessionForm {
    #[serde(default)]
    pub file_name: Option<String>,
}

#[derive(Deserialize)]
pub struct ChallengeForm {
    #[serde(default)]
    pub id: String,
}

// ============================================================================
// HANDLERS
// ============================================================================

pub async fn save_session(State(state): State<Arc<AppState>>) -> Response {
    let record = {
        let board = state.board.lock().unwrap();
        let page = state.page.lock().unwrap();

        let mut record = SessionRecord::new(page.fen_input.clone());
        record.result = page.result.clone();
        record.status = page.status.clone();
        record.move_analysis = board.pending_move().ok().as_ref().map(MoveRecord::from);
        record
    };

    let saved = state.store.save(&record);

    let mut page = state.page.lock().unwrap();
    match saved {
        Ok(file_name) => page.ok(format!("Session saved: {}", file_name)),
        Err(e) => page.fail(format!("Could not save session: {}", e)),
    }
    drop(page);
    render_page(&state)
}

pub async fn load_session(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoadSessionForm>,
) -> Response {
    match state.store.load(form.file_name.as_deref()) {
        Ok(Loaded::Canceled) => {}
        Ok(Loaded::Record { record, file_name }) => {
            let loaded = record.fen.trim().is_empty() || load_into_board(&state, &record.fen);
            let mut page = state.page.lock().unwrap();
            page.fen_input = record.fen;
            page.result = record.result;
            if loaded {
                page.ok(format!("Session loaded: {}", file_name));
            }
        }
        Err(e) => state
            .page
            .lock()
            .unwrap()
            .fail(format!("Could not load session: {}", e)),
    }
    render_page(&state)
}

pub async fn launch_challenge(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ChallengeForm>,
) -> Response {
    let id = form.id.trim();
    if id.is_empty() {
        state.page.lock().unwrap().fail("Choose a challenge first.");
        return render_page(&state);
    }

    match state.store.challenge(id) {
        Ok(challenge) => {
            if !load_into_board(&state, &challenge.fen) {
                return render_page(&state);
            }
            if let Err(e) = state.store.record_session_start(Some(&challenge.id)) {
                warn!(error = %e, "could not update progression");
            }
            state
                .page
                .lock()
                .unwrap()
                .ok(format!("Challenge started: {}", challenge.title));
        }
        Err(e) => state.page.lock().unwrap().fail(e),
    }
    render_page(&state)
}
