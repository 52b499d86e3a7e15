use axum::{
    routing::{get, post},
    Router,
};
use std::sync::{Arc, Mutex};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

use chess_tutor_core::{
    BoardSession, JsonStore, MistralClient, Position, Tutor, TutorConfig, STARTING_FEN,
};

mod routes;

pub struct AppState {
    pub board: Mutex<BoardSession>,
    pub page: Mutex<routes::PageMessages>,
    pub tutor: Tutor,
    pub store: JsonStore,
}

impl AppState {
    /// State with the starting position already on the board.
    pub fn new(tutor: Tutor, store: JsonStore) -> Self {
        let board = BoardSession::with_position(Position::starting());

        Self {
            board: Mutex::new(board),
            page: Mutex::new(routes::PageMessages::with_fen(STARTING_FEN)),
            tutor,
            store,
        }
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/position", post(routes::load_position))
        .route("/reset", post(routes::reset))
        .route("/click/:square", post(routes::click_square))
        .route("/clear", post(routes::clear_selection))
        .route("/health", get(routes::health))
        .route("/analyze", post(routes::tutor::analyze_position))
        .route("/analyze-move", post(routes::tutor::analyze_move))
        .route("/sessions/save", post(routes::sessions::save_session))
        .route("/sessions/load", post(routes::sessions::load_session))
        .route("/challenges/launch", post(routes::sessions::launch_challenge))
        .nest_service("/static", ServeDir::new("crates/web/static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = TutorConfig::from_env();
    if config.api_key.is_none() {
        tracing::warn!("MISTRAL_API_KEY is not set; analysis requests will fail");
    }

    let client = MistralClient::new(&config).expect("Failed to create HTTP client");
    let store = JsonStore::new(&config.data_dir);
    let state = Arc::new(AppState::new(Tutor::new(client), store));

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .expect("Failed to bind address");

    info!("Server running at http://{}", config.addr);

    axum::serve(listener, app(state))
        .await
        .expect("Server error");
}
