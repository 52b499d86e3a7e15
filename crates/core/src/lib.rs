//! Chess Tutor Core Library
//!
//! Position parsing, a client-side move validator, two-click move selection,
//! and the tutor/persistence collaborators that sit around them.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod notation;
pub mod parser;
pub mod rules;
pub mod selection;
pub mod storage;
pub mod tutor;

pub use board::{Board, Color, Piece, Role, Square};
pub use config::TutorConfig;
pub use error::{Error, Result};
pub use notation::PlayedMove;
pub use parser::{parse_fen, ParseError, Position, STARTING_FEN};
pub use selection::{BoardSession, ClickOutcome, Selection, SelectionError};
pub use storage::JsonStore;
pub use tutor::{MistralClient, Tutor};

/// Basic position information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionInfo {
    pub piece_count: usize,
    pub side_to_move: Color,
    pub is_check: bool,
}

/// Summarizes a loaded position
pub fn analyze_position(position: &Position) -> PositionInfo {
    PositionInfo {
        piece_count: position.board.piece_count(),
        side_to_move: position.side_to_move,
        is_check: rules::is_in_check(&position.board, position.side_to_move),
    }
}
