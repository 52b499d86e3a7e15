//! Per-board interaction context

use tracing::{debug, info};

use super::state::{ClickOutcome, Selection, SelectionError};
use crate::board::Square;
use crate::notation::PlayedMove;
use crate::parser::{parse_fen, ParseError, Position};
use crate::rules::legal_destinations;

/// The loaded position plus the move being picked on it.
///
/// Each board gets its own session; nothing here is global.
#[derive(Debug, Clone, Default)]
pub struct BoardSession {
    position: Option<Position>,
    selection: Selection,
}

impl BoardSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session already holding `position`.
    pub fn with_position(position: Position) -> Self {
        Self {
            position: Some(position),
            selection: Selection::Idle,
        }
    }

    /// Parses `text` and replaces the board with it.
    ///
    /// On a parse error the previous position and selection are kept.
    pub fn load(&mut self, text: &str) -> Result<&Position, ParseError> {
        let position = parse_fen(text)?;
        info!(fen = %position, "position loaded");
        Ok(self.replace(position))
    }

    pub fn replace(&mut self, position: Position) -> &Position {
        self.selection.clear();
        self.position.insert(position)
    }

    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Handles a click on the square named `square`.
    pub fn click(&mut self, square: &str) -> Result<ClickOutcome, SelectionError> {
        let position = self.position.as_ref().ok_or(SelectionError::NoPosition)?;
        let square: Square = square
            .parse()
            .map_err(|_| SelectionError::InvalidSquare(square.to_string()))?;

        let result = self.selection.click(position, square);
        if let Err(ref e) = result {
            debug!(%square, error = %e, "click rejected");
        }
        result
    }

    pub fn clear(&mut self) {
        self.selection.clear();
    }

    /// The finished move, or why there isn't one yet.
    pub fn pending_move(&self) -> Result<PlayedMove, SelectionError> {
        self.selection
            .played_move()
            .ok_or(SelectionError::IncompleteMove)
    }

    /// Legal destinations for the piece currently picked up.
    pub fn legal_targets(&self) -> Vec<Square> {
        match (&self.position, self.selection.origin()) {
            (Some(position), Some((from, _))) => {
                legal_destinations(&position.board, position.side_to_move, from)
            }
            _ => Vec::new(),
        }
    }
}
