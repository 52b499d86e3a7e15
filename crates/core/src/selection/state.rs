//! Selection state machine

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::board::{Color, Piece, Role, Square};
use crate::notation::PlayedMove;
use crate::parser::Position;
use crate::rules::{is_check_safe, is_pseudo_legal};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("load a position before selecting a move")]
    NoPosition,

    #[error("{0:?} is not a square")]
    InvalidSquare(String),

    #[error("choose a piece on the board")]
    EmptySquare,

    #[error("that piece does not belong to {0}")]
    NotYourPiece(Color),

    #[error("impossible move for a {0}")]
    ImpossibleMove(Role),

    #[error("illegal move: it leaves your king in check")]
    LeavesKingInCheck,

    #[error("select a move on the board: click a piece, then its destination")]
    IncompleteMove,
}

/// Where the user is in picking a move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Idle,
    FromSelected { from: Square, piece: Piece },
    MoveReady(PlayedMove),
}

/// What an accepted click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected { square: Square, piece: Piece },
    Reselected { square: Square, piece: Piece },
    MoveReady(PlayedMove),
}

impl fmt::Display for ClickOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClickOutcome::Selected { square, piece } => write!(
                f,
                "Selected {} on {}. Choose the destination square.",
                piece.symbol(),
                square
            ),
            ClickOutcome::Reselected { square, piece } => write!(
                f,
                "Switched to {} on {}. Choose the destination square.",
                piece.symbol(),
                square
            ),
            ClickOutcome::MoveReady(mv) => write!(
                f,
                "Move selected: {} {} -> {} ({}). Ready for analysis.",
                mv.piece.symbol(),
                mv.from,
                mv.to,
                mv
            ),
        }
    }
}

impl Selection {
    /// Square of the piece currently picked up, if any.
    pub fn origin(&self) -> Option<(Square, Piece)> {
        match *self {
            Selection::Idle => None,
            Selection::FromSelected { from, piece } => Some((from, piece)),
            Selection::MoveReady(mv) => Some((mv.from, mv.piece)),
        }
    }

    pub fn played_move(&self) -> Option<PlayedMove> {
        match *self {
            Selection::MoveReady(mv) => Some(mv),
            _ => None,
        }
    }

    /// Feeds a click on `square` into the machine.
    ///
    /// A completed move can still be re-targeted: further clicks are judged
    /// from the same origin.
    pub fn click(
        &mut self,
        position: &Position,
        square: Square,
    ) -> Result<ClickOutcome, SelectionError> {
        let side = position.side_to_move;
        let occupant = position.piece_at(square);
        let origin = self.origin();

        if let Some(piece) = occupant.filter(|p| p.color == side) {
            *self = Selection::FromSelected {
                from: square,
                piece,
            };
            debug!(%square, role = %piece.role, "piece selected");
            return Ok(match origin {
                Some(_) => ClickOutcome::Reselected { square, piece },
                None => ClickOutcome::Selected { square, piece },
            });
        }

        let Some((from, piece)) = origin else {
            return Err(match occupant {
                None => SelectionError::EmptySquare,
                Some(_) => SelectionError::NotYourPiece(side),
            });
        };

        if !is_pseudo_legal(&position.board, side, from, square) {
            debug!(%from, to = %square, "rejected: not a move for this piece");
            return Err(SelectionError::ImpossibleMove(piece.role));
        }
        if !is_check_safe(&position.board, side, from, square) {
            debug!(%from, to = %square, "rejected: king left in check");
            return Err(SelectionError::LeavesKingInCheck);
        }

        let mv = PlayedMove {
            from,
            to: square,
            piece,
        };
        *self = Selection::MoveReady(mv);
        debug!(%mv, "move ready");
        Ok(ClickOutcome::MoveReady(mv))
    }

    pub fn clear(&mut self) {
        *self = Selection::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_fen, STARTING_FEN};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_idle_rejects_empty_and_enemy_squares() {
        let pos = parse_fen(STARTING_FEN).unwrap();
        let mut sel = Selection::Idle;

        assert_eq!(sel.click(&pos, sq("e4")), Err(SelectionError::EmptySquare));
        assert_eq!(
            sel.click(&pos, sq("e7")),
            Err(SelectionError::NotYourPiece(Color::White))
        );
        assert_eq!(sel, Selection::Idle);
    }

    #[test]
    fn test_select_then_move() {
        let pos = parse_fen(STARTING_FEN).unwrap();
        let mut sel = Selection::Idle;

        let outcome = sel.click(&pos, sq("g1")).unwrap();
        assert!(matches!(outcome, ClickOutcome::Selected { .. }));

        let outcome = sel.click(&pos, sq("f3")).unwrap();
        let ClickOutcome::MoveReady(mv) = outcome else {
            panic!("expected a finished move, got {outcome:?}");
        };
        assert_eq!(mv.to_string(), "Nf3");
        assert_eq!(sel.played_move(), Some(mv));
    }

    #[test]
    fn test_reselect_own_piece() {
        let pos = parse_fen(STARTING_FEN).unwrap();
        let mut sel = Selection::Idle;

        sel.click(&pos, sq("g1")).unwrap();
        let outcome = sel.click(&pos, sq("e2")).unwrap();
        assert!(matches!(outcome, ClickOutcome::Reselected { .. }));
        assert_eq!(sel.origin().map(|(s, _)| s), Some(sq("e2")));
    }

    #[test]
    fn test_rejected_destination_keeps_origin() {
        let pos = parse_fen(STARTING_FEN).unwrap();
        let mut sel = Selection::Idle;

        sel.click(&pos, sq("e2")).unwrap();
        assert_eq!(
            sel.click(&pos, sq("e5")),
            Err(SelectionError::ImpossibleMove(Role::Pawn))
        );
        assert!(matches!(sel, Selection::FromSelected { .. }));

        let outcome = sel.click(&pos, sq("e4")).unwrap();
        let ClickOutcome::MoveReady(mv) = outcome else {
            panic!("expected a finished move, got {outcome:?}");
        };
        assert_eq!(mv.from, sq("e2"));
        assert_eq!(mv.to_string(), "e4");
    }

    #[test]
    fn test_check_unsafe_destination() {
        let pos = parse_fen("4k3/8/8/8/8/8/r7/4K3 w - - 0 1").unwrap();
        let mut sel = Selection::Idle;

        sel.click(&pos, sq("e1")).unwrap();
        assert_eq!(
            sel.click(&pos, sq("e2")),
            Err(SelectionError::LeavesKingInCheck)
        );
        assert!(matches!(sel, Selection::FromSelected { .. }));
        assert!(sel.click(&pos, sq("f1")).is_ok());
    }

    #[test]
    fn test_ready_move_can_be_retargeted() {
        let pos = parse_fen(STARTING_FEN).unwrap();
        let mut sel = Selection::Idle;

        sel.click(&pos, sq("e2")).unwrap();
        sel.click(&pos, sq("e4")).unwrap();
        assert_eq!(sel.click(&pos, sq("e6")), Err(SelectionError::ImpossibleMove(Role::Pawn)));
        assert_eq!(sel.played_move().map(|m| m.to), Some(sq("e4")));

        sel.click(&pos, sq("e3")).unwrap();
        assert_eq!(sel.played_move().map(|m| m.to_string()), Some("e3".to_string()));
    }

    #[test]
    fn test_black_to_move() {
        let pos = parse_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1").unwrap();
        let mut sel = Selection::Idle;

        assert_eq!(
            sel.click(&pos, sq("e4")),
            Err(SelectionError::NotYourPiece(Color::Black))
        );
        sel.click(&pos, sq("b8")).unwrap();
        let ClickOutcome::MoveReady(mv) = sel.click(&pos, sq("c6")).unwrap() else {
            panic!("expected a finished move");
        };
        assert_eq!(mv.to_string(), "Nc6");
    }
}
