//! Check detection by move simulation

use tracing::debug;

use super::moves::{can_reach, is_pseudo_legal, Reach};
use crate::board::{Board, Color, Square};

/// Whether any piece of color `by` can reach `square`.
pub fn is_square_attacked(board: &Board, square: Square, by: Color) -> bool {
    board
        .pieces()
        .filter(|(_, piece)| piece.color == by)
        .any(|(from, piece)| can_reach(board, by, piece.role, from, square, Reach::Attack))
}

/// Whether `color`'s king is currently attacked.
///
/// A board without that king is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king) => is_square_attacked(board, king, !color),
        None => false,
    }
}

/// Whether playing `from`-`to` leaves the mover's king safe.
///
/// The move is applied to a copy of the board; the live board is untouched.
/// An empty `from` is never safe.
pub fn is_check_safe(board: &Board, side: Color, from: Square, to: Square) -> bool {
    if board.piece_at(from).is_none() {
        return false;
    }

    let mut simulated = board.clone();
    simulated.relocate(from, to);

    if simulated.king_square(side).is_none() {
        debug!(%side, "no king on board, treating move as check-safe");
        return true;
    }
    !is_in_check(&simulated, side)
}

/// Pseudo-legal on the real board and check-safe after the move.
pub fn is_legal(board: &Board, side: Color, from: Square, to: Square) -> bool {
    is_pseudo_legal(board, side, from, to) && is_check_safe(board, side, from, to)
}

/// All squares the piece on `from` may legally move to.
pub fn legal_destinations(board: &Board, side: Color, from: Square) -> Vec<Square> {
    Square::all()
        .filter(|&to| is_legal(board, side, from, to))
        .collect()
}
