//! Per-piece movement geometry

use crate::board::{Board, Color, Role, Square};

/// What a reachability query is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    /// Moving the piece: pawns push forward and capture diagonally.
    Move,
    /// Attacking a square: pawns only cover their forward diagonals,
    /// whether or not something stands there.
    Attack,
}

/// Whether the side to move may move the piece on `from` to `to`,
/// ignoring checks.
///
/// False when `from` is empty or holds an opponent's piece.
pub fn is_pseudo_legal(board: &Board, side: Color, from: Square, to: Square) -> bool {
    match board.piece_at(from) {
        Some(piece) if piece.color == side => {
            can_reach(board, side, piece.role, from, to, Reach::Move)
        }
        _ => false,
    }
}

/// Geometry shared by move validation and attack detection.
///
/// `color` and `role` describe the moving piece; the board is only consulted
/// for occupancy, so the piece need not actually stand on `from`.
pub fn can_reach(
    board: &Board,
    color: Color,
    role: Role,
    from: Square,
    to: Square,
    reach: Reach,
) -> bool {
    if from == to {
        return false;
    }

    let target = board.piece_at(to);
    if matches!(target, Some(p) if p.color == color) {
        return false;
    }

    let diff_row = to.row() - from.row();
    let diff_col = to.col() - from.col();
    let dr = diff_row.abs();
    let dc = diff_col.abs();

    match role {
        Role::Pawn => {
            let forward = color.forward();
            match reach {
                Reach::Attack => dc == 1 && diff_row == forward,
                Reach::Move => {
                    if dc == 1 && diff_row == forward {
                        return target.is_some();
                    }
                    if diff_col != 0 || target.is_some() {
                        return false;
                    }
                    if diff_row == forward {
                        return true;
                    }
                    // Double step: from the home row, over an empty square.
                    diff_row == 2 * forward
                        && from.row() == color.pawn_home_row()
                        && from
                            .offset(forward, 0)
                            .is_some_and(|mid| board.piece_at(mid).is_none())
                }
            }
        }
        Role::Knight => (dr == 2 && dc == 1) || (dr == 1 && dc == 2),
        Role::Bishop => dr == dc && is_path_clear(board, from, to),
        Role::Rook => (dr == 0 || dc == 0) && is_path_clear(board, from, to),
        Role::Queen => (dr == 0 || dc == 0 || dr == dc) && is_path_clear(board, from, to),
        Role::King => dr <= 1 && dc <= 1,
    }
}

/// Every square strictly between `from` and `to` is empty.
///
/// Callers guarantee the two squares share a line or diagonal.
fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    let step_row = (to.row() - from.row()).signum();
    let step_col = (to.col() - from.col()).signum();

    let mut current = from.offset(step_row, step_col);
    while let Some(square) = current {
        if square == to {
            return true;
        }
        if board.piece_at(square).is_some() {
            return false;
        }
        current = square.offset(step_row, step_col);
    }
    // Walked off the board without meeting `to`.
    false
}
