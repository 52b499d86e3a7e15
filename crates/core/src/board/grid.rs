//! The 8x8 grid

use super::{Color, Piece, Role, Square};

/// Piece placement, one optional piece per square.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square.row() as usize][square.col() as usize]
    }

    /// Puts `piece` on `square`, returning whatever was there.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(
            &mut self.cells[square.row() as usize][square.col() as usize],
            piece,
        )
    }

    /// Moves the occupant of `from` to `to`, overwriting any capture.
    pub fn relocate(&mut self, from: Square, to: Square) {
        let piece = self.set(from, None);
        self.set(to, piece);
    }

    /// Occupied squares in a8..h1 order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    /// First king of `color` found scanning from a8.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, Role::King);
        self.pieces()
            .find(|(_, piece)| *piece == king)
            .map(|(sq, _)| sq)
    }

    /// Placement field of a position string, empty runs as digits.
    pub fn placement(&self) -> String {
        let mut out = String::with_capacity(71);
        for row in 0..8 {
            if row > 0 {
                out.push('/');
            }
            let mut empty = 0u8;
            for cell in &self.cells[row] {
                match cell {
                    Some(piece) => {
                        if empty > 0 {
                            out.push((b'0' + empty) as char);
                            empty = 0;
                        }
                        out.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push((b'0' + empty) as char);
            }
        }
        out
    }
}
