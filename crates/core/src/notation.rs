//! Move text handed to the engine and tutor

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Piece, Role, Square};

/// A move the user has finished selecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedMove {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
}

impl PlayedMove {
    /// Destination-only move text: `e4` for pawns, `Nf3` otherwise.
    ///
    /// Captures and disambiguation are never marked.
    pub fn text(&self) -> String {
        move_text(self.piece.role, self.to)
    }

    /// Coordinate form, `e2e4`.
    pub fn uci(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl fmt::Display for PlayedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

pub fn move_text(role: Role, to: Square) -> String {
    match role.move_letter() {
        Some(letter) => format!("{}{}", letter, to),
        None => to.to_string(),
    }
}

/// Destination square of a short algebraic move.
///
/// Understands `e4`, `Nf3`, `exd5` and `Nxf3`; anything else is `None`.
pub fn destination_of(text: &str) -> Option<Square> {
    let text = text.trim();
    let chars: Vec<char> = text.chars().collect();

    let square_start = match chars.as_slice() {
        [_, _] => 0,
        [p, _, _] if "KQRBN".contains(*p) => 1,
        [f, 'x', _, _] if ('a'..='h').contains(f) => 2,
        [p, 'x', _, _] if "KQRBN".contains(*p) => 2,
        _ => return None,
    };

    let square: String = chars[square_start..].iter().collect();
    if !square.starts_with(|c: char| c.is_ascii_lowercase()) {
        return None;
    }
    square.parse().ok()
}
