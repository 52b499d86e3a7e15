//! Board coordinates

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid square: {0:?}")]
pub struct InvalidSquare(pub String);

/// A square on the 8x8 board.
///
/// Stored as (row, col) with row 0 = rank 8 and col 0 = file a, which is the
/// order a position string lists its ranks in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Builds a square from grid indices, `None` when off the board.
    pub fn new(row: i8, col: i8) -> Option<Self> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    pub fn row(self) -> i8 {
        self.row as i8
    }

    pub fn col(self) -> i8 {
        self.col as i8
    }

    /// File letter, `a` to `h`.
    pub fn file(self) -> char {
        (b'a' + self.col) as char
    }

    /// Rank number, 1 to 8.
    pub fn rank(self) -> u8 {
        8 - self.row
    }

    /// The square `dr` rows and `dc` columns away, if it is on the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        Self::new(self.row() + dr, self.col() + dc)
    }

    /// Light squares are the ones where row + col is even (a8, h1).
    pub fn is_light(self) -> bool {
        (self.row + self.col) % 2 == 0
    }

    /// All 64 squares, a8 first, h1 last.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(|i| Square {
            row: i / 8,
            col: i % 8,
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl FromStr for Square {
    type Err = InvalidSquare;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidSquare(s.to_string());
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };

        let file = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(invalid());
        }

        let col = file as u8 - b'a';
        let row = 8 - (rank as u8 - b'0');
        Ok(Square { row, col })
    }
}

impl TryFrom<String> for Square {
    type Error = InvalidSquare;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}
