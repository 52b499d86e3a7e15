//! Board model
//!
//! Squares, pieces and the 8x8 grid they live on. The grid is plain data:
//! movement rules live in [`crate::rules`].

mod grid;
mod piece;
mod square;

pub use grid::Board;
pub use piece::{Color, Piece, Role};
pub use square::{InvalidSquare, Square};
