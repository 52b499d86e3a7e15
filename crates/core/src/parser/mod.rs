//! Parser module for reading position strings
//!
//! Currently supports:
//! - FEN-style position strings (placement + side to move + four opaque fields)

pub mod fen;

// Re-export commonly used items for convenience
pub use fen::{normalize_fen, parse_fen, ParseError, Position, STARTING_FEN};
