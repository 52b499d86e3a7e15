//! Move rules
//!
//! Pseudo-legality is decided by a single geometry routine, [`can_reach`],
//! which check detection reuses by asking whether any enemy piece can reach
//! the king. There is no separate attack table to keep in sync.
//!
//! Not covered: castling, en passant, promotion choice, stalemate and draws.

mod check;
mod moves;

pub use check::{is_check_safe, is_in_check, is_legal, is_square_attacked, legal_destinations};
pub use moves::{can_reach, is_pseudo_legal, Reach};
