//! Position string parsing
//!
//! Only the placement and side-to-move fields are interpreted. Castling,
//! en-passant and the move counters are carried through untouched so that
//! collaborators (engine, tutor) receive the string the user typed.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::board::{Board, Color, Piece, Square};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Trailing fields synthesized when the input stops early.
const DEFAULT_FIELDS: [&str; 6] = ["", "w", "-", "-", "0", "1"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("position string is empty")]
    EmptyInput,

    #[error("position string is missing required fields")]
    MissingFields,

    #[error("expected 8 ranks, found {0}")]
    BadRankCount(usize),

    #[error("rank {0} covers {1} files, expected 8")]
    BadFileCount(u8, usize),

    #[error("illegal character in placement: {0:?}")]
    IllegalChar(char),

    #[error("side to move must be \"w\" or \"b\", got {0:?}")]
    BadSideToMove(String),
}

/// A loaded position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub side_to_move: Color,
    pub castling: String,
    pub en_passant: String,
    pub halfmove: String,
    pub fullmove: String,
}

impl Position {
    /// Standard starting position
    pub fn starting() -> Self {
        parse_fen(STARTING_FEN).unwrap_or_else(|_| Self::from_board(Board::empty(), Color::White))
    }

    /// Wraps a board with default auxiliary fields.
    pub fn from_board(board: Board, side_to_move: Color) -> Self {
        Self {
            board,
            side_to_move,
            castling: DEFAULT_FIELDS[2].to_string(),
            en_passant: DEFAULT_FIELDS[3].to_string(),
            halfmove: DEFAULT_FIELDS[4].to_string(),
            fullmove: DEFAULT_FIELDS[5].to_string(),
        }
    }

    /// Builds a position from already-split fields.
    ///
    /// At least placement and side to move are required; missing trailing
    /// fields take their defaults and anything past the sixth is ignored.
    pub fn from_fields(fields: &[&str]) -> Result<Self, ParseError> {
        if fields.len() < 2 {
            return Err(ParseError::MissingFields);
        }

        let side_to_move = Color::from_fen(fields[1])
            .ok_or_else(|| ParseError::BadSideToMove(fields[1].to_string()))?;
        let board = parse_placement(fields[0])?;

        let field = |i: usize| fields.get(i).copied().unwrap_or(DEFAULT_FIELDS[i]).to_string();

        Ok(Self {
            board,
            side_to_move,
            castling: field(2),
            en_passant: field(3),
            halfmove: field(4),
            fullmove: field(5),
        })
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    /// Full six-field position string.
    pub fn fen(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.board.placement(),
            self.side_to_move.fen_char(),
            self.castling,
            self.en_passant,
            self.halfmove,
            self.fullmove
        )
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fen())
    }
}

impl FromStr for Position {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fen(s)
    }
}

/// Normalizes user input into a six-field position string.
///
/// A lone placement gets `w - - 0 1` appended, partial inputs are padded and
/// anything past six fields is dropped. Nothing is validated here.
pub fn normalize_fen(text: &str) -> Result<String, ParseError> {
    let fields = split_fields(text)?;
    Ok(fields.join(" "))
}

/// Parses a position string into a board and side to move.
pub fn parse_fen(text: &str) -> Result<Position, ParseError> {
    let fields = split_fields(text)?;
    let position = Position::from_fields(&fields)?;
    debug!(
        pieces = position.board.piece_count(),
        side = %position.side_to_move,
        "parsed position"
    );
    Ok(position)
}

fn split_fields(text: &str) -> Result<Vec<&str>, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut fields: Vec<&str> = trimmed.split_whitespace().take(6).collect();
    while fields.len() < 6 {
        fields.push(DEFAULT_FIELDS[fields.len()]);
    }
    Ok(fields)
}

fn parse_placement(placement: &str) -> Result<Board, ParseError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(ParseError::BadRankCount(ranks.len()));
    }

    let mut board = Board::empty();

    for (row, rank) in ranks.iter().enumerate() {
        let mut files = 0usize;

        for ch in rank.chars() {
            match ch {
                '1'..='8' => {
                    files += ch as usize - '0' as usize;
                }
                _ => {
                    let piece = Piece::from_fen_char(ch).ok_or(ParseError::IllegalChar(ch))?;
                    // Overlong ranks are still scanned so the count error reports the real total.
                    if let Some(square) = Square::new(row as i8, files as i8) {
                        board.set(square, Some(piece));
                    }
                    files += 1;
                }
            }
        }

        if files != 8 {
            return Err(ParseError::BadFileCount(8 - row as u8, files));
        }
    }

    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Role;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_board() {
        let pos = parse_fen("8/8/8/8/8/8/8/8 w - - 0 1").unwrap();
        assert_eq!(pos.board, Board::empty());
        assert_eq!(pos.side_to_move, Color::White);
    }

    #[test]
    fn test_starting_position() {
        let pos = parse_fen(STARTING_FEN).unwrap();
        assert_eq!(pos.board.piece_count(), 32);
        assert_eq!(pos.side_to_move, Color::White);
        assert_eq!(pos.board.king_square(Color::White), Some(sq("e1")));
        assert_eq!(pos.board.king_square(Color::Black), Some(sq("e8")));
        assert_eq!(pos.castling, "KQkq");
        assert_eq!(pos.fen(), STARTING_FEN);
    }

    #[test]
    fn test_single_token_gets_defaults() {
        let short = parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").unwrap();
        let full = parse_fen(STARTING_FEN).unwrap();
        assert_eq!(short.board, full.board);
        assert_eq!(short.side_to_move, Color::White);
        assert_eq!(short.castling, "-");
        assert_eq!(short.en_passant, "-");
        assert_eq!(short.halfmove, "0");
        assert_eq!(short.fullmove, "1");
    }

    #[test]
    fn test_normalize_pads_and_truncates() {
        assert_eq!(
            normalize_fen("  8/8/8/8/8/8/8/8  ").unwrap(),
            "8/8/8/8/8/8/8/8 w - - 0 1"
        );
        assert_eq!(
            normalize_fen("8/8/8/8/8/8/8/8 b KQ").unwrap(),
            "8/8/8/8/8/8/8/8 b KQ - 0 1"
        );
        assert_eq!(
            normalize_fen("8/8/8/8/8/8/8/8 b - - 3 9 extra junk").unwrap(),
            "8/8/8/8/8/8/8/8 b - - 3 9"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_fen(""), Err(ParseError::EmptyInput));
        assert_eq!(parse_fen("   \t "), Err(ParseError::EmptyInput));
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(Position::from_fields(&["8/8/8/8/8/8/8/8"]), Err(ParseError::MissingFields));
    }

    #[test]
    fn test_bad_rank_count() {
        assert_eq!(parse_fen("8/8/8/8/8/8/8 w"), Err(ParseError::BadRankCount(7)));
        assert_eq!(parse_fen("8/8/8/8/8/8/8/8/8 w"), Err(ParseError::BadRankCount(9)));
    }

    #[test]
    fn test_bad_file_count() {
        assert_eq!(
            parse_fen("7/8/8/8/8/8/8/8 w"),
            Err(ParseError::BadFileCount(8, 7))
        );
        assert_eq!(
            parse_fen("8/8/8/8/8/8/8/ppppppppp w"),
            Err(ParseError::BadFileCount(1, 9))
        );
        assert_eq!(
            parse_fen("8/8/8/4P4/8/8/8/8 w"),
            Err(ParseError::BadFileCount(5, 9))
        );
    }

    #[test]
    fn test_illegal_char() {
        assert_eq!(parse_fen("8/8/8/8/8/8/8/7x w"), Err(ParseError::IllegalChar('x')));
        assert_eq!(parse_fen("8/8/8/8/8/8/8/9 w"), Err(ParseError::IllegalChar('9')));
        assert_eq!(parse_fen("8/8/8/8/8/8/8/0 w"), Err(ParseError::IllegalChar('0')));
    }

    #[test]
    fn test_bad_side_to_move() {
        assert_eq!(
            parse_fen("8/8/8/8/8/8/8/8 white"),
            Err(ParseError::BadSideToMove("white".to_string()))
        );
        assert_eq!(
            parse_fen("8/8/8/8/8/8/8/8 W"),
            Err(ParseError::BadSideToMove("W".to_string()))
        );
    }

    #[test]
    fn test_pieces_land_on_right_squares() {
        let pos = parse_fen("4k3/8/8/8/4P3/8/8/R3K2R b - - 0 1").unwrap();
        assert_eq!(pos.side_to_move, Color::Black);
        assert_eq!(pos.piece_at(sq("e4")), Some(Piece::new(Color::White, Role::Pawn)));
        assert_eq!(pos.piece_at(sq("a1")), Some(Piece::new(Color::White, Role::Rook)));
        assert_eq!(pos.piece_at(sq("h1")), Some(Piece::new(Color::White, Role::Rook)));
        assert_eq!(pos.piece_at(sq("e8")), Some(Piece::new(Color::Black, Role::King)));
        assert_eq!(pos.piece_at(sq("e5")), None);
    }

    #[test]
    fn test_placement_round_trip_random_boards() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let letters = ['P', 'N', 'B', 'R', 'Q', 'K', 'p', 'n', 'b', 'r', 'q', 'k'];
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..200 {
            let mut board = Board::empty();
            for square in Square::all() {
                if rng.random_bool(0.3) {
                    let ch = letters[rng.random_range(0..letters.len())];
                    board.set(square, Piece::from_fen_char(ch));
                }
            }

            let placement = board.placement();
            let reparsed = parse_fen(&placement).unwrap();
            assert_eq!(reparsed.board, board, "round trip failed for {placement}");
        }
    }

    #[test]
    fn test_round_trip_accepts_split_empty_runs() {
        // "44" and "8" describe the same empty rank.
        let pos = parse_fen("44/8/8/8/8/8/8/8 w").unwrap();
        assert_eq!(pos.board.placement(), "8/8/8/8/8/8/8/8");
    }
}
