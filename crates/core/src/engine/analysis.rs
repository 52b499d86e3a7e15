//! Types for representing engine evaluations

use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents a position evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Evaluation {
    /// Centipawn score (positive = white advantage)
    Centipawns(i32),
    /// Forced mate (positive = white mates, negative = black mates)
    Mate(i32),
}

impl Evaluation {
    /// Returns true if the position is winning for white
    pub fn is_white_winning(&self) -> bool {
        match self {
            Evaluation::Centipawns(cp) => *cp > 100,
            Evaluation::Mate(moves) => *moves > 0,
        }
    }

    /// Returns true if the position is winning for black
    pub fn is_black_winning(&self) -> bool {
        match self {
            Evaluation::Centipawns(cp) => *cp < -100,
            Evaluation::Mate(moves) => *moves < 0,
        }
    }

    /// Plain-words reading of the score for prompts
    pub fn verdict(&self) -> &'static str {
        if self.is_white_winning() {
            "White is better"
        } else if self.is_black_winning() {
            "Black is better"
        } else {
            "roughly equal"
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evaluation::Centipawns(cp) => {
                let score = *cp as f32 / 100.0;
                if score >= 0.0 {
                    write!(f, "+{:.2}", score)
                } else {
                    write!(f, "{:.2}", score)
                }
            }
            Evaluation::Mate(moves) => write!(f, "M{}", moves),
        }
    }
}

/// What the engine reports for a position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineEvaluation {
    /// Best move in coordinate notation (e.g., "e2e4")
    pub best_move: String,
    pub evaluation: Evaluation,
    /// Best line of play, coordinate notation
    pub principal_variation: Vec<String>,
}

impl EngineEvaluation {
    /// Returns a brief summary of the evaluation
    pub fn summary(&self) -> String {
        format!(
            "Eval: {} ({}) | Best: {} | PV: {}",
            self.evaluation,
            self.evaluation.verdict(),
            self.best_move,
            self.principal_variation
                .iter()
                .take(5)
                .cloned()
                .collect::<Vec<_>>()
                .join(" ")
        )
    }
}
