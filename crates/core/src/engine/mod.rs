//! Chess engine integration
//!
//! The engine itself runs elsewhere; this module only describes what the
//! tutor expects back from it.

pub mod analysis;

use async_trait::async_trait;

use crate::error::Result;

// Re-export main types for convenience
pub use analysis::{EngineEvaluation, Evaluation};

/// Something that can score a position.
///
/// Implementations may fail with [`crate::Error::Engine`] on timeouts or when
/// the engine process is unavailable.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(&self, fen: &str) -> Result<EngineEvaluation>;
}
