//! Natural-language tutoring
//!
//! The tutor optionally asks an engine for a score, then asks a language
//! model to explain the position or critique a move.

mod mistral;
pub mod prompts;
pub mod types;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::engine::{EngineEvaluation, Evaluator};
use crate::error::{Error, Result};
use crate::notation::PlayedMove;
use crate::parser::{normalize_fen, parse_fen};

pub use mistral::MistralClient;

const EVALUATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything the explainer gets to see.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptContext {
    pub fen: String,
    /// Move text (`Nf3`) when a move is being reviewed
    pub played_move: Option<String>,
    pub evaluation: Option<EngineEvaluation>,
}

impl PromptContext {
    pub fn position(fen: impl Into<String>) -> Self {
        Self {
            fen: fen.into(),
            played_move: None,
            evaluation: None,
        }
    }
}

/// Turns a position (and maybe a move) into prose.
#[async_trait]
pub trait Explainer: Send + Sync {
    async fn explain(&self, context: &PromptContext) -> Result<String>;
}

#[derive(Clone)]
pub struct Tutor {
    explainer: Arc<dyn Explainer>,
    evaluator: Option<Arc<dyn Evaluator>>,
}

impl Tutor {
    pub fn new(explainer: impl Explainer + 'static) -> Self {
        Self {
            explainer: Arc::new(explainer),
            evaluator: None,
        }
    }

    pub fn with_evaluator(mut self, evaluator: impl Evaluator + 'static) -> Self {
        self.evaluator = Some(Arc::new(evaluator));
        self
    }

    /// Explains the position described by `fen`.
    pub async fn explain_position(&self, fen: &str) -> Result<String> {
        let fen = checked_fen(fen)?;
        let mut context = PromptContext::position(fen);
        context.evaluation = self.evaluate(&context.fen).await;
        self.ask(&context).await
    }

    /// Critiques `played` in the position described by `fen`.
    pub async fn explain_move(&self, fen: &str, played: &PlayedMove) -> Result<String> {
        let fen = checked_fen(fen)?;
        let mut context = PromptContext::position(fen);
        context.played_move = Some(played.text());
        context.evaluation = self.evaluate(&context.fen).await;
        self.ask(&context).await
    }

    async fn ask(&self, context: &PromptContext) -> Result<String> {
        let text = self.explainer.explain(context).await?;
        info!(chars = text.len(), "tutor answered");
        Ok(clean_response(&text))
    }

    /// Engine score if an engine is attached and answers in time.
    async fn evaluate(&self, fen: &str) -> Option<EngineEvaluation> {
        let evaluator = self.evaluator.as_ref()?;
        let result = tokio::time::timeout(EVALUATION_TIMEOUT, evaluator.evaluate(fen))
            .await
            .unwrap_or_else(|_| Err(Error::Engine("evaluation timed out".to_string())));

        match result {
            Ok(evaluation) => Some(evaluation),
            Err(e) => {
                warn!(error = %e, "continuing without engine evaluation");
                None
            }
        }
    }
}

/// Normalized position string, rejected early if the board is malformed.
fn checked_fen(fen: &str) -> Result<String> {
    let normalized = normalize_fen(fen)?;
    parse_fen(&normalized)?;
    Ok(normalized)
}

/// Drops zero-width characters some models sprinkle into their output.
pub fn clean_response(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\u{200B}'..='\u{200D}' | '\u{FEFF}'))
        .collect()
}
