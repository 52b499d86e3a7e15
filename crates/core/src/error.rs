//! Error types for chess-tutor-core
//!
//! Parse and selection errors come from the board itself. Everything else is
//! a failure of an outside collaborator (language model, engine, disk) and is
//! reported to the user as a message.

use thiserror::Error;

use crate::parser::ParseError;
use crate::selection::SelectionError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid position: {0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Selection(#[from] SelectionError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no API key configured: set MISTRAL_API_KEY and restart")]
    MissingApiKey,

    #[error("the API key was rejected")]
    Unauthorized,

    #[error("too many requests, quota exceeded")]
    RateLimited,

    #[error("network error, check your connection: {0}")]
    Network(String),

    #[error("provider error ({status}): {body}")]
    Provider { status: u16, body: String },

    #[error("the provider returned no content")]
    EmptyResponse,

    #[error("engine error: {0}")]
    Engine(String),

    #[error("not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
