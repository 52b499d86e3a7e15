//! Runtime configuration from the environment

use std::env;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "mistral-small-latest";
pub const DEFAULT_API_BASE: &str = "https://api.mistral.ai";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct TutorConfig {
    /// Missing keys only fail when the tutor is actually called.
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub data_dir: PathBuf,
    pub addr: String,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.3,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            addr: DEFAULT_ADDR.to_string(),
        }
    }
}

impl TutorConfig {
    /// Reads `MISTRAL_API_KEY`, `MISTRAL_API_BASE`, `MISTRAL_MODEL`,
    /// `CHESS_TUTOR_DATA_DIR` and `CHESS_TUTOR_ADDR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            api_key: var("MISTRAL_API_KEY"),
            api_base: var("MISTRAL_API_BASE").unwrap_or(defaults.api_base),
            model: var("MISTRAL_MODEL").unwrap_or(defaults.model),
            temperature: defaults.temperature,
            data_dir: var("CHESS_TUTOR_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            addr: var("CHESS_TUTOR_ADDR").unwrap_or(defaults.addr),
        }
    }
}
