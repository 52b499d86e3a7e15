//! Stored records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notation::PlayedMove;

/// Snapshot of one tutoring session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub timestamp: DateTime<Utc>,
    pub fen: String,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub move_analysis: Option<MoveRecord>,
}

impl SessionRecord {
    pub fn new(fen: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            fen: fen.into(),
            result: String::new(),
            status: String::new(),
            themes: Vec::new(),
            errors: Vec::new(),
            move_analysis: None,
        }
    }
}

/// The move that was under review when the session was saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Uppercase piece letter, `P` for pawns
    pub piece: char,
    pub from: String,
    pub to: String,
    #[serde(rename = "move")]
    pub text: String,
}

impl From<&PlayedMove> for MoveRecord {
    fn from(mv: &PlayedMove) -> Self {
        Self {
            piece: mv.piece.role.upper_char(),
            from: mv.from.to_string(),
            to: mv.to.to_string(),
            text: mv.text(),
        }
    }
}

/// A training position picked from the challenge list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    #[serde(alias = "titre")]
    pub title: String,
    #[serde(alias = "niveau", default)]
    pub level: String,
    pub fen: String,
}

impl Challenge {
    pub fn label(&self) -> String {
        if self.level.is_empty() {
            self.title.clone()
        } else {
            format!("{} ({})", self.title, self.level)
        }
    }
}

/// Running totals across sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    #[serde(alias = "sessions_totales", default)]
    pub sessions_total: u32,
    #[serde(alias = "defis_completes", default)]
    pub challenges_completed: u32,
    #[serde(alias = "themes_travailles", default)]
    pub themes_worked: Vec<String>,
    #[serde(alias = "score_moyen", default)]
    pub average_score: f32,
    #[serde(alias = "derniere_session", default)]
    pub last_session: Option<DateTime<Utc>>,
    #[serde(alias = "defis_en_cours", default)]
    pub current_challenge: Option<String>,
}

/// Fields to overwrite in [`Progression`]; `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressionUpdate {
    pub sessions_total: Option<u32>,
    pub challenges_completed: Option<u32>,
    pub themes_worked: Option<Vec<String>>,
    pub average_score: Option<f32>,
    pub last_session: Option<DateTime<Utc>>,
    pub current_challenge: Option<String>,
}

impl Progression {
    pub fn apply(&mut self, update: ProgressionUpdate) {
        if let Some(v) = update.sessions_total {
            self.sessions_total = v;
        }
        if let Some(v) = update.challenges_completed {
            self.challenges_completed = v;
        }
        if let Some(v) = update.themes_worked {
            self.themes_worked = v;
        }
        if let Some(v) = update.average_score {
            self.average_score = v;
        }
        if let Some(v) = update.last_session {
            self.last_session = Some(v);
        }
        if let Some(v) = update.current_challenge {
            self.current_challenge = Some(v);
        }
    }
}
