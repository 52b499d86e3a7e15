//! Storage operations

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{info, warn};

use super::models::*;
use crate::error::{Error, Result};

pub const CHALLENGES_FILE: &str = "defis-data.json";
pub const PROGRESSION_FILE: &str = "progression.json";

const SESSION_PREFIX: &str = "session-";

/// Result of asking for a saved session
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    Record {
        record: SessionRecord,
        file_name: String,
    },
    /// Nothing was picked
    Canceled,
}

/// Stores everything as JSON files in one directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `record` to a new timestamped file and returns its name.
    pub fn save(&self, record: &SessionRecord) -> Result<String> {
        fs::create_dir_all(&self.dir)?;

        let stamp = record.timestamp.format("%Y-%m-%dT%H-%M-%S-%3fZ");
        let mut file_name = format!("{}{}.json", SESSION_PREFIX, stamp);
        let mut n = 1;
        while self.dir.join(&file_name).exists() {
            file_name = format!("{}{}-{}.json", SESSION_PREFIX, stamp, n);
            n += 1;
        }

        let json = serde_json::to_string_pretty(record)?;
        fs::write(self.dir.join(&file_name), json)?;
        info!(%file_name, "session saved");
        Ok(file_name)
    }

    /// Reads back a saved session. `None` means the user picked nothing.
    pub fn load(&self, file_name: Option<&str>) -> Result<Loaded> {
        let Some(file_name) = file_name.map(str::trim).filter(|n| !n.is_empty()) else {
            return Ok(Loaded::Canceled);
        };
        let path = self.session_path(file_name)?;

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound(file_name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        let record: SessionRecord = serde_json::from_str(&content)?;
        info!(%file_name, "session loaded");

        Ok(Loaded::Record {
            record,
            file_name: file_name.to_string(),
        })
    }

    /// Saved session file names, newest first.
    pub fn list_sessions(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let name = entry?.file_name().to_string_lossy().to_string();
            if name.starts_with(SESSION_PREFIX) && name.ends_with(".json") {
                names.push(name);
            }
        }
        names.sort_unstable_by(|a, b| b.cmp(a));
        Ok(names)
    }

    pub fn challenges(&self) -> Result<Vec<Challenge>> {
        let content = fs::read_to_string(self.dir.join(CHALLENGES_FILE))?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn challenge(&self, id: &str) -> Result<Challenge> {
        self.challenges()?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::NotFound(format!("challenge {}", id)))
    }

    /// Current progression; a missing or unreadable file starts from zero.
    pub fn progression(&self) -> Result<Progression> {
        let path = self.dir.join(PROGRESSION_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Progression::default()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(progression) => Ok(progression),
            Err(e) => {
                warn!(error = %e, "progression file unreadable, starting over");
                Ok(Progression::default())
            }
        }
    }

    /// Merges `update` into the stored progression and writes it back.
    pub fn update_progression(&self, update: ProgressionUpdate) -> Result<Progression> {
        let mut progression = self.progression()?;
        progression.apply(update);

        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(&progression)?;
        fs::write(self.dir.join(PROGRESSION_FILE), json)?;
        Ok(progression)
    }

    /// Records a started session and the challenge it came from, if any.
    pub fn record_session_start(&self, challenge_id: Option<&str>) -> Result<Progression> {
        let current = self.progression()?;
        self.update_progression(ProgressionUpdate {
            sessions_total: Some(current.sessions_total + 1),
            last_session: Some(Utc::now()),
            current_challenge: challenge_id.map(str::to_string),
            ..ProgressionUpdate::default()
        })
    }

    fn session_path(&self, file_name: &str) -> Result<PathBuf> {
        let plain = Path::new(file_name)
            .file_name()
            .is_some_and(|n| n == file_name);
        if !plain {
            return Err(Error::NotFound(file_name.to_string()));
        }
        Ok(self.dir.join(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Piece, Role};
    use crate::notation::PlayedMove;
    use tempfile::TempDir;

    fn store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("data"));
        (dir, store)
    }

    #[test]
    fn test_save_and_load_session() {
        let (_dir, store) = store();
        let mut record = SessionRecord::new("8/8/8/8/8/8/8/8 w - - 0 1");
        record.result = "Plans: ...".to_string();
        record.move_analysis = Some(MoveRecord::from(&PlayedMove {
            from: "g1".parse().unwrap(),
            to: "f3".parse().unwrap(),
            piece: Piece::new(Color::White, Role::Knight),
        }));

        let name = store.save(&record).unwrap();
        assert!(name.starts_with("session-") && name.ends_with(".json"));

        let Loaded::Record { record: loaded, file_name } = store.load(Some(&name)).unwrap() else {
            panic!("expected a record");
        };
        assert_eq!(file_name, name);
        assert_eq!(loaded, record);

        let raw = fs::read_to_string(store.dir().join(&name)).unwrap();
        assert!(raw.contains("\"moveAnalysis\""));
        assert!(raw.contains("\"move\": \"Nf3\""));
    }

    #[test]
    fn test_same_timestamp_does_not_overwrite() {
        let (_dir, store) = store();
        let record = SessionRecord::new("fen");
        let first = store.save(&record).unwrap();
        let second = store.save(&record).unwrap();
        assert_ne!(first, second);
        assert_eq!(store.list_sessions().unwrap().len(), 2);
    }

    #[test]
    fn test_load_canceled_and_missing() {
        let (_dir, store) = store();
        assert_eq!(store.load(None).unwrap(), Loaded::Canceled);
        assert_eq!(store.load(Some("  ")).unwrap(), Loaded::Canceled);
        assert!(matches!(store.load(Some("session-nope.json")), Err(Error::NotFound(_))));
        assert!(matches!(store.load(Some("../secret.json")), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_list_sessions_on_missing_dir() {
        let (_dir, store) = store();
        assert!(store.list_sessions().unwrap().is_empty());
    }

    #[test]
    fn test_challenges_accept_french_keys() {
        let (_dir, store) = store();
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(
            store.dir().join(CHALLENGES_FILE),
            r#"[
                {"id": "d1", "titre": "Mat du couloir", "niveau": "facile", "fen": "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1"},
                {"id": "d2", "title": "Fork", "level": "medium", "fen": "8/8/8/8/8/8/8/8 w - - 0 1"}
            ]"#,
        )
        .unwrap();

        let challenges = store.challenges().unwrap();
        assert_eq!(challenges.len(), 2);
        assert_eq!(challenges[0].label(), "Mat du couloir (facile)");
        assert_eq!(store.challenge("d2").unwrap().title, "Fork");
        assert!(matches!(store.challenge("d3"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_progression_merge() {
        let (_dir, store) = store();
        assert_eq!(store.progression().unwrap(), Progression::default());

        let updated = store
            .update_progression(ProgressionUpdate {
                challenges_completed: Some(2),
                ..ProgressionUpdate::default()
            })
            .unwrap();
        assert_eq!(updated.challenges_completed, 2);

        let started = store.record_session_start(Some("d1")).unwrap();
        assert_eq!(started.sessions_total, 1);
        assert_eq!(started.challenges_completed, 2);
        assert_eq!(started.current_challenge.as_deref(), Some("d1"));
        assert_eq!(store.progression().unwrap(), started);
    }

    #[test]
    fn test_progression_reads_original_keys() {
        let (_dir, store) = store();
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(
            store.dir().join(PROGRESSION_FILE),
            r#"{"sessions_totales": 4, "defis_completes": 1, "themes_travailles": ["pins"], "score_moyen": 0, "derniere_session": null, "defis_en_cours": null}"#,
        )
        .unwrap();

        let progression = store.progression().unwrap();
        assert_eq!(progression.sessions_total, 4);
        assert_eq!(progression.themes_worked, vec!["pins".to_string()]);
    }
}
