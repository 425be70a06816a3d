use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags};
use thiserror::Error;
use tracing::{debug, info};

use crate::difficulty::Difficulty;

/// Rows shown per tier on the scoreboard.
pub const TOP_SCORES: usize = 10;
/// Longest name the store keeps.
pub const MAX_NAME_LEN: usize = 49;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score store unavailable: {0}")]
    Unavailable(#[from] rusqlite::Error),
    #[error("invalid score: {0}")]
    Validation(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreEntry {
    pub id: i64,
    pub name: String,
    pub seconds: i64,
    pub difficulty: Difficulty,
}

/// Durable, append-only leaderboard.
///
/// Calls may block on I/O; they are only made on screen transitions.
pub trait ScoreRepository {
    /// Create the schema if missing. Safe to call on every startup.
    fn ensure_store(&self) -> Result<(), ScoreError>;

    /// Best entries for a tier, longest survival first. Never padded.
    fn top_scores(&self, difficulty: Difficulty, limit: usize) -> Result<Vec<ScoreEntry>, ScoreError>;

    fn insert(&self, name: &str, seconds: i64, difficulty: Difficulty) -> Result<(), ScoreError>;
}

/// Check an entry before it reaches a store and return the name as stored.
pub fn validate(name: &str, seconds: i64) -> Result<String, ScoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ScoreError::Validation("name is empty"));
    }
    if seconds < 0 {
        return Err(ScoreError::Validation("time is negative"));
    }
    Ok(name.chars().take(MAX_NAME_LEN).collect())
}

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS Scores (
        Id INTEGER PRIMARY KEY AUTOINCREMENT,
        Nom TEXT NOT NULL,
        Time INTEGER NOT NULL,
        Difficulte TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_scores_difficulte_time ON Scores (Difficulte, Time DESC);
";

/// SQLite-backed scores. A connection is opened per call so a store that
/// comes back after a failure works again without a restart.
pub struct SqliteScores {
    path: PathBuf,
}

impl SqliteScores {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, ScoreError> {
        // No CREATE flag: only ensure_store may bring a database into existence
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(conn)
    }
}

impl ScoreRepository for SqliteScores {
    fn ensure_store(&self) -> Result<(), ScoreError> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch(SCHEMA)?;
        info!(path = %self.path.display(), "score store ready");
        Ok(())
    }

    fn top_scores(&self, difficulty: Difficulty, limit: usize) -> Result<Vec<ScoreEntry>, ScoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT Id, Nom, Time, Difficulte FROM Scores WHERE Difficulte = ?1 ORDER BY Time DESC LIMIT ?2",
        )?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![difficulty.tag(), limit], |row| {
            let tag: String = row.get(3)?;
            Ok(ScoreEntry {
                id: row.get(0)?,
                name: row.get(1)?,
                seconds: row.get(2)?,
                difficulty: Difficulty::from_tag(&tag).unwrap_or(difficulty),
            })
        })?;

        let entries = rows.collect::<Result<Vec<_>, _>>()?;
        debug!(tier = difficulty.tag(), count = entries.len(), "loaded top scores");
        Ok(entries)
    }

    fn insert(&self, name: &str, seconds: i64, difficulty: Difficulty) -> Result<(), ScoreError> {
        let name = validate(name, seconds)?;
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO Scores (Nom, Time, Difficulte) VALUES (?1, ?2, ?3)",
            params![name, seconds, difficulty.tag()],
        )?;
        info!(name = %name, seconds, tier = difficulty.tag(), "score saved");
        Ok(())
    }
}

#[cfg(test)]
pub mod testing {
    use std::cell::{Cell, RefCell};
    use std::path::PathBuf;

    use super::*;

    /// In-memory store for state machine tests.
    #[derive(Default)]
    pub struct MemoryScores {
        pub entries: RefCell<Vec<ScoreEntry>>,
        pub offline: Cell<bool>,
    }

    impl MemoryScores {
        fn check_online(&self) -> Result<(), ScoreError> {
            if self.offline.get() {
                return Err(ScoreError::Unavailable(rusqlite::Error::InvalidPath(
                    PathBuf::from("offline"),
                )));
            }
            Ok(())
        }
    }

    impl ScoreRepository for MemoryScores {
        fn ensure_store(&self) -> Result<(), ScoreError> {
            self.check_online()
        }

        fn top_scores(&self, difficulty: Difficulty, limit: usize) -> Result<Vec<ScoreEntry>, ScoreError> {
            self.check_online()?;
            let mut found: Vec<ScoreEntry> = self
                .entries
                .borrow()
                .iter()
                .filter(|e| e.difficulty == difficulty)
                .cloned()
                .collect();
            found.sort_by(|a, b| b.seconds.cmp(&a.seconds));
            found.truncate(limit);
            Ok(found)
        }

        fn insert(&self, name: &str, seconds: i64, difficulty: Difficulty) -> Result<(), ScoreError> {
            let name = validate(name, seconds)?;
            self.check_online()?;
            let mut entries = self.entries.borrow_mut();
            let id = entries.len() as i64 + 1;
            entries.push(ScoreEntry {
                id,
                name,
                seconds,
                difficulty,
            });
            Ok(())
        }
    }
}
