//! The persisted high-score table.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::HIGH_SCORE_CAP;
use crate::error::Error;

/// One row of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Three-character player tag.
    pub name: String,
    pub score: u32,
}

/// The top-10 table plus its backing file.  The in-memory table is
/// authoritative; persistence failures degrade to warnings.
#[derive(Debug)]
pub struct ScoreBoard {
    entries: Vec<ScoreEntry>,
    path: Option<PathBuf>,
}

impl ScoreBoard {
    /// Load the table from `path`.  A missing or corrupt file is an
    /// empty table, never an error.
    pub fn load(path: PathBuf) -> Self {
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<ScoreEntry>>(&raw) {
                Ok(mut entries) => {
                    entries.sort_by(|a, b| b.score.cmp(&a.score));
                    entries.truncate(HIGH_SCORE_CAP);
                    entries
                }
                Err(err) => {
                    warn!(?path, %err, "score file unreadable, starting empty");
                    Vec::new()
                }
            },
            // A missing file is the normal first run.
            Err(_) => Vec::new(),
        };
        Self {
            entries,
            path: Some(path),
        }
    }

    /// A table with no backing file; persist becomes a no-op.
    pub fn in_memory() -> Self {
        Self {
            entries: Vec::new(),
            path: None,
        }
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// The score of the current 10th place, if the table is full.
    fn cutoff(&self) -> Option<u32> {
        (self.entries.len() >= HIGH_SCORE_CAP).then(|| self.entries[HIGH_SCORE_CAP - 1].score)
    }

    /// Whether `score` would enter the table.
    pub fn qualifies(&self, score: u32) -> bool {
        match self.cutoff() {
            Some(min) => score > min,
            None => true,
        }
    }

    /// Ranked insert: sort descending, truncate to the cap.  Returns
    /// the 1-based rank, or `None` when the score does not qualify and
    /// the table is left untouched.
    pub fn insert(&mut self, name: &str, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        self.entries.push(ScoreEntry {
            name: name.to_string(),
            score,
        });
        // Stable sort keeps earlier entries ahead on ties, so the new
        // entry sits last among equal scores.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(HIGH_SCORE_CAP);
        self.entries.iter().rposition(|e| e.score == score).map(|i| i + 1)
    }

    /// Rewrite the backing file in full.  The caller logs the error;
    /// the in-memory table stays authoritative either way.
    pub fn persist(&self) -> Result<(), Error> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let raw = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}

/// Default table location, beside the user's home directory.
pub fn default_score_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".hatchling_scores.json")
}
