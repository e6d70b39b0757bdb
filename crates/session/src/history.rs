//! Score history - newest first, capped, persisted as a JSON array

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{ScoreStore, SCORES_KEY};
use crate::types::{MAX_SCORE_HISTORY, NAME_LEN};

/// Name stored when the player confirms an empty name
pub const ANONYMOUS_NAME: &str = "???";

/// One finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    pub lines: u32,
    /// Older saves have no name.
    #[serde(default)]
    pub name: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl ScoreEntry {
    /// Entry stamped with the current time
    ///
    /// The name is truncated to three characters; an empty name is stored as `???`.
    pub fn new(score: u32, lines: u32, name: &str) -> Self {
        Self::at(score, lines, name, Utc::now().timestamp_millis())
    }

    pub fn at(score: u32, lines: u32, name: &str, timestamp: i64) -> Self {
        Self {
            score,
            lines,
            name: entry_name(name),
            timestamp,
        }
    }

    /// `YYYY-MM-DD` in UTC, if the timestamp is representable
    pub fn date(&self) -> Option<String> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreHistory {
    /// Newest first
    entries: Vec<ScoreEntry>,
}

impl ScoreHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `store`, degrading to an empty history on any failure
    pub fn load(store: &dyn ScoreStore) -> Self {
        let raw = match store.read(SCORES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::new(),
            Err(e) => {
                log::warn!("could not read score history: {e:#}");
                return Self::new();
            }
        };

        match serde_json::from_str::<Vec<ScoreEntry>>(&raw) {
            Ok(mut entries) => {
                entries.truncate(MAX_SCORE_HISTORY);
                log::debug!("loaded {} score entries", entries.len());
                Self { entries }
            }
            Err(e) => {
                log::warn!("discarding unreadable score history: {e}");
                Self::new()
            }
        }
    }

    /// Write the whole history to `store`
    pub fn save(&self, store: &mut dyn ScoreStore) -> Result<()> {
        let json = serde_json::to_string(&self.entries)?;
        store.write(SCORES_KEY, &json).inspect_err(|e| {
            log::warn!("could not save score history: {e:#}");
        })
    }

    /// Record a finished game as the newest entry, dropping the oldest past the cap
    pub fn push(&mut self, entry: ScoreEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_SCORE_HISTORY);
    }

    /// Replace the name of the newest entry; false when the history is empty
    pub fn rename_newest(&mut self, name: &str) -> bool {
        match self.entries.first_mut() {
            Some(entry) => {
                entry.name = entry_name(name);
                true
            }
            None => false,
        }
    }

    /// Entries newest first
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Entries by score, highest first; ties keep newest first
    pub fn ranked(&self) -> Vec<&ScoreEntry> {
        let mut ranked: Vec<&ScoreEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    pub fn best(&self) -> Option<&ScoreEntry> {
        self.entries.iter().max_by_key(|e| e.score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// At most three characters; empty becomes [`ANONYMOUS_NAME`]
fn entry_name(name: &str) -> String {
    let name: String = name.chars().take(NAME_LEN).collect();
    if name.is_empty() {
        ANONYMOUS_NAME.to_owned()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_entry_name_rules() {
        assert_eq!(ScoreEntry::at(1, 1, "", 0).name, "???");
        assert_eq!(ScoreEntry::at(1, 1, "ABCD", 0).name, "ABC");
        assert_eq!(ScoreEntry::at(1, 1, "JO", 0).name, "JO");
    }

    #[test]
    fn test_entry_date() {
        let entry = ScoreEntry::at(0, 0, "A", 1_700_000_000_000);
        assert_eq!(entry.date().as_deref(), Some("2023-11-14"));
    }

    #[test]
    fn test_push_is_newest_first_and_capped() {
        let mut history = ScoreHistory::new();
        for i in 0..12 {
            history.push(ScoreEntry::at(i * 100, i, "AAA", i as i64));
        }
        assert_eq!(history.len(), MAX_SCORE_HISTORY);
        assert_eq!(history.entries()[0].score, 1100);
        // The two oldest fell off.
        assert!(history.entries().iter().all(|e| e.score >= 200));
    }

    #[test]
    fn test_rename_newest() {
        let mut history = ScoreHistory::new();
        assert!(!history.rename_newest("AMY"));

        history.push(ScoreEntry::at(100, 1, "", 1));
        history.push(ScoreEntry::at(200, 2, "", 2));
        assert!(history.rename_newest("BOBBY"));
        assert_eq!(history.entries()[0].name, "BOB");
        assert_eq!(history.entries()[1].name, "???");

        history.rename_newest("");
        assert_eq!(history.entries()[0].name, "???");
    }

    #[test]
    fn test_ranked_by_score() {
        let mut history = ScoreHistory::new();
        history.push(ScoreEntry::at(300, 1, "A", 1));
        history.push(ScoreEntry::at(900, 2, "B", 2));
        history.push(ScoreEntry::at(500, 3, "C", 3));

        let scores: Vec<u32> = history.ranked().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![900, 500, 300]);
        assert_eq!(history.best().map(|e| e.name.as_str()), Some("B"));
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let mut history = ScoreHistory::new();
        history.push(ScoreEntry::at(1200, 4, "ZED", 42));
        history.save(&mut store).unwrap();

        let loaded = ScoreHistory::load(&store);
        assert_eq!(loaded, history);
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        let mut store = MemoryStore::new();
        store.write(SCORES_KEY, "{not json").unwrap();
        assert!(ScoreHistory::load(&store).is_empty());
    }

    #[test]
    fn test_load_accepts_entries_without_name() {
        let mut store = MemoryStore::new();
        store
            .write(SCORES_KEY, r#"[{"score":700,"lines":2,"timestamp":5}]"#)
            .unwrap();
        let loaded = ScoreHistory::load(&store);
        assert_eq!(loaded.entries()[0].score, 700);
        assert_eq!(loaded.entries()[0].name, "");
    }
}
