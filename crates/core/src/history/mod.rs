//! Bounded, newest-first list of saved moods and the storage it is flushed to.
//!
//! Stored as a plain JSON array of records with no version field. A stored
//! value that does not parse as the current record shape is discarded and the
//! history starts empty.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{mood::MoodState, MoodboardError, Result};

/// A mood frozen at the moment it was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedMood {
    pub id: String,
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub mood: MoodState,
}

/// Where the serialised history lives.
pub trait HistoryStorage {
    /// Returns the stored history, or `None` if nothing was ever written.
    fn load_history(&self) -> Result<Option<String>>;
    fn save_history(&self, serialized: &str) -> Result<()>;
}

/// JSON file on disk, replaced atomically on every write.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStorage for JsonFileStorage {
    fn load_history(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save_history(&self, serialized: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serialized)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Shared in-memory slot. Clones observe the same value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(raw: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    /// Last value written, if any.
    pub fn contents(&self) -> Result<Option<String>> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<String>>> {
        self.slot
            .lock()
            .map_err(|_| MoodboardError::Poisoned("history storage"))
    }
}

impl HistoryStorage for MemoryStorage {
    fn load_history(&self) -> Result<Option<String>> {
        self.contents()
    }

    fn save_history(&self, serialized: &str) -> Result<()> {
        *self.lock()? = Some(serialized.to_string());
        Ok(())
    }
}

#[derive(Debug)]
pub struct HistoryStore<S> {
    entries: Vec<SavedMood>,
    capacity: usize,
    storage: S,
}

impl<S: HistoryStorage> HistoryStore<S> {
    /// Reads the persisted history. Missing, unreadable or malformed data
    /// yields an empty history. Capacity is at least one entry.
    pub fn load(storage: S, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut entries = match storage.load_history() {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<SavedMood>>(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(%err, "stored history is malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(%err, "failed to read stored history, starting empty");
                Vec::new()
            }
        };
        entries.truncate(capacity);
        tracing::debug!(count = entries.len(), "loaded history");

        Self {
            entries,
            capacity,
            storage,
        }
    }

    pub fn entries(&self) -> &[SavedMood] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn get(&self, id: &str) -> Option<&SavedMood> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Prepends a snapshot of `mood`, evicting the oldest entries beyond
    /// capacity. Returns the new entry.
    pub fn save(&mut self, mood: &MoodState) -> SavedMood {
        // Millisecond precision so the stored timestamp reads back identically.
        let now = Utc::now();
        let created_at = DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);
        let saved = SavedMood {
            id: uuid::Uuid::new_v4().to_string(),
            created_at,
            mood: mood.clone(),
        };
        tracing::debug!(id = %saved.id, title = %saved.mood.title, "saving mood");

        self.entries.insert(0, saved.clone());
        if self.entries.len() > self.capacity {
            let evicted = self.entries.len() - self.capacity;
            self.entries.truncate(self.capacity);
            tracing::debug!(evicted, "history over capacity");
        }
        self.flush();
        saved
    }

    /// Copy of the saved mood, or `None` if the id is unknown.
    pub fn restore(&self, id: &str) -> Option<MoodState> {
        self.get(id).map(|entry| entry.mood.clone())
    }

    /// Removes the entry with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let removed = self.entries.len() != before;
        self.flush();
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.flush();
    }

    fn flush(&self) {
        let result = serde_json::to_string(&self.entries)
            .map_err(MoodboardError::from)
            .and_then(|raw| self.storage.save_history(&raw));
        if let Err(err) = result {
            tracing::warn!(%err, "failed to persist history");
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{config::BoardConfig, engine::MoodEngine};

    fn mood(title: &str) -> MoodState {
        let mut engine = MoodEngine::new(StdRng::seed_from_u64(21), BoardConfig::default());
        MoodState {
            title: title.to_string(),
            ..engine.initialize()
        }
    }

    #[test]
    fn keeps_newest_ten() {
        let mut store = HistoryStore::load(MemoryStorage::new(), 10);
        for i in 1..=11 {
            store.save(&mood(&format!("T{i}")));
        }

        let titles: Vec<_> = store.entries().iter().map(|e| e.mood.title.clone()).collect();
        let expected: Vec<_> = (2..=11).rev().map(|i| format!("T{i}")).collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn zero_capacity_still_keeps_latest_save() {
        let storage = MemoryStorage::new();
        let mut store = HistoryStore::load(storage.clone(), 0);
        assert_eq!(store.capacity(), 1);

        store.save(&mood("First"));
        let latest = store.save(&mood("Second"));
        assert_eq!(store.entries(), &[latest]);

        let reloaded = HistoryStore::load(storage, 0);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.entries()[0].mood.title, "Second");
    }

    #[test]
    fn restore_round_trips_content() {
        let mut store = HistoryStore::load(MemoryStorage::new(), 10);
        let original = mood("Spicy Void");
        let id = store.save(&original).id;

        let restored = store.restore(&id).unwrap();
        assert!(restored.same_content(&original));
        assert!(store.restore("nope").is_none());
    }

    #[test]
    fn every_mutation_is_flushed() {
        let storage = MemoryStorage::new();
        let mut store = HistoryStore::load(storage.clone(), 10);
        let first = store.save(&mood("A")).id;
        store.save(&mood("B"));

        let persisted: Vec<SavedMood> =
            serde_json::from_str(&storage.contents().unwrap().unwrap()).unwrap();
        assert_eq!(persisted.len(), 2);
        assert_eq!(persisted[0].mood.title, "B");

        assert!(store.delete(&first));
        assert!(!store.delete(&first));
        let persisted: Vec<SavedMood> =
            serde_json::from_str(&storage.contents().unwrap().unwrap()).unwrap();
        assert_eq!(persisted.len(), 1);

        store.clear();
        assert_eq!(storage.contents().unwrap().as_deref(), Some("[]"));
        assert!(store.is_empty());
    }

    #[test]
    fn reload_sees_previous_session() {
        let storage = MemoryStorage::new();
        let saved = {
            let mut store = HistoryStore::load(storage.clone(), 10);
            store.save(&mood("Gothic Noodle"))
        };

        let store = HistoryStore::load(storage, 10);
        assert_eq!(store.entries(), &[saved]);
    }

    #[test]
    fn malformed_storage_loads_empty() {
        for raw in ["not json", r#"{"id": 1}"#, r#"[{"id": "x"}]"#] {
            let store = HistoryStore::load(MemoryStorage::with_contents(raw), 10);
            assert!(store.is_empty(), "accepted `{raw}`");
        }
    }

    #[test]
    fn reads_records_in_persisted_shape() {
        let raw = r#"[{
            "id": "k3j2h1",
            "title": "Turbo Goblin",
            "isTitleLocked": true,
            "timestamp": 1700000000000,
            "colors": [{ "id": "c", "hex": "hsl(200, 70%, 50%)", "isLocked": false }],
            "emojis": [{ "id": "e", "char": "🦦", "isLocked": true }]
        }]"#;
        let store = HistoryStore::load(MemoryStorage::with_contents(raw), 10);

        let entry = store.get("k3j2h1").unwrap();
        assert_eq!(entry.created_at.timestamp_millis(), 1_700_000_000_000);
        assert!(entry.mood.title_locked);
        assert_eq!(entry.mood.emojis[0].glyph, "🦦");
    }

    #[test]
    fn oversized_storage_is_truncated() {
        let mut big = HistoryStore::load(MemoryStorage::new(), 20);
        for i in 0..15 {
            big.save(&mood(&format!("M{i}")));
        }

        let store = HistoryStore::load(big.storage().clone(), 10);
        assert_eq!(store.len(), 10);
        assert_eq!(store.entries()[0].mood.title, "M14");
    }

    #[test]
    fn file_storage_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested").join("history.json"));
        assert!(storage.load_history().unwrap().is_none());

        let mut store = HistoryStore::load(storage.clone(), 10);
        store.save(&mood("Electric Cloud"));

        let reloaded = HistoryStore::load(storage, 10);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.entries()[0].mood.title, "Electric Cloud");
    }
}
