//! Store persistence with file locking.
//!
//! The whole store serializes to a single JSON record. Timestamps round-trip
//! as RFC 3339 strings and calendar dates as `YYYY-MM-DD`, so the storage
//! layer never needs to distinguish dates from strings. Saving writes to a
//! temp file and renames it over the original so readers never observe a
//! partial record.

use crate::{
    Config, DailyPerformance, Deck, Error, Flashcard, Result, Store, StudySession, UserStats,
};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use uuid::Uuid;

/// The serialized form of a [`Store`]
///
/// The mastered-card ids travel with the record so mastery accounting
/// survives a reload without double-counting.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub decks: Vec<Deck>,
    pub flashcards: Vec<Flashcard>,
    pub study_sessions: Vec<StudySession>,
    pub user_stats: UserStats,
    pub performance_data: Vec<DailyPerformance>,
    #[serde(default)]
    pub mastered_cards: Vec<Uuid>,
}

impl Store {
    /// Capture the store as a serializable record, id-sorted for stable
    /// output
    pub fn snapshot(&self) -> Snapshot {
        let mut decks: Vec<_> = self.decks.values().cloned().collect();
        decks.sort_by_key(|d| d.id);
        let mut flashcards: Vec<_> = self.cards.values().cloned().collect();
        flashcards.sort_by_key(|c| c.id);
        let mut study_sessions: Vec<_> = self.sessions.values().cloned().collect();
        study_sessions.sort_by_key(|s| s.id);
        let mut mastered_cards: Vec<_> = self.mastered.iter().copied().collect();
        mastered_cards.sort();

        Snapshot {
            decks,
            flashcards,
            study_sessions,
            user_stats: self.stats.clone(),
            performance_data: self.performance.clone(),
            mastered_cards,
        }
    }

    /// Rebuild a store from a snapshot
    ///
    /// Deck card counts are recomputed from the actual card population; a
    /// mismatch is repaired with a warning rather than propagated.
    pub fn from_snapshot(snapshot: Snapshot, config: Config) -> Self {
        let mut store = Store::new(config);

        for deck in snapshot.decks {
            store.decks.insert(deck.id, deck);
        }
        for card in snapshot.flashcards {
            store.cards.insert(card.id, card);
        }
        for session in snapshot.study_sessions {
            store.sessions.insert(session.id, session);
        }
        store.stats = snapshot.user_stats;
        store.performance = snapshot.performance_data;
        store.performance.sort_by_key(|entry| entry.date);
        store.mastered = snapshot.mastered_cards.into_iter().collect();

        for deck in store.decks.values_mut() {
            let actual = store
                .cards
                .values()
                .filter(|c| c.deck_id == deck.id)
                .count() as u32;
            if deck.card_count != actual {
                tracing::warn!(
                    "Deck {} card_count {} disagreed with {} stored cards, repairing",
                    deck.id,
                    deck.card_count,
                    actual
                );
                deck.card_count = actual;
            }
        }

        store
    }

    /// Load a store from a file with shared locking
    ///
    /// Returns an empty store if the file doesn't exist. If the file is
    /// corrupted, logs a warning and returns an empty store.
    pub fn load(path: &Path, config: Config) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No store file found, starting empty");
            return Ok(Self::new(config));
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open store file {:?}: {}. Starting empty.", path, e);
                return Ok(Self::new(config));
            }
        };

        // Acquire shared lock for reading
        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock store file {:?}: {}. Starting empty.", path, e);
            return Ok(Self::new(config));
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read store file {:?}: {}. Starting empty.", path, e);
            return Ok(Self::new(config));
        }

        file.unlock()?;

        match serde_json::from_str::<Snapshot>(&contents) {
            Ok(snapshot) => {
                tracing::debug!("Loaded store from {:?}", path);
                Ok(Self::from_snapshot(snapshot, config))
            }
            Err(e) => {
                tracing::warn!("Failed to parse store file {:?}: {}. Starting empty.", path, e);
                Ok(Self::new(config))
            }
        }
    }

    /// Save the store to a file with exclusive locking
    ///
    /// Atomically writes by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Create unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "store path missing parent")
        })?)?;

        // Acquire exclusive lock on the temp file to serialize concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(&self.snapshot())?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        // Atomically replace old store file
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved store to {:?}", path);
        Ok(())
    }

    /// Load the store, modify it, and save it back atomically
    pub fn update<F>(path: &Path, config: Config, f: F) -> Result<Self>
    where
        F: FnOnce(&mut Store) -> Result<()>,
    {
        let mut store = Self::load(path, config)?;
        f(&mut store)?;
        store.save(path)?;
        Ok(store)
    }
}
