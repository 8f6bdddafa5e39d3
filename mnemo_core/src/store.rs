//! Entity store: the owned state container for decks, flashcards, study
//! sessions, aggregate statistics and the daily performance log.
//!
//! The store is an explicit value handed to (or held by) the caller, not a
//! process-wide singleton. Every mutation runs to completion under
//! `&mut self`, so no partial update is ever observable.

use crate::{
    CardDraft, CardPatch, Config, DailyPerformance, Deck, DeckDraft, DeckPatch, Error, Flashcard,
    Result, StudySession, UserStats,
};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// In-memory authoritative collections plus their derived aggregates
#[derive(Clone, Debug, Default)]
pub struct Store {
    pub(crate) decks: HashMap<Uuid, Deck>,
    pub(crate) cards: HashMap<Uuid, Flashcard>,
    pub(crate) sessions: HashMap<Uuid, StudySession>,
    pub(crate) stats: UserStats,
    pub(crate) performance: Vec<DailyPerformance>,
    /// Card ids that have already been counted towards
    /// `UserStats::mastered_cards`. Membership is permanent, even past card
    /// deletion, so the counter can never double-count or go back down.
    pub(crate) mastered: HashSet<Uuid>,
    pub(crate) config: Config,
}

impl Store {
    /// Create an empty store with the given configuration
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ========================================================================
    // Deck operations
    // ========================================================================

    /// Add a deck and return its generated id
    pub fn add_deck(&mut self, draft: DeckDraft) -> Uuid {
        self.add_deck_at(draft, Utc::now())
    }

    pub fn add_deck_at(&mut self, draft: DeckDraft, now: DateTime<Utc>) -> Uuid {
        let deck = Deck {
            id: Uuid::new_v4(),
            name: draft.name,
            description: draft.description,
            card_count: 0,
            color_tag: draft.color_tag,
            created_at: now,
            last_studied: None,
        };
        let id = deck.id;
        tracing::debug!("Added deck {} ({:?})", id, deck.name);
        self.decks.insert(id, deck);
        id
    }

    /// Merge the set fields of `patch` into an existing deck
    pub fn update_deck(&mut self, deck_id: Uuid, patch: DeckPatch) -> Result<()> {
        let deck = self
            .decks
            .get_mut(&deck_id)
            .ok_or(Error::DeckNotFound(deck_id))?;

        if let Some(name) = patch.name {
            deck.name = name;
        }
        if let Some(description) = patch.description {
            deck.description = description;
        }
        if let Some(color_tag) = patch.color_tag {
            deck.color_tag = color_tag;
        }
        Ok(())
    }

    /// Delete a deck and every flashcard it owns
    ///
    /// Deleting an unknown id is a no-op; the return value reports whether a
    /// deck was actually removed.
    pub fn delete_deck(&mut self, deck_id: Uuid) -> bool {
        if self.decks.remove(&deck_id).is_none() {
            return false;
        }
        let before = self.cards.len();
        self.cards.retain(|_, card| card.deck_id != deck_id);
        tracing::debug!(
            "Deleted deck {} and {} of its cards",
            deck_id,
            before - self.cards.len()
        );
        true
    }

    pub fn deck(&self, deck_id: Uuid) -> Option<&Deck> {
        self.decks.get(&deck_id)
    }

    /// All decks, oldest first (ties broken by id for a stable order)
    pub fn decks(&self) -> Vec<&Deck> {
        let mut decks: Vec<_> = self.decks.values().collect();
        decks.sort_by_key(|d| (d.created_at, d.id));
        decks
    }

    // ========================================================================
    // Flashcard operations
    // ========================================================================

    /// Add a flashcard to a deck and return its generated id
    ///
    /// The owning deck must exist; its `card_count` is incremented.
    pub fn add_flashcard(&mut self, deck_id: Uuid, draft: CardDraft) -> Result<Uuid> {
        let deck = self
            .decks
            .get_mut(&deck_id)
            .ok_or(Error::DeckNotFound(deck_id))?;

        let card = Flashcard {
            id: Uuid::new_v4(),
            front: draft.front,
            back: draft.back,
            deck_id,
            difficulty: draft.difficulty,
            last_reviewed: None,
            next_review: None,
            review_count: 0,
            success_rate: 0.0,
            tags: dedup_tags(draft.tags),
        };
        let id = card.id;
        deck.card_count += 1;
        self.cards.insert(id, card);
        tracing::debug!("Added card {} to deck {}", id, deck_id);
        Ok(id)
    }

    /// Merge the set fields of `patch` into an existing flashcard
    pub fn update_flashcard(&mut self, card_id: Uuid, patch: CardPatch) -> Result<()> {
        let card = self
            .cards
            .get_mut(&card_id)
            .ok_or(Error::CardNotFound(card_id))?;

        if let Some(front) = patch.front {
            card.front = front;
        }
        if let Some(back) = patch.back {
            card.back = back;
        }
        if let Some(difficulty) = patch.difficulty {
            card.difficulty = difficulty;
        }
        if let Some(tags) = patch.tags {
            card.tags = dedup_tags(tags);
        }
        Ok(())
    }

    /// Delete a flashcard, decrementing its deck's `card_count`
    ///
    /// Deleting an unknown id is a no-op; the return value reports whether a
    /// card was actually removed.
    pub fn delete_flashcard(&mut self, card_id: Uuid) -> bool {
        let Some(card) = self.cards.remove(&card_id) else {
            return false;
        };
        if let Some(deck) = self.decks.get_mut(&card.deck_id) {
            deck.card_count = deck.card_count.saturating_sub(1);
        }
        tracing::debug!("Deleted card {} from deck {}", card_id, card.deck_id);
        true
    }

    pub fn flashcard(&self, card_id: Uuid) -> Option<&Flashcard> {
        self.cards.get(&card_id)
    }

    /// Flashcards owned by a deck, sorted by id for a stable order
    pub fn flashcards_in_deck(&self, deck_id: Uuid) -> Vec<&Flashcard> {
        let mut cards: Vec<_> = self
            .cards
            .values()
            .filter(|c| c.deck_id == deck_id)
            .collect();
        cards.sort_by_key(|c| c.id);
        cards
    }

    // ========================================================================
    // Sessions, statistics and history
    // ========================================================================

    pub fn session(&self, session_id: Uuid) -> Option<&StudySession> {
        self.sessions.get(&session_id)
    }

    /// All recorded sessions, oldest first
    pub fn sessions(&self) -> Vec<&StudySession> {
        let mut sessions: Vec<_> = self.sessions.values().collect();
        sessions.sort_by_key(|s| (s.start_time, s.id));
        sessions
    }

    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    /// The per-day performance log, ascending by date
    pub fn performance(&self) -> &[DailyPerformance] {
        &self.performance
    }

    /// Whether a card has ever qualified as mastered
    pub fn is_mastered(&self, card_id: Uuid) -> bool {
        self.mastered.contains(&card_id)
    }

    // ========================================================================
    // Due-set query
    // ========================================================================

    /// Count the cards in a deck that are due for review now
    pub fn due_card_count(&self, deck_id: Uuid) -> u32 {
        self.due_card_count_at(deck_id, Utc::now())
    }

    /// Count the cards in a deck that are due at `now`
    ///
    /// A card that has never been scheduled is always due. Unknown deck ids
    /// simply count zero.
    pub fn due_card_count_at(&self, deck_id: Uuid, now: DateTime<Utc>) -> u32 {
        self.cards
            .values()
            .filter(|c| c.deck_id == deck_id && c.is_due(now))
            .count() as u32
    }
}

/// Drop repeated tags, keeping first occurrences in order
fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.into_iter().filter(|t| seen.insert(t.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Difficulty;
    use chrono::Duration;

    fn draft_deck(name: &str) -> DeckDraft {
        DeckDraft {
            name: name.into(),
            description: format!("{} deck", name),
            color_tag: "blue".into(),
        }
    }

    fn draft_card(front: &str) -> CardDraft {
        CardDraft {
            front: front.into(),
            back: format!("{} answer", front),
            difficulty: Difficulty::Medium,
            tags: vec![],
        }
    }

    #[test]
    fn test_card_count_tracks_population() {
        let mut store = Store::default();
        let deck_id = store.add_deck(draft_deck("Spanish"));

        let c1 = store.add_flashcard(deck_id, draft_card("hola")).unwrap();
        let c2 = store.add_flashcard(deck_id, draft_card("adios")).unwrap();
        store.add_flashcard(deck_id, draft_card("gracias")).unwrap();

        assert_eq!(store.deck(deck_id).unwrap().card_count, 3);
        assert_eq!(store.flashcards_in_deck(deck_id).len(), 3);

        assert!(store.delete_flashcard(c1));
        assert!(store.delete_flashcard(c2));
        assert_eq!(store.deck(deck_id).unwrap().card_count, 1);
        assert_eq!(store.flashcards_in_deck(deck_id).len(), 1);

        // Deleting the same card again changes nothing
        assert!(!store.delete_flashcard(c1));
        assert_eq!(store.deck(deck_id).unwrap().card_count, 1);
    }

    #[test]
    fn test_add_flashcard_requires_deck() {
        let mut store = Store::default();
        let result = store.add_flashcard(Uuid::new_v4(), draft_card("orphan"));
        assert!(matches!(result, Err(Error::DeckNotFound(_))));
        assert!(store.cards.is_empty());
    }

    #[test]
    fn test_delete_deck_cascades() {
        let mut store = Store::default();
        let keep_id = store.add_deck(draft_deck("Keep"));
        let drop_id = store.add_deck(draft_deck("Drop"));

        store.add_flashcard(keep_id, draft_card("kept")).unwrap();
        let doomed = store.add_flashcard(drop_id, draft_card("doomed")).unwrap();
        store.add_flashcard(drop_id, draft_card("doomed too")).unwrap();

        assert!(store.delete_deck(drop_id));
        assert!(store.deck(drop_id).is_none());
        assert!(store.flashcard(doomed).is_none());
        assert!(store.flashcards_in_deck(drop_id).is_empty());
        assert_eq!(store.due_card_count(drop_id), 0);

        // The other deck is untouched
        assert_eq!(store.deck(keep_id).unwrap().card_count, 1);
        assert_eq!(store.flashcards_in_deck(keep_id).len(), 1);
    }

    #[test]
    fn test_delete_unknown_deck_is_noop() {
        let mut store = Store::default();
        assert!(!store.delete_deck(Uuid::new_v4()));
    }

    #[test]
    fn test_update_deck_partial_merge() {
        let mut store = Store::default();
        let deck_id = store.add_deck(draft_deck("Old name"));

        store
            .update_deck(
                deck_id,
                DeckPatch {
                    name: Some("New name".into()),
                    ..DeckPatch::default()
                },
            )
            .unwrap();

        let deck = store.deck(deck_id).unwrap();
        assert_eq!(deck.name, "New name");
        assert_eq!(deck.description, "Old name deck"); // untouched

        let missing = store.update_deck(Uuid::new_v4(), DeckPatch::default());
        assert!(matches!(missing, Err(Error::DeckNotFound(_))));
    }

    #[test]
    fn test_update_flashcard_partial_merge() {
        let mut store = Store::default();
        let deck_id = store.add_deck(draft_deck("Deck"));
        let card_id = store.add_flashcard(deck_id, draft_card("front")).unwrap();

        store
            .update_flashcard(
                card_id,
                CardPatch {
                    difficulty: Some(Difficulty::Hard),
                    tags: Some(vec!["a".into(), "b".into(), "a".into()]),
                    ..CardPatch::default()
                },
            )
            .unwrap();

        let card = store.flashcard(card_id).unwrap();
        assert_eq!(card.difficulty, Difficulty::Hard);
        assert_eq!(card.tags, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(card.front, "front"); // untouched
        assert_eq!(card.review_count, 0);
    }

    #[test]
    fn test_due_card_count() {
        let mut store = Store::default();
        let deck_id = store.add_deck(draft_deck("Deck"));
        let now = Utc::now();

        assert_eq!(store.due_card_count_at(deck_id, now), 0);

        // Never-scheduled cards are always due
        let fresh = store.add_flashcard(deck_id, draft_card("fresh")).unwrap();
        assert_eq!(store.due_card_count_at(deck_id, now), 1);

        // Past and exactly-now schedules are due, future ones are not
        let past = store.add_flashcard(deck_id, draft_card("past")).unwrap();
        let future = store.add_flashcard(deck_id, draft_card("future")).unwrap();
        store.cards.get_mut(&past).unwrap().next_review = Some(now - Duration::hours(1));
        store.cards.get_mut(&future).unwrap().next_review = Some(now + Duration::hours(1));

        assert_eq!(store.due_card_count_at(deck_id, now), 2);
        assert!(store.flashcard(fresh).unwrap().is_due(now));
    }

    #[test]
    fn test_decks_listed_oldest_first() {
        let mut store = Store::default();
        let t0 = Utc::now();
        let second = store.add_deck_at(draft_deck("second"), t0 + Duration::minutes(1));
        let first = store.add_deck_at(draft_deck("first"), t0);

        let listed: Vec<Uuid> = store.decks().iter().map(|d| d.id).collect();
        assert_eq!(listed, vec![first, second]);
    }
}
