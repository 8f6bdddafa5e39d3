//! Core domain types for the mnemo flashcard system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Decks and flashcards with their scheduling metadata
//! - Study sessions
//! - Aggregate user statistics and the per-day performance log
//! - Draft/patch inputs for the CRUD surface

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Deck Types
// ============================================================================

/// A named collection of flashcards
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Deck {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Number of flashcards owned by this deck. Maintained by the store on
    /// every card add/delete; always equals the actual card population.
    pub card_count: u32,
    pub color_tag: String,
    pub created_at: DateTime<Utc>,
    pub last_studied: Option<DateTime<Utc>>,
}

/// Input for creating a deck; the store fills in id, timestamps and counts
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeckDraft {
    pub name: String,
    pub description: String,
    pub color_tag: String,
}

/// Partial update for the user-editable deck fields
///
/// `card_count`, `created_at` and `last_studied` are owned by the core and
/// cannot be patched.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DeckPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color_tag: Option<String>,
}

// ============================================================================
// Flashcard Types
// ============================================================================

/// Difficulty rating assigned to a flashcard by its author
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A front/back question-answer pair with scheduling metadata
///
/// Review state (`last_reviewed`, `next_review`, `review_count`,
/// `success_rate`) is mutated only by the review scheduler. A card belongs
/// to exactly one deck and is never reassigned.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: Uuid,
    pub front: String,
    pub back: String,
    pub deck_id: Uuid,
    pub difficulty: Difficulty,
    pub last_reviewed: Option<DateTime<Utc>>,
    pub next_review: Option<DateTime<Utc>>,
    pub review_count: u32,
    /// Running mean of per-review outcomes, scaled to 0-100
    pub success_rate: f64,
    pub tags: Vec<String>,
}

impl Flashcard {
    /// Whether the card is due at `now`: never reviewed, or scheduled at or
    /// before `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.next_review {
            None => true,
            Some(at) => at <= now,
        }
    }
}

/// Input for creating a flashcard; review state starts zeroed
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardDraft {
    pub front: String,
    pub back: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update for the authored card fields
///
/// `deck_id` and the review state are not patchable: cards are never
/// reassigned between decks, and scheduling data belongs to the scheduler.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CardPatch {
    pub front: Option<String>,
    pub back: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub tags: Option<Vec<String>>,
}

// ============================================================================
// Session and Statistics Types
// ============================================================================

/// A bounded interval of study activity against one deck
///
/// Open while `end_time` is `None`. Multiple sessions may be open at once;
/// each is tracked independently by id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StudySession {
    pub id: Uuid,
    pub deck_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub cards_studied: u32,
    pub correct_answers: u32,
}

impl StudySession {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}

/// Aggregate statistics across all decks, updated incrementally after every
/// review and every session end; never recomputed from scratch.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct UserStats {
    /// Consecutive study days. Stored and reported but never recomputed by
    /// this crate (see DESIGN.md).
    pub streak_days: u32,
    pub total_cards_studied: u64,
    /// Total study time in minutes, fractional
    pub total_study_time: f64,
    pub mastered_cards: u32,
    /// Running mean over all-time review outcomes, scaled to 0-100
    pub average_success_rate: f64,
}

/// One calendar day of aggregated study performance
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DailyPerformance {
    pub date: NaiveDate,
    pub cards_studied: u32,
    pub success_rate: f64,
}
