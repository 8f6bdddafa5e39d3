//! Study session lifecycle: start, finalize, and fold results into the
//! per-day performance log and the global statistics.

use crate::{history, Error, Result, Store, StudySession};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// What one finalized session contributed to the aggregates
#[derive(Clone, Debug)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub deck_id: Uuid,
    pub duration_minutes: f64,
    pub cards_studied: u32,
    pub correct_answers: u32,
    /// This session's success rate, scaled to 0-100 (`0/0` counts as 0)
    pub success_rate: f64,
}

/// Open a study session against a deck and return its id
///
/// Several sessions may be open at the same time; each runs as an
/// independent state machine keyed by its id.
pub fn start_study_session(store: &mut Store, deck_id: Uuid) -> Result<Uuid> {
    start_study_session_at(store, deck_id, Utc::now())
}

pub fn start_study_session_at(
    store: &mut Store,
    deck_id: Uuid,
    now: DateTime<Utc>,
) -> Result<Uuid> {
    if !store.decks.contains_key(&deck_id) {
        return Err(Error::DeckNotFound(deck_id));
    }

    let session = StudySession {
        id: Uuid::new_v4(),
        deck_id,
        start_time: now,
        end_time: None,
        cards_studied: 0,
        correct_answers: 0,
    };
    let id = session.id;
    store.sessions.insert(id, session);
    tracing::debug!("Started session {} for deck {}", id, deck_id);
    Ok(id)
}

/// Finalize a study session with the caller's tallies
///
/// Sets the session's end time and counters, stamps the owning deck's
/// `last_studied`, folds the results into today's performance entry (keyed
/// by the UTC calendar date of `now`) and adds the session duration to the
/// total study time.
///
/// A session can be ended exactly once: repeat calls are rejected with
/// [`Error::SessionAlreadyEnded`] and touch no aggregate, so downstream
/// totals are never double-counted.
pub fn end_study_session(
    store: &mut Store,
    session_id: Uuid,
    cards_studied: u32,
    correct_answers: u32,
) -> Result<SessionSummary> {
    end_study_session_at(store, session_id, cards_studied, correct_answers, Utc::now())
}

pub fn end_study_session_at(
    store: &mut Store,
    session_id: Uuid,
    cards_studied: u32,
    correct_answers: u32,
    now: DateTime<Utc>,
) -> Result<SessionSummary> {
    let session = store
        .sessions
        .get_mut(&session_id)
        .ok_or(Error::SessionNotFound(session_id))?;

    if session.end_time.is_some() {
        return Err(Error::SessionAlreadyEnded(session_id));
    }
    if correct_answers > cards_studied {
        return Err(Error::InvalidArgument(format!(
            "{} correct answers out of {} cards studied",
            correct_answers, cards_studied
        )));
    }

    let duration_minutes = (now - session.start_time).num_milliseconds() as f64 / 60_000.0;
    session.end_time = Some(now);
    session.cards_studied = cards_studied;
    session.correct_answers = correct_answers;
    let deck_id = session.deck_id;

    match store.decks.get_mut(&deck_id) {
        Some(deck) => deck.last_studied = Some(now),
        // The deck may have been deleted while the session was open
        None => tracing::warn!("Session {} ended for missing deck {}", session_id, deck_id),
    }

    history::record_day(
        &mut store.performance,
        now.date_naive(),
        cards_studied,
        correct_answers,
        store.config.history.max_days,
    );
    store.stats.total_study_time += duration_minutes;

    tracing::info!(
        "Ended session {}: {}/{} correct in {:.1} min",
        session_id,
        correct_answers,
        cards_studied,
        duration_minutes
    );

    Ok(SessionSummary {
        session_id,
        deck_id,
        duration_minutes,
        cards_studied,
        correct_answers,
        success_rate: history::contribution_rate(correct_answers, cards_studied),
    })
}
