//! Review scheduling: deciding when a card is due again.
//!
//! Planning is pure (`plan_review`), so the interval arithmetic can be
//! tested without a store; `record_review` applies a plan to the store and
//! folds the outcome into the aggregate user statistics.
//!
//! The policy is a fixed heuristic, not SM-2: a per-difficulty base
//! interval, stretched when the card's running success rate is high and
//! shortened when it is low, with a one-day retry after a wrong answer.

use crate::{Difficulty, Error, Flashcard, Result, SchedulerConfig, Store};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// The card state computed for one review outcome
#[derive(Clone, Debug)]
pub struct ReviewPlan {
    pub review_count: u32,
    pub success_rate: f64,
    /// Interval until the next review, in (possibly fractional) days
    pub interval_days: f64,
    pub next_review: DateTime<Utc>,
}

/// Compute the post-review state of a card
///
/// The new success rate is the running mean of per-review binary outcomes
/// scaled to 0-100. After a wrong answer the card comes back in
/// `relearn_interval_days` regardless of difficulty or rate.
pub fn plan_review(
    card: &Flashcard,
    was_correct: bool,
    now: DateTime<Utc>,
    config: &SchedulerConfig,
) -> ReviewPlan {
    let n = card.review_count as f64;
    let outcome = if was_correct { 100.0 } else { 0.0 };
    let success_rate = (card.success_rate * n + outcome) / (n + 1.0);

    let interval_days = if was_correct {
        let base = match card.difficulty {
            Difficulty::Easy => config.easy_interval_days,
            Difficulty::Medium => config.medium_interval_days,
            Difficulty::Hard => config.hard_interval_days,
        };
        if success_rate > config.boost_threshold {
            base * config.boost_factor
        } else if success_rate < config.slump_threshold {
            base * config.slump_factor
        } else {
            base
        }
    } else {
        config.relearn_interval_days
    };

    ReviewPlan {
        review_count: card.review_count + 1,
        success_rate,
        interval_days,
        next_review: now + days_to_duration(interval_days),
    }
}

/// Fractional days, rounded to whole seconds
fn days_to_duration(days: f64) -> Duration {
    Duration::seconds((days * 86_400.0).round() as i64)
}

/// Record a review outcome for a card
///
/// Persists the new card state and updates the aggregate statistics:
/// `total_cards_studied`, the all-time `average_success_rate` running mean,
/// and `mastered_cards` the first time a card clears both mastery
/// thresholds. A card counts towards mastery at most once, and the counter
/// never goes back down.
pub fn record_review(store: &mut Store, card_id: Uuid, was_correct: bool) -> Result<ReviewPlan> {
    record_review_at(store, card_id, was_correct, Utc::now())
}

pub fn record_review_at(
    store: &mut Store,
    card_id: Uuid,
    was_correct: bool,
    now: DateTime<Utc>,
) -> Result<ReviewPlan> {
    let card = store
        .cards
        .get_mut(&card_id)
        .ok_or(Error::CardNotFound(card_id))?;

    let plan = plan_review(card, was_correct, now, &store.config.scheduler);

    card.last_reviewed = Some(now);
    card.next_review = Some(plan.next_review);
    card.review_count = plan.review_count;
    card.success_rate = plan.success_rate;

    // Running mean over all-time reviews, weighted by the pre-increment total
    let total = store.stats.total_cards_studied as f64;
    let outcome = if was_correct { 100.0 } else { 0.0 };
    store.stats.average_success_rate =
        (store.stats.average_success_rate * total + outcome) / (total + 1.0);
    store.stats.total_cards_studied += 1;

    let scheduler = &store.config.scheduler;
    if plan.success_rate >= scheduler.mastery_rate
        && plan.review_count >= scheduler.mastery_reviews
        && store.mastered.insert(card_id)
    {
        store.stats.mastered_cards += 1;
        tracing::info!(
            "Card {} mastered ({} reviews at {:.1}%)",
            card_id,
            plan.review_count,
            plan.success_rate
        );
    }

    tracing::debug!(
        "Reviewed card {}: correct={}, next in {:.2} days",
        card_id,
        was_correct,
        plan.interval_days
    );
    Ok(plan)
}
