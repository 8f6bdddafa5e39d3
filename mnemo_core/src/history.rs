//! Per-day performance log maintenance.
//!
//! The log holds one entry per calendar day, ascending by date, capped at
//! the most recent `max_days` entries. Session results for a day that is
//! already present are folded in with a weighted mean.

use crate::DailyPerformance;
use chrono::NaiveDate;

/// Success rate of one session contribution, scaled to 0-100
///
/// An empty session (`0/0`) is defined as rate 0 rather than a division
/// error.
pub fn contribution_rate(correct_answers: u32, cards_studied: u32) -> f64 {
    if cards_studied == 0 {
        0.0
    } else {
        correct_answers as f64 / cards_studied as f64 * 100.0
    }
}

/// Fold one session's results into the log under `date`
///
/// Absent dates are inserted in date order; present dates are merged with a
/// mean weighted by cards studied. Oldest entries drop once the log exceeds
/// `cap`.
pub fn record_day(
    log: &mut Vec<DailyPerformance>,
    date: NaiveDate,
    cards_studied: u32,
    correct_answers: u32,
    cap: usize,
) {
    let rate = contribution_rate(correct_answers, cards_studied);

    match log.iter_mut().find(|entry| entry.date == date) {
        Some(entry) => {
            let total = entry.cards_studied + cards_studied;
            entry.success_rate = if total == 0 {
                0.0
            } else {
                (entry.success_rate * entry.cards_studied as f64
                    + rate * cards_studied as f64)
                    / total as f64
            };
            entry.cards_studied = total;
        }
        None => {
            let at = log.partition_point(|entry| entry.date < date);
            log.insert(
                at,
                DailyPerformance {
                    date,
                    cards_studied,
                    success_rate: rate,
                },
            );
        }
    }

    while log.len() > cap {
        let dropped = log.remove(0);
        tracing::debug!("Dropped performance entry for {}", dropped.date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset)
    }

    #[test]
    fn test_contribution_rate() {
        assert_eq!(contribution_rate(3, 4), 75.0);
        assert_eq!(contribution_rate(0, 10), 0.0);
        assert_eq!(contribution_rate(0, 0), 0.0);
    }

    #[test]
    fn test_insert_new_day() {
        let mut log = Vec::new();
        record_day(&mut log, day(0), 10, 8, 30);

        assert_eq!(log.len(), 1);
        assert_eq!(log[0].cards_studied, 10);
        assert_eq!(log[0].success_rate, 80.0);
    }

    #[test]
    fn test_merge_existing_day_weighted_mean() {
        let mut log = Vec::new();
        record_day(&mut log, day(0), 10, 8, 30); // 80%
        record_day(&mut log, day(0), 30, 30, 30); // 100%

        assert_eq!(log.len(), 1);
        assert_eq!(log[0].cards_studied, 40);
        // (80*10 + 100*30) / 40 = 95
        assert_eq!(log[0].success_rate, 95.0);
    }

    #[test]
    fn test_empty_contribution_is_zero_rate() {
        let mut log = Vec::new();
        record_day(&mut log, day(0), 0, 0, 30);
        assert_eq!(log[0].cards_studied, 0);
        assert_eq!(log[0].success_rate, 0.0);

        // Merging another empty contribution stays defined
        record_day(&mut log, day(0), 0, 0, 30);
        assert_eq!(log[0].success_rate, 0.0);

        // A real contribution afterwards takes over the day's rate
        record_day(&mut log, day(0), 4, 3, 30);
        assert_eq!(log[0].cards_studied, 4);
        assert_eq!(log[0].success_rate, 75.0);
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut log = Vec::new();
        for offset in 0..31 {
            record_day(&mut log, day(offset), 1, 1, 30);
        }

        assert_eq!(log.len(), 30);
        assert_eq!(log[0].date, day(1)); // day(0) evicted
        assert_eq!(log[29].date, day(30));
    }

    #[test]
    fn test_backdated_entry_keeps_order() {
        let mut log = Vec::new();
        record_day(&mut log, day(5), 1, 1, 30);
        record_day(&mut log, day(1), 1, 1, 30);
        record_day(&mut log, day(3), 1, 1, 30);

        let dates: Vec<_> = log.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![day(1), day(3), day(5)]);
    }

    #[test]
    fn test_cap_of_one() {
        let mut log = Vec::new();
        record_day(&mut log, day(0), 5, 5, 1);
        record_day(&mut log, day(1), 7, 0, 1);

        assert_eq!(log.len(), 1);
        assert_eq!(log[0].date, day(1));
        assert_eq!(log[0].cards_studied, 7);
    }
}
