//! Day-streak calculation.
//!
//! A streak is a run of consecutive calendar days that each have at least
//! one completed topic. The current streak survives a grace period: with the
//! default of one day, a streak ending yesterday is still alive today.

use super::aggregate::is_date_active;
use crate::dates::{add_days, days_between, parse_date_key};
use crate::types::TaskLogStore;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// Days a streak may go without activity before it is considered broken.
pub const DEFAULT_GRACE_DAYS: i64 = 1;

/// Streak summary for a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreakInfo {
    /// Run of active days ending at the most recent active day, if that
    /// day is within the grace period of today
    pub current: usize,
    /// Longest run of active days ever recorded
    pub best: usize,
}

/// Active dates in the store, chronologically ordered.
///
/// Keys that are not canonical `YYYY-MM-DD` dates are skipped.
pub fn active_dates(store: &TaskLogStore) -> BTreeSet<NaiveDate> {
    store
        .iter()
        .filter(|(key, _)| is_date_active(store, key))
        .filter_map(|(key, _)| match parse_date_key(key) {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::debug!(key, error = %e, "Skipping malformed date key");
                None
            }
        })
        .collect()
}

/// Current streak with the default one-day grace period.
pub fn current_streak(store: &TaskLogStore, today: NaiveDate) -> usize {
    current_streak_with_grace(store, today, DEFAULT_GRACE_DAYS)
}

/// Current streak, allowing up to `grace_days` without activity since the
/// most recent active day.
pub fn current_streak_with_grace(store: &TaskLogStore, today: NaiveDate, grace_days: i64) -> usize {
    current_from(&active_dates(store), today, grace_days)
}

/// Longest run of consecutive active days; 0 when nothing is completed.
pub fn best_streak(store: &TaskLogStore) -> usize {
    best_from(&active_dates(store))
}

/// Both streaks in one pass over the store.
pub fn streak_info(store: &TaskLogStore, today: NaiveDate, grace_days: i64) -> StreakInfo {
    let active = active_dates(store);
    StreakInfo {
        current: current_from(&active, today, grace_days),
        best: best_from(&active),
    }
}

fn current_from(active: &BTreeSet<NaiveDate>, today: NaiveDate, grace_days: i64) -> usize {
    // Days after "today" never count toward the current streak
    let Some(&latest) = active.range(..=today).next_back() else {
        return 0;
    };

    if days_between(today, latest) > grace_days {
        return 0;
    }

    let mut streak = 0;
    let mut day = latest;
    while active.contains(&day) {
        streak += 1;
        let prev = add_days(day, -1);
        if prev == day {
            break;
        }
        day = prev;
    }
    streak
}

fn best_from(active: &BTreeSet<NaiveDate>) -> usize {
    let mut best = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;

    for &date in active {
        run = match prev {
            Some(p) if days_between(date, p) == 1 => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(date);
    }

    best
}
