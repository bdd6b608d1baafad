//! Per-day completion counts.
//!
//! These are the building blocks for the weekly series, the heatmap, and
//! the streak calculations. Absent and empty days always count as zero.

use crate::dates::{add_days, to_date_key};
use crate::types::{DayScore, TaskLogStore};
use chrono::NaiveDate;
use serde::Serialize;

/// Completed-topic count for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    /// `YYYY-MM-DD` key of the day
    pub date_key: String,
    /// Number of completed topics on that day
    pub completed_count: usize,
}

/// Whether the day has at least one completed topic.
pub fn is_date_active(store: &TaskLogStore, date_key: &str) -> bool {
    store.day(date_key).iter().any(|t| t.done)
}

/// Number of completed topics on the day; 0 when absent.
pub fn completed_count(store: &TaskLogStore, date_key: &str) -> usize {
    store.day(date_key).iter().filter(|t| t.done).count()
}

/// Counts for `num_days` consecutive days starting at `start`, oldest first.
pub fn build_range(store: &TaskLogStore, start: NaiveDate, num_days: usize) -> Vec<DayCount> {
    (0..num_days)
        .map(|offset| {
            let date_key = to_date_key(add_days(start, offset as i64));
            let completed_count = completed_count(store, &date_key);
            DayCount {
                date_key,
                completed_count,
            }
        })
        .collect()
}

/// Completion score for a single day.
pub fn day_score(store: &TaskLogStore, date_key: &str) -> DayScore {
    let day = store.day(date_key);
    DayScore::new(day.len(), day.iter().filter(|t| t.done).count())
}

/// `(total_tasks, total_completed)` across every day in the store.
pub fn totals(store: &TaskLogStore) -> (usize, usize) {
    store.iter().fold((0, 0), |(total, completed), (_, day)| {
        (
            total + day.len(),
            completed + day.iter().filter(|t| t.done).count(),
        )
    })
}
