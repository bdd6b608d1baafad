//! Full analytics payload for the history view.
//!
//! [`compute_snapshot`] is a pure function of the store and "today": it
//! reads no clock, caches nothing, and never mutates the store, so the same
//! inputs always give the same snapshot.

use super::aggregate::{build_range, totals, DayCount};
use super::streak::{streak_info, DEFAULT_GRACE_DAYS};
use crate::dates::{add_days, start_of_week, weekday_label};
use crate::types::{rounded_percentage, TaskLogStore};
use chrono::{NaiveDate, Weekday};
use serde::Serialize;

/// Number of days in the weekly bar chart.
pub const WEEKLY_DAYS: usize = 7;

/// Number of week rows in the heatmap (52 full weeks plus the partial one).
pub const HEATMAP_WEEKS: usize = 53;

/// Knobs for snapshot computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotOptions {
    /// Weekday every heatmap row starts on
    pub week_start: Weekday,
    /// Days without activity before the current streak breaks
    pub grace_days: i64,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            week_start: Weekday::Sun,
            grace_days: DEFAULT_GRACE_DAYS,
        }
    }
}

/// One bar of the weekly chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyEntry {
    /// Short weekday name ("Mon")
    pub day_label: &'static str,
    pub date_key: String,
    pub completed_count: usize,
}

/// Everything the history view shows, derived from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsSnapshot {
    /// Sum of completed topics across all days
    pub total_completed: usize,
    /// Number of topics logged across all days
    pub total_tasks: usize,
    /// `round(100 * completed / total)`, 0 with no topics
    pub success_rate: u32,
    /// Longest run of consecutive active days
    pub best_streak: usize,
    /// Run of active days ending today or within the grace period
    pub current_streak: usize,
    /// The 7 days ending today, oldest first
    pub weekly: Vec<WeeklyEntry>,
    /// 53 week rows of 7 days each, oldest first, week-aligned
    pub heatmap: Vec<Vec<DayCount>>,
}

impl AnalyticsSnapshot {
    /// Largest daily count in the weekly series (at least 1, for scaling bars).
    pub fn weekly_max(&self) -> usize {
        self.weekly
            .iter()
            .map(|d| d.completed_count)
            .max()
            .unwrap_or(0)
            .max(1)
    }
}

/// Compute the snapshot with default options (Sunday-aligned weeks,
/// one-day grace period).
pub fn compute_snapshot(store: &TaskLogStore, today: NaiveDate) -> AnalyticsSnapshot {
    compute_snapshot_with(store, today, &SnapshotOptions::default())
}

/// Compute the snapshot with explicit options.
pub fn compute_snapshot_with(
    store: &TaskLogStore,
    today: NaiveDate,
    options: &SnapshotOptions,
) -> AnalyticsSnapshot {
    let (total_tasks, total_completed) = totals(store);
    let streaks = streak_info(store, today, options.grace_days);

    let snapshot = AnalyticsSnapshot {
        total_completed,
        total_tasks,
        success_rate: rounded_percentage(total_completed, total_tasks),
        best_streak: streaks.best,
        current_streak: streaks.current,
        weekly: weekly_series(store, today),
        heatmap: heatmap_grid(store, today, options.week_start),
    };

    tracing::debug!(
        today = %today,
        total_tasks,
        total_completed,
        best_streak = snapshot.best_streak,
        current_streak = snapshot.current_streak,
        "Computed analytics snapshot"
    );

    snapshot
}

/// The 7 days ending today, labelled by weekday.
pub fn weekly_series(store: &TaskLogStore, today: NaiveDate) -> Vec<WeeklyEntry> {
    let start = add_days(today, -(WEEKLY_DAYS as i64 - 1));
    build_range(store, start, WEEKLY_DAYS)
        .into_iter()
        .enumerate()
        .map(|(offset, day)| WeeklyEntry {
            day_label: weekday_label(add_days(start, offset as i64)),
            date_key: day.date_key,
            completed_count: day.completed_count,
        })
        .collect()
}

/// First day of the heatmap window: 52 weeks back from today, rolled back
/// to the nearest `week_start`.
pub fn heatmap_window_start(today: NaiveDate, week_start: Weekday) -> NaiveDate {
    let raw_start = add_days(today, -(52 * 7) + 1);
    start_of_week(raw_start, week_start)
}

/// 53 consecutive week rows starting at [`heatmap_window_start`].
pub fn heatmap_grid(store: &TaskLogStore, today: NaiveDate, week_start: Weekday) -> Vec<Vec<DayCount>> {
    let start = heatmap_window_start(today, week_start);
    (0..HEATMAP_WEEKS)
        .map(|week| build_range(store, add_days(start, week as i64 * 7), 7))
        .collect()
}
