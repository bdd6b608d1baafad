//! Analytics for flowstate
//!
//! Derives completion totals, day streaks, the weekly bar series and the
//! year heatmap from a [`TaskLogStore`](crate::types::TaskLogStore).
//!
//! Data flows one way:
//! - [`aggregate`] counts completed topics per day and over date ranges
//! - [`streak`] finds current and best runs of active days
//! - [`snapshot`] composes both into an [`AnalyticsSnapshot`]
//! - [`history`] lists per-day scores for the archive
//!
//! Every function here is pure. "Today" is always a parameter; only the
//! binaries read the wall clock.

pub mod aggregate;
pub mod history;
pub mod snapshot;
pub mod streak;

pub use aggregate::{build_range, completed_count, day_score, is_date_active, DayCount};
pub use history::{history, HistoryEntry};
pub use snapshot::{
    compute_snapshot, compute_snapshot_with, AnalyticsSnapshot, SnapshotOptions, WeeklyEntry,
    HEATMAP_WEEKS, WEEKLY_DAYS,
};
pub use streak::{best_streak, current_streak, current_streak_with_grace, StreakInfo};
