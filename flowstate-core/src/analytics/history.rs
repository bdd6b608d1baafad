//! Archive listing: one summary row per logged day.

use super::aggregate::day_score;
use crate::types::{DayScore, TaskLogStore};
use serde::Serialize;

/// Summary of a single archived day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub date_key: String,
    pub score: DayScore,
}

/// Every day with at least one topic, newest first.
///
/// Days whose log was emptied by deletions are left out, unlike the browser
/// archive, which still lists them at 0%.
pub fn history(store: &TaskLogStore) -> Vec<HistoryEntry> {
    let mut keys: Vec<&str> = store
        .iter()
        .filter(|(_, day)| !day.is_empty())
        .map(|(key, _)| key)
        .collect();
    keys.sort_unstable_by(|a, b| b.cmp(a));

    keys.into_iter()
        .map(|key| HistoryEntry {
            date_key: key.to_string(),
            score: day_score(store, key),
        })
        .collect()
}
