//! Mutations of the in-memory task log.
//!
//! The analytics layer only ever reads a [`TaskLogStore`]; these are the
//! operations the application uses to change one between reads.

use crate::dates::parse_date_key;
use crate::error::{Error, Result};
use crate::types::{TaskLogStore, TaskRecord};

impl TaskLogStore {
    /// Append a new open topic to a day and return its index.
    ///
    /// The text is trimmed; blank topics are rejected.
    pub fn add_task(&mut self, date_key: &str, text: &str, description: &str) -> Result<usize> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyTopic);
        }

        let day = self.days_mut().entry(date_key.to_string()).or_default();
        day.push(TaskRecord::new(text, description));
        tracing::debug!(date_key, index = day.len() - 1, "Added topic");
        Ok(day.len() - 1)
    }

    /// Flip a topic's `done` flag in place and return the new value.
    pub fn toggle_task(&mut self, date_key: &str, index: usize) -> Result<bool> {
        let task = self
            .days_mut()
            .get_mut(date_key)
            .and_then(|day| day.get_mut(index))
            .ok_or_else(|| Error::TaskNotFound {
                date: date_key.to_string(),
                index,
            })?;
        task.done = !task.done;
        Ok(task.done)
    }

    /// Remove a topic and return it.
    ///
    /// The date key stays in the store even if its log becomes empty.
    pub fn remove_task(&mut self, date_key: &str, index: usize) -> Result<TaskRecord> {
        match self.days_mut().get_mut(date_key) {
            Some(day) if index < day.len() => Ok(day.remove(index)),
            _ => Err(Error::TaskNotFound {
                date: date_key.to_string(),
                index,
            }),
        }
    }

    /// Drop a whole day. Returns whether the key existed.
    pub fn delete_day(&mut self, date_key: &str) -> bool {
        self.days_mut().remove(date_key).is_some()
    }

    /// Forget every day.
    pub fn clear_all(&mut self) {
        self.days_mut().clear();
    }

    /// Indices of a day's topics in display order: open topics first, then
    /// completed ones, each group in insertion order.
    ///
    /// The stored order is never changed by toggling.
    pub fn display_order(&self, date_key: &str) -> Vec<usize> {
        let day = self.day(date_key);
        let mut order: Vec<usize> = (0..day.len()).collect();
        order.sort_by_key(|&i| day[i].done);
        order
    }
}

/// Merge a pre-login local store into the remote one.
///
/// Top-level last-write-wins: for every date present locally the local log
/// replaces the remote log; remote-only dates are kept as-is. Local keys
/// that are not canonical `YYYY-MM-DD` dates are dropped.
pub fn merge_local_into_remote(remote: &TaskLogStore, local: &TaskLogStore) -> TaskLogStore {
    let mut merged = remote.clone();
    let mut skipped = 0;
    for (key, day) in local.iter() {
        if let Err(e) = parse_date_key(key) {
            tracing::warn!(key, error = %e, "Skipping day with malformed date key");
            skipped += 1;
            continue;
        }
        merged.insert_day(key, day.to_vec());
    }
    tracing::info!(
        remote_days = remote.len(),
        local_days = local.len(),
        skipped,
        merged_days = merged.len(),
        "Merged local task log into remote"
    );
    merged
}
