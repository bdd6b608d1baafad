//! Core domain types for flowstate
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Topic** | A single focus item the user logged for a day ([`TaskRecord`]) |
//! | **Date key** | Canonical `YYYY-MM-DD` string naming a local calendar day |
//! | **Daily log** | The ordered topics for one date key ([`DailyLog`]) |
//! | **Store** | Every daily log, keyed by date ([`TaskLogStore`]) |
//! | **Active date** | A date with at least one completed topic |
//!
//! The store is the only input the analytics functions read. It is owned by
//! whoever loaded it (database, imported document) and passed by reference;
//! nothing in [`crate::analytics`] holds on to it between calls.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\w+").unwrap());

// ============================================
// Task records
// ============================================

/// One focus topic logged for a day.
///
/// Records have no identity beyond their position in the day's sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Display text, may contain `#tag` tokens
    pub text: String,
    /// Optional free-text notes (empty when unset)
    #[serde(rename = "desc", default)]
    pub description: String,
    /// Whether the topic has been completed
    #[serde(default)]
    pub done: bool,
}

impl TaskRecord {
    /// Create a new, not yet completed, topic.
    pub fn new(text: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            description: description.into(),
            done: false,
        }
    }

    /// Tags embedded in the topic text, in order of appearance.
    pub fn tags(&self) -> Vec<&str> {
        extract_tags(&self.text)
    }
}

/// All `#tag` tokens in `text`, in order of appearance.
pub fn extract_tags(text: &str) -> Vec<&str> {
    TAG_REGEX.find_iter(text).map(|m| m.as_str()).collect()
}

/// Ordered topics for a single date, in insertion order.
pub type DailyLog = Vec<TaskRecord>;

// ============================================
// Store
// ============================================

/// Mapping from date key to that day's topics.
///
/// Keys are kept in a `BTreeMap` so serialization is stable, but callers
/// must not rely on iteration order; the analytics code sorts on its own.
/// A key mapped to an empty log is equivalent to an absent key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskLogStore {
    days: BTreeMap<String, DailyLog>,
}

impl TaskLogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Topics for a date key; empty when the key is absent.
    pub fn day(&self, date_key: &str) -> &[TaskRecord] {
        self.days.get(date_key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the key exists at all (even with an empty log).
    pub fn contains_day(&self, date_key: &str) -> bool {
        self.days.contains_key(date_key)
    }

    /// Iterate over `(date_key, topics)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TaskRecord])> {
        self.days.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of date keys.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Replace the whole log for a date key.
    pub fn insert_day(&mut self, date_key: impl Into<String>, log: DailyLog) -> Option<DailyLog> {
        self.days.insert(date_key.into(), log)
    }

    /// Unique tags used on a day, in first-seen order.
    pub fn day_tags(&self, date_key: &str) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for tag in self.day(date_key).iter().flat_map(TaskRecord::tags) {
            if !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
        tags
    }

    pub(crate) fn days_mut(&mut self) -> &mut BTreeMap<String, DailyLog> {
        &mut self.days
    }
}

// ============================================
// Persisted document
// ============================================

/// The document shape the browser app keeps in local storage and in the
/// remote document store.
///
/// Only `sessions` matters to flowstate; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowDocument {
    #[serde(default)]
    pub sessions: TaskLogStore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl FlowDocument {
    /// Parse a document from its JSON text.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the document as pretty-printed JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ============================================
// Scores
// ============================================

/// Completion summary for a single day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayScore {
    /// Number of topics logged
    pub total: usize,
    /// Number of completed topics
    pub completed: usize,
    /// `round(100 * completed / total)`, 0 when nothing was logged
    pub percentage: u32,
}

impl DayScore {
    pub fn new(total: usize, completed: usize) -> Self {
        Self {
            total,
            completed,
            percentage: rounded_percentage(completed, total),
        }
    }
}

/// Integer percentage rounded half up; 0 when `total` is 0.
pub fn rounded_percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * part + total) / (2 * total)) as u32
}
