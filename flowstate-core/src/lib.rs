//! # flowstate-core
//!
//! Core library for flowstate - a daily focus-topic tracker.
//!
//! This library provides:
//! - Domain types for topics, daily logs and the task log store
//! - Date helpers working on local calendar days
//! - Analytics: completion rate, day streaks, weekly series, year heatmap
//! - Database storage layer with SQLite
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use flowstate_core::analytics::compute_snapshot;
//! use flowstate_core::TaskLogStore;
//!
//! let mut store = TaskLogStore::new();
//! let index = store.add_task("2024-06-12", "Draft #report", "").unwrap();
//! store.toggle_task("2024-06-12", index).unwrap();
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
//! let snapshot = compute_snapshot(&store, today);
//! assert_eq!(snapshot.current_streak, 1);
//! assert_eq!(snapshot.success_rate, 100);
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use store::merge_local_into_remote;
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod logging;
pub mod store;
pub mod types;
