//! Database layer for flowstate
//!
//! This module provides the storage layer using SQLite with:
//! - Schema migrations
//! - Whole-store and per-day load/save of the task log

pub mod repo;
pub mod schema;

pub use repo::Database;
