//! Database repository layer
//!
//! Loads and saves the task log. The analytics layer never talks to the
//! database; callers load a [`TaskLogStore`], compute on it, and write
//! changed days back.

use crate::error::Result;
use crate::types::{DailyLog, TaskLogStore, TaskRecord};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// SQLite-backed storage for the task log
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        tracing::debug!(path = %path.display(), "Opened database");

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run migrations on this database
    pub fn migrate(&self) -> Result<()> {
        let conn = self.lock();
        super::schema::run_migrations(&conn)
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ============================================
    // Reads
    // ============================================

    /// Load the whole task log.
    pub fn load_store(&self) -> Result<TaskLogStore> {
        let conn = self.lock();

        let mut store = TaskLogStore::new();
        let mut stmt = conn.prepare("SELECT date FROM days")?;
        let days = stmt.query_map([], |row| row.get::<_, String>(0))?;
        for day in days {
            store.insert_day(day?, Vec::new());
        }

        let mut stmt = conn.prepare(
            "SELECT date, text, description, done FROM tasks ORDER BY date, position",
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, parse_task_row(row)?)))?;

        let mut grouped: Vec<(String, DailyLog)> = Vec::new();
        for row in rows {
            let (date, task) = row?;
            match grouped.last_mut() {
                Some((last, day)) if *last == date => day.push(task),
                _ => grouped.push((date, vec![task])),
            }
        }
        for (date, day) in grouped {
            store.insert_day(date, day);
        }

        tracing::debug!(days = store.len(), "Loaded task log");
        Ok(store)
    }

    // ============================================
    // Writes
    // ============================================

    /// Replace the stored log for one day.
    pub fn save_day(&self, date_key: &str, day: &[TaskRecord]) -> Result<()> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        write_day(&tx, date_key, day)?;
        tx.commit()?;
        Ok(())
    }

    /// Replace the entire stored task log with `store`.
    pub fn save_store(&self, store: &TaskLogStore) -> Result<()> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM tasks", [])?;
        tx.execute("DELETE FROM days", [])?;
        for (date_key, day) in store.iter() {
            write_day(&tx, date_key, day)?;
        }
        tx.commit()?;

        tracing::info!(days = store.len(), "Saved task log");
        Ok(())
    }

    /// Remove a day and all of its topics. Returns whether it existed.
    pub fn delete_day(&self, date_key: &str) -> Result<bool> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM tasks WHERE date = ?1", params![date_key])?;
        let removed = tx.execute("DELETE FROM days WHERE date = ?1", params![date_key])?;
        tx.commit()?;
        Ok(removed > 0)
    }

    /// Remove every day.
    pub fn clear(&self) -> Result<()> {
        let conn = self.lock();
        conn.execute_batch("DELETE FROM tasks; DELETE FROM days;")?;
        tracing::info!("Cleared task log");
        Ok(())
    }
}

fn write_day(conn: &Connection, date_key: &str, day: &[TaskRecord]) -> Result<()> {
    conn.execute("DELETE FROM tasks WHERE date = ?1", params![date_key])?;
    conn.execute(
        "INSERT OR IGNORE INTO days (date) VALUES (?1)",
        params![date_key],
    )?;

    let mut stmt = conn.prepare(
        "INSERT INTO tasks (date, position, text, description, done) VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for (position, task) in day.iter().enumerate() {
        stmt.execute(params![
            date_key,
            position as i64,
            task.text,
            task.description,
            task.done as i32,
        ])?;
    }
    Ok(())
}

fn parse_task_row(row: &Row) -> rusqlite::Result<TaskRecord> {
    let done: i32 = row.get("done")?;
    Ok(TaskRecord {
        text: row.get("text")?,
        description: row.get("description")?,
        done: done != 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.migrate().unwrap();
        db
    }

    fn sample_store() -> TaskLogStore {
        let mut store = TaskLogStore::new();
        store.add_task("2024-08-01", "First", "notes").unwrap();
        store.add_task("2024-08-01", "Second #tag", "").unwrap();
        store.toggle_task("2024-08-01", 1).unwrap();
        store.add_task("2024-08-03", "Third", "").unwrap();
        store
    }

    #[test]
    fn test_save_and_load_store() {
        let db = test_db();
        let store = sample_store();
        db.save_store(&store).unwrap();

        let loaded = db.load_store().unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn test_positions_preserve_insertion_order() {
        let db = test_db();
        let mut store = TaskLogStore::new();
        for text in ["c", "a", "b"] {
            store.add_task("2024-08-01", text, "").unwrap();
        }
        db.save_store(&store).unwrap();

        let loaded = db.load_store().unwrap();
        let texts: Vec<_> = loaded.day("2024-08-01").iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["c", "a", "b"]);
    }

    #[test]
    fn test_empty_day_round_trips() {
        let db = test_db();
        let mut store = sample_store();
        store.remove_task("2024-08-03", 0).unwrap();
        db.save_store(&store).unwrap();

        let loaded = db.load_store().unwrap();
        assert!(loaded.contains_day("2024-08-03"));
        assert!(loaded.day("2024-08-03").is_empty());
    }

    #[test]
    fn test_save_day_replaces_only_that_day() {
        let db = test_db();
        db.save_store(&sample_store()).unwrap();

        let replacement = vec![TaskRecord::new("Replaced", "")];
        db.save_day("2024-08-01", &replacement).unwrap();

        let loaded = db.load_store().unwrap();
        assert_eq!(loaded.day("2024-08-01"), replacement.as_slice());
        assert_eq!(loaded.day("2024-08-03").len(), 1);
    }

    #[test]
    fn test_delete_day_and_clear() {
        let db = test_db();
        db.save_store(&sample_store()).unwrap();

        assert!(db.delete_day("2024-08-01").unwrap());
        assert!(!db.delete_day("2024-08-01").unwrap());
        assert_eq!(db.load_store().unwrap().len(), 1);

        db.clear().unwrap();
        assert!(db.load_store().unwrap().is_empty());
    }
}
