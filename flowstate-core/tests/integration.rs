//! Integration tests for flowstate-core
//!
//! Exercises the store, database and analytics layers together the way the
//! binaries use them: load from disk, mutate, save, compute a snapshot.

use chrono::{Datelike, NaiveDate, Weekday};
use flowstate_core::analytics::{
    compute_snapshot, compute_snapshot_with, current_streak, SnapshotOptions, HEATMAP_WEEKS,
};
use flowstate_core::dates::{add_days, parse_date_key, to_date_key};
use flowstate_core::{merge_local_into_remote, Database, FlowDocument, TaskLogStore};
use proptest::prelude::*;
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
}

fn key(offset: i64) -> String {
    to_date_key(add_days(today(), offset))
}

/// Store with one completed topic on each of the given day offsets.
fn store_with_active(offsets: &[i64]) -> TaskLogStore {
    let mut store = TaskLogStore::new();
    for &offset in offsets {
        let index = store.add_task(&key(offset), "focus", "").unwrap();
        store.toggle_task(&key(offset), index).unwrap();
    }
    store
}

fn open_db(dir: &TempDir) -> Database {
    let db = Database::open(&dir.path().join("nested/flowstate.db")).expect("open database");
    db.migrate().expect("migrate database");
    db
}

// ============================================
// Database round trips
// ============================================

#[test]
fn test_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let store = store_with_active(&[-3, -1, 0]);

    {
        let db = open_db(&dir);
        db.save_store(&store).unwrap();
    }

    let db = open_db(&dir);
    let loaded = db.load_store().unwrap();
    assert_eq!(loaded, store);
    assert_eq!(
        compute_snapshot(&loaded, today()),
        compute_snapshot(&store, today())
    );
}

#[test]
fn test_toggle_persisted_through_save_day() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);

    let mut store = db.load_store().unwrap();
    store.add_task(&key(0), "Plan week #planning", "").unwrap();
    store.add_task(&key(0), "Gym", "").unwrap();
    db.save_day(&key(0), store.day(&key(0))).unwrap();

    let mut store = db.load_store().unwrap();
    store.toggle_task(&key(0), 1).unwrap();
    db.save_day(&key(0), store.day(&key(0))).unwrap();

    let store = db.load_store().unwrap();
    let day = store.day(&key(0));
    assert_eq!(day[0].text, "Plan week #planning");
    assert!(!day[0].done);
    assert!(day[1].done);
    assert_eq!(current_streak(&store, today()), 1);
}

#[test]
fn test_import_merges_browser_document() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    db.save_store(&store_with_active(&[-5, -4])).unwrap();

    let json = format!(
        r#"{{"sessions": {{"{}": [{{"text": "from browser", "desc": "", "done": true}}]}}, "theme": "light"}}"#,
        key(-4)
    );
    let local = FlowDocument::from_json(&json).unwrap();

    let merged = merge_local_into_remote(&db.load_store().unwrap(), &local.sessions);
    db.save_store(&merged).unwrap();

    let store = db.load_store().unwrap();
    assert_eq!(store.day(&key(-5)).len(), 1);
    assert_eq!(store.day(&key(-4))[0].text, "from browser");
}

// ============================================
// Analytics properties
// ============================================

#[test]
fn test_zero_state_snapshot() {
    let snapshot = compute_snapshot(&TaskLogStore::new(), today());
    assert_eq!(snapshot.total_completed, 0);
    assert_eq!(snapshot.success_rate, 0);
    assert_eq!(snapshot.best_streak, 0);
    assert_eq!(snapshot.current_streak, 0);
    assert_eq!(snapshot.weekly.len(), 7);
    assert_eq!(snapshot.heatmap.len(), HEATMAP_WEEKS);
    assert!(snapshot.heatmap.iter().all(|w| w.len() == 7));
}

#[test]
fn test_success_rate_one_of_three() {
    let mut store = TaskLogStore::new();
    for text in ["a", "b", "c"] {
        store.add_task(&key(0), text, "").unwrap();
    }
    store.toggle_task(&key(0), 0).unwrap();
    assert_eq!(compute_snapshot(&store, today()).success_rate, 33);
}

#[test]
fn test_grace_period() {
    assert_eq!(current_streak(&store_with_active(&[-1]), today()), 1);
    assert_eq!(current_streak(&store_with_active(&[-2]), today()), 0);
}

#[test]
fn test_best_and_current_streak_diverge() {
    let store = store_with_active(&[-10, -9, -8, -1, 0]);
    let snapshot = compute_snapshot(&store, today());
    assert_eq!(snapshot.best_streak, 3);
    assert_eq!(snapshot.current_streak, 2);
}

#[test]
fn test_snapshot_does_not_mutate_store() {
    let mut store = store_with_active(&[-2, -1]);
    store.add_task(&key(0), "open", "").unwrap();
    let before = store.clone();

    let first = compute_snapshot(&store, today());
    let second = compute_snapshot(&store, today());
    assert_eq!(first, second);
    assert_eq!(store, before);
}

#[test]
fn test_undone_only_day_is_inactive() {
    let mut store = TaskLogStore::new();
    for i in 0..5 {
        store.add_task(&key(0), &format!("topic {i}"), "").unwrap();
    }
    let snapshot = compute_snapshot(&store, today());
    assert_eq!(snapshot.total_completed, 0);
    assert_eq!(snapshot.current_streak, 0);
    assert_eq!(snapshot.weekly[6].date_key, key(0));
    assert_eq!(snapshot.weekly[6].completed_count, 0);
}

proptest! {
    #[test]
    fn heatmap_rows_start_on_week_start(days in 0i64..40_000, monday in any::<bool>()) {
        let today = add_days(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(), days);
        let week_start = if monday { Weekday::Mon } else { Weekday::Sun };
        let options = SnapshotOptions { week_start, ..Default::default() };

        let snapshot = compute_snapshot_with(&TaskLogStore::new(), today, &options);

        prop_assert_eq!(snapshot.heatmap.len(), HEATMAP_WEEKS);
        for week in &snapshot.heatmap {
            let first = parse_date_key(&week[0].date_key).unwrap();
            prop_assert_eq!(first.weekday(), week_start);
        }
        let today_key = to_date_key(today);
        prop_assert!(snapshot.heatmap.iter().flatten().any(|d| d.date_key == today_key));
    }

    #[test]
    fn weekly_window_ends_today(days in 0i64..40_000) {
        let today = add_days(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(), days);
        let snapshot = compute_snapshot(&TaskLogStore::new(), today);

        prop_assert_eq!(snapshot.weekly.len(), 7);
        prop_assert_eq!(&snapshot.weekly[6].date_key, &to_date_key(today));
        prop_assert_eq!(&snapshot.weekly[0].date_key, &to_date_key(add_days(today, -6)));
    }
}
