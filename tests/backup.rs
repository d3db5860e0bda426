#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{Duration, TimeZone, Utc};
    use kairos::libs::backup::{
        BackupStore, JsonFileStore, MemoryStore, KEY_CURRENT_SESSION, KEY_TIME_ENTRIES,
    };
    use kairos::libs::clock::{Clock, ManualClock};
    use kairos::libs::config::TrackerConfig;
    use kairos::libs::tracker::TimeTracker;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct StorageTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for StorageTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            StorageTestContext { _temp_dir: temp_dir }
        }
    }

    /// A store whose every operation fails, to prove persistence stays
    /// best-effort.
    struct FailingStore;

    impl BackupStore for FailingStore {
        fn backup(&self, _key: &str, _value: &Value) -> Result<()> {
            anyhow::bail!("disk on fire")
        }
        fn restore(&self, _key: &str) -> Result<Option<Value>> {
            anyhow::bail!("disk on fire")
        }
        fn clear(&self, _key: &str) -> Result<()> {
            anyhow::bail!("disk on fire")
        }
    }

    fn manual_clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()))
    }

    fn tracker_with(clock: Arc<ManualClock>, store: Arc<dyn BackupStore>) -> TimeTracker {
        TimeTracker::new(clock as Arc<dyn Clock>, store, TrackerConfig::default())
    }

    #[test]
    fn test_memory_store_round_trip_and_clear() {
        let store = MemoryStore::new();

        assert!(store.restore("missing").unwrap().is_none());

        store.backup("key", &json!({"a": 1})).unwrap();
        assert_eq!(store.restore("key").unwrap(), Some(json!({"a": 1})));

        store.clear("key").unwrap();
        assert!(store.restore("key").unwrap().is_none());

        // Clearing a missing key is fine.
        store.clear("key").unwrap();
    }

    #[test_context(StorageTestContext)]
    #[test]
    fn test_json_file_store_round_trip(_ctx: &mut StorageTestContext) {
        let store = JsonFileStore::new();

        assert!(store.restore("state").unwrap().is_none());

        store.backup("state", &json!({"entries": [1, 2, 3]})).unwrap();
        assert_eq!(
            store.restore("state").unwrap(),
            Some(json!({"entries": [1, 2, 3]}))
        );

        store.clear("state").unwrap();
        assert!(store.restore("state").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_start_writes_session_snapshot() {
        let store = Arc::new(MemoryStore::new());
        let tracker = tracker_with(manual_clock(), store.clone());

        assert!(store.restore(KEY_CURRENT_SESSION).unwrap().is_none());
        tracker.start("demo").await.unwrap();
        assert!(store.restore(KEY_CURRENT_SESSION).unwrap().is_some());

        tracker.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_stop_clears_snapshot_and_backs_up_history() {
        let clock = manual_clock();
        let store = Arc::new(MemoryStore::new());
        let tracker = tracker_with(clock.clone(), store.clone());

        tracker.start("demo").await.unwrap();
        clock.advance(Duration::minutes(5));
        tracker.stop().await.unwrap();

        assert!(store.restore(KEY_CURRENT_SESSION).unwrap().is_none());
        let entries = store.restore(KEY_TIME_ENTRIES).unwrap().unwrap();
        assert_eq!(entries.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_restore_resumes_interrupted_session() {
        let clock = manual_clock();
        let store = Arc::new(MemoryStore::new());

        // First process: start, pause briefly, resume, then vanish without
        // stopping.
        {
            let tracker = tracker_with(clock.clone(), store.clone());
            tracker.start("demo").await.unwrap();
            clock.advance(Duration::seconds(10));
            tracker.pause();
            clock.advance(Duration::seconds(5));
            tracker.resume();
        }

        // Second process: picks the session up from the snapshot.
        let tracker = tracker_with(clock.clone(), store.clone());
        let restored = tracker.restore_from_backup(false).unwrap();
        assert!(restored);
        assert!(tracker.is_tracking());
        assert!(!tracker.is_paused());
        assert_eq!(tracker.current_activity_id().as_deref(), Some("demo"));
        assert_eq!(tracker.elapsed(), Duration::seconds(10));

        clock.advance(Duration::seconds(10));
        assert_eq!(tracker.elapsed(), Duration::seconds(20));
    }

    #[tokio::test]
    async fn test_restore_preserves_open_pause() {
        let clock = manual_clock();
        let store = Arc::new(MemoryStore::new());

        {
            let tracker = tracker_with(clock.clone(), store.clone());
            tracker.start("demo").await.unwrap();
            clock.advance(Duration::seconds(30));
            tracker.pause();
        }

        let tracker = tracker_with(clock.clone(), store.clone());
        tracker.restore_from_backup(false).unwrap();
        assert!(tracker.is_paused());

        // Time spent paused across the restart stays excluded.
        clock.advance(Duration::seconds(60));
        assert_eq!(tracker.elapsed(), Duration::seconds(30));

        // The restored session resumes normally.
        assert!(tracker.resume());
        clock.advance(Duration::seconds(10));
        assert_eq!(tracker.elapsed(), Duration::seconds(40));
        tracker.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_restore_recovers_completed_history() {
        let clock = manual_clock();
        let store = Arc::new(MemoryStore::new());

        {
            let tracker = tracker_with(clock.clone(), store.clone());
            tracker.start("demo").await.unwrap();
            clock.advance(Duration::minutes(20));
            tracker.stop().await.unwrap();
        }

        let tracker = tracker_with(clock.clone(), store.clone());
        let restored = tracker.restore_from_backup(false).unwrap();
        assert!(!restored); // no in-flight session
        assert_eq!(tracker.entries().len(), 1);
        assert_eq!(tracker.total_for_activity("demo"), Duration::minutes(20));
    }

    #[tokio::test]
    async fn test_corrupted_snapshot_is_cleared_not_fatal() {
        let store = Arc::new(MemoryStore::new());
        store
            .backup(KEY_CURRENT_SESSION, &json!({"garbage": true}))
            .unwrap();

        let tracker = tracker_with(manual_clock(), store.clone());
        let restored = tracker.restore_from_backup(false).unwrap();

        assert!(!restored);
        assert!(!tracker.is_tracking());
        assert!(store.restore(KEY_CURRENT_SESSION).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unreadable_history_entries_are_skipped() {
        let clock = manual_clock();
        let store = Arc::new(MemoryStore::new());

        {
            let tracker = tracker_with(clock.clone(), store.clone());
            tracker.start("demo").await.unwrap();
            clock.advance(Duration::minutes(5));
            tracker.stop().await.unwrap();
        }

        // Corrupt the history by appending junk next to the valid entry.
        let mut entries = store.restore(KEY_TIME_ENTRIES).unwrap().unwrap();
        entries.as_array_mut().unwrap().push(json!({"not": "an entry"}));
        store.backup(KEY_TIME_ENTRIES, &entries).unwrap();

        let tracker = tracker_with(clock.clone(), store.clone());
        tracker.restore_from_backup(false).unwrap();
        assert_eq!(tracker.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_failing_store_never_interrupts_tracking() {
        let clock = manual_clock();
        let tracker = tracker_with(clock.clone(), Arc::new(FailingStore));

        tracker.start("demo").await.unwrap();
        clock.advance(Duration::seconds(10));
        tracker.pause();
        tracker.resume();
        assert_eq!(tracker.elapsed(), Duration::seconds(10));

        let stopped = tracker.stop().await.unwrap();
        assert!(stopped.end_time.is_some());

        // Restore from the broken store degrades to an empty state.
        let tracker = tracker_with(clock.clone(), Arc::new(FailingStore));
        let restored = tracker.restore_from_backup(false).unwrap();
        assert!(!restored);
        assert!(tracker.entries().is_empty());
    }
}
