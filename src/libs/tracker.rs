//! Session manager: the start/pause/resume/stop state machine.
//!
//! `TimeTracker` owns the in-progress entry, the pause accounting, the
//! completed-entries history, the listener registry and the background
//! ticker. Elapsed time excludes paused intervals. State lives behind a
//! single lock that is never held across listener dispatch, backup I/O or
//! awaits.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use parking_lot::Mutex;
use thiserror::Error;

use crate::libs::backup::{
    BackupStore, SessionSnapshot, KEY_CURRENT_SESSION, KEY_TIME_ENTRIES,
};
use crate::libs::clock::Clock;
use crate::libs::config::TrackerConfig;
use crate::libs::listener::{ListenerSet, SessionEvent, SessionListener};
use crate::libs::messages::Message;
use crate::libs::ticker::{Ticker, TickerConfig};
use crate::libs::time_entry::{TimeEntry, TimeEntryError};
use crate::{msg_debug, msg_info, msg_warning};

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("a tracking session is already active")]
    AlreadyTracking,
    #[error("invalid activity: {0}")]
    InvalidActivity(#[from] TimeEntryError),
    #[error("background ticker halted after {0} consecutive failures")]
    TickerHalted(u32),
}

/// Everything guarded by the tracker's state lock.
struct SessionState {
    current_entry: Option<TimeEntry>,
    is_paused: bool,
    /// Start of the open pause. Set exactly when `is_paused` is true.
    pause_start: Option<DateTime<Utc>>,
    /// Sum of all completed pause intervals in the current session.
    total_paused: Duration,
    entries: Vec<TimeEntry>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current_entry: None,
            is_paused: false,
            pause_start: None,
            total_paused: Duration::zero(),
            entries: Vec::new(),
        }
    }
}

impl SessionState {
    /// Folds the open pause (if any) into `total_paused`.
    ///
    /// Taking `pause_start` here is what prevents the same pause interval
    /// from being counted twice: once folded, the open pause no longer
    /// exists.
    fn fold_open_pause(&mut self, now: DateTime<Utc>) {
        if let Some(pause_start) = self.pause_start.take() {
            self.total_paused += now - pause_start;
        }
    }

    /// Pause-excluded elapsed time of the current session. Read-only, the
    /// open pause is added without being folded.
    fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        let Some(entry) = &self.current_entry else {
            return Duration::zero();
        };

        let mut paused = self.total_paused;
        if let Some(pause_start) = self.pause_start {
            paused += now - pause_start;
        }

        let elapsed = (now - entry.start_time) - paused;
        elapsed.max(Duration::zero())
    }
}

/// Time tracking session manager.
///
/// Cheap to share: clones of the inner `Arc`s are handed to the ticker
/// task, so all public methods take `&self`.
pub struct TimeTracker {
    state: Arc<Mutex<SessionState>>,
    listeners: Arc<ListenerSet>,
    clock: Arc<dyn Clock>,
    store: Arc<dyn BackupStore>,
    config: TrackerConfig,
    ticker: Mutex<Option<Ticker>>,
}

impl TimeTracker {
    pub fn new(clock: Arc<dyn Clock>, store: Arc<dyn BackupStore>, config: TrackerConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::default())),
            listeners: Arc::new(ListenerSet::new()),
            clock,
            store,
            config,
            ticker: Mutex::new(None),
        }
    }

    /// Starts tracking `activity_id`.
    ///
    /// Fails with `AlreadyTracking` when a session is active, leaving that
    /// session untouched. On success the session snapshot is backed up, the
    /// `Started` event is dispatched and the background ticker is spawned.
    pub async fn start(&self, activity_id: &str) -> Result<TimeEntry, TrackerError> {
        let entry = {
            let mut state = self.state.lock();
            if state.current_entry.is_some() {
                return Err(TrackerError::AlreadyTracking);
            }

            let entry = TimeEntry::new(activity_id, self.clock.now())?;
            state.current_entry = Some(entry.clone());
            state.is_paused = false;
            state.pause_start = None;
            state.total_paused = Duration::zero();
            entry
        };

        self.backup_session();
        self.listeners.notify(&SessionEvent::Started(entry.clone()));
        self.spawn_ticker();

        Ok(entry)
    }

    /// Pauses the current session. Returns `false` (without any state
    /// change) when idle or already paused.
    pub fn pause(&self) -> bool {
        {
            let mut state = self.state.lock();
            if state.current_entry.is_none() || state.is_paused {
                return false;
            }
            state.is_paused = true;
            state.pause_start = Some(self.clock.now());
        }

        self.backup_session();
        self.listeners.notify(&SessionEvent::Paused);
        true
    }

    /// Resumes a paused session. Returns `false` (without any state change)
    /// when idle or not paused.
    pub fn resume(&self) -> bool {
        {
            let mut state = self.state.lock();
            if state.current_entry.is_none() || !state.is_paused {
                return false;
            }
            let now = self.clock.now();
            state.fold_open_pause(now);
            state.is_paused = false;
        }

        // A session restored while paused has no ticker yet.
        if self.ticker.lock().is_none() {
            self.spawn_ticker();
        }

        self.backup_session();
        self.listeners.notify(&SessionEvent::Resumed);
        true
    }

    /// Stops the current session and returns the completed entry.
    ///
    /// Returns `None` when idle. The ticker is stopped first (bounded
    /// wait), the entry is finalized and moved into the history, the
    /// session snapshot is cleared and the history is backed up.
    ///
    /// The finalized entry's duration is the pause-excluded working time:
    /// the end timestamp is set to `start + elapsed`, so paused intervals
    /// never inflate the history.
    pub async fn stop(&self) -> Option<TimeEntry> {
        let ticker = self.ticker.lock().take();
        if let Some(ticker) = ticker {
            ticker.stop(StdDuration::from_millis(self.config.stop_timeout)).await;
        }

        let entry = {
            let mut state = self.state.lock();
            let mut entry = state.current_entry.take()?;

            let now = self.clock.now();
            state.fold_open_pause(now);
            state.is_paused = false;

            // Net out the paused time; the entry still needs a strictly
            // later end timestamp even when the injected clock has not
            // advanced.
            let worked = ((now - entry.start_time) - state.total_paused).max(Duration::zero());
            let end = if worked > Duration::zero() {
                entry.start_time + worked
            } else {
                entry.start_time + Duration::milliseconds(1)
            };
            let finalized = entry.stop(end);
            debug_assert!(finalized.is_ok(), "entry finalization failed: {:?}", finalized);

            state.entries.push(entry.clone());
            state.total_paused = Duration::zero();
            entry
        };

        self.clear_session_backup();
        self.backup_entries();
        self.listeners.notify(&SessionEvent::Stopped(entry.clone()));

        Some(entry)
    }

    /// Pause-excluded elapsed time of the current session, zero when idle.
    pub fn elapsed(&self) -> Duration {
        self.state.lock().elapsed(self.clock.now())
    }

    pub fn is_tracking(&self) -> bool {
        self.state.lock().current_entry.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.state.lock().is_paused
    }

    pub fn current_entry(&self) -> Option<TimeEntry> {
        self.state.lock().current_entry.clone()
    }

    pub fn current_activity_id(&self) -> Option<String> {
        self.state
            .lock()
            .current_entry
            .as_ref()
            .map(|e| e.activity_id.clone())
    }

    /// Completed entries, oldest first.
    pub fn entries(&self) -> Vec<TimeEntry> {
        self.state.lock().entries.clone()
    }

    /// Completed entries for one activity, oldest first.
    pub fn entries_for_activity(&self, activity_id: &str) -> Vec<TimeEntry> {
        self.state
            .lock()
            .entries
            .iter()
            .filter(|e| e.activity_id == activity_id)
            .cloned()
            .collect()
    }

    /// Clears the completed-entries history and its backup.
    pub fn clear_entries(&self) {
        self.state.lock().entries.clear();
        if let Err(e) = self.store.clear(KEY_TIME_ENTRIES) {
            msg_warning!(Message::BackupClearFailed(
                KEY_TIME_ENTRIES.to_string(),
                e.to_string()
            ));
        }
    }

    /// Total time for one activity: completed entries plus the in-flight
    /// session when it tracks the same activity.
    pub fn total_for_activity(&self, activity_id: &str) -> Duration {
        let now = self.clock.now();
        let state = self.state.lock();
        let mut total = state
            .entries
            .iter()
            .filter(|e| e.activity_id == activity_id)
            .fold(Duration::zero(), |acc, e| acc + e.duration(now));

        if let Some(entry) = &state.current_entry {
            if entry.activity_id == activity_id {
                total += state.elapsed(now);
            }
        }
        total
    }

    /// Total time for entries started on `date` (UTC), including the
    /// in-flight session when it started that day.
    pub fn daily_total(&self, date: NaiveDate) -> Duration {
        let now = self.clock.now();
        let state = self.state.lock();
        let mut total = state
            .entries
            .iter()
            .filter(|e| e.start_time.date_naive() == date)
            .fold(Duration::zero(), |acc, e| acc + e.duration(now));

        if let Some(entry) = &state.current_entry {
            if entry.start_time.date_naive() == date {
                total += state.elapsed(now);
            }
        }
        total
    }

    pub fn add_listener(&self, listener: Arc<dyn SessionListener>) {
        self.listeners.add(listener);
    }

    pub fn remove_listener(&self, listener: &Arc<dyn SessionListener>) {
        self.listeners.remove(listener);
    }

    /// Surfaces a halted ticker as an error; `Ok` while healthy or idle.
    pub fn health(&self) -> Result<(), TrackerError> {
        let ticker = self.ticker.lock();
        match ticker.as_ref().and_then(|t| t.halted_failures()) {
            Some(failures) => Err(TrackerError::TickerHalted(failures)),
            None => Ok(()),
        }
    }

    /// Recovers state from the backup store.
    ///
    /// Restores the completed-entries history (skipping unreadable entries)
    /// and, when a session snapshot exists, the in-progress session. A
    /// corrupted snapshot is cleared rather than propagated. Returns whether
    /// an in-progress session was restored; when it was and `resume_ticker`
    /// is set, the background ticker is restarted.
    pub fn restore_from_backup(&self, resume_ticker: bool) -> Result<bool> {
        self.restore_entries();

        let snapshot = match self.store.restore(KEY_CURRENT_SESSION) {
            Ok(Some(value)) => match serde_json::from_value::<SessionSnapshot>(value) {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    msg_warning!(Message::SessionSnapshotCorrupted(e.to_string()));
                    self.clear_session_backup();
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                msg_warning!(Message::RestoreFailed(
                    KEY_CURRENT_SESSION.to_string(),
                    e.to_string()
                ));
                None
            }
        };

        let Some(snapshot) = snapshot else {
            return Ok(false);
        };

        if let Err(e) = snapshot.entry.validate() {
            msg_warning!(Message::SessionSnapshotCorrupted(e.to_string()));
            self.clear_session_backup();
            return Ok(false);
        }

        {
            let mut state = self.state.lock();
            if state.current_entry.is_some() {
                return Err(TrackerError::AlreadyTracking.into());
            }
            state.is_paused = snapshot.is_paused;
            state.pause_start = snapshot.pause_start;
            state.total_paused = Duration::milliseconds(snapshot.total_paused_ms);
            state.current_entry = Some(snapshot.entry.clone());
        }

        msg_info!(Message::SessionRestored(snapshot.entry.activity_id.clone()));

        // A paused session gets its ticker back on resume().
        if resume_ticker && !snapshot.is_paused {
            self.spawn_ticker();
        }

        Ok(true)
    }

    fn restore_entries(&self) {
        let value = match self.store.restore(KEY_TIME_ENTRIES) {
            Ok(Some(value)) => value,
            Ok(None) => return,
            Err(e) => {
                msg_warning!(Message::RestoreFailed(
                    KEY_TIME_ENTRIES.to_string(),
                    e.to_string()
                ));
                return;
            }
        };

        let raw: Vec<serde_json::Value> = match serde_json::from_value(value) {
            Ok(raw) => raw,
            Err(e) => {
                msg_warning!(Message::RestoreFailed(
                    KEY_TIME_ENTRIES.to_string(),
                    e.to_string()
                ));
                return;
            }
        };

        let mut restored = Vec::new();
        for item in raw {
            match serde_json::from_value::<TimeEntry>(item) {
                Ok(entry) => match entry.validate() {
                    Ok(()) => restored.push(entry),
                    Err(e) => msg_warning!(Message::EntryRestoreSkipped(e.to_string())),
                },
                Err(e) => msg_warning!(Message::EntryRestoreSkipped(e.to_string())),
            }
        }

        if !restored.is_empty() {
            msg_debug!(Message::EntriesRestored(restored.len()));
            self.state.lock().entries = restored;
        }
    }

    fn spawn_ticker(&self) {
        let ticker_config = TickerConfig {
            tick_interval: StdDuration::from_millis(self.config.tick_interval),
            retry_delay: StdDuration::from_millis(self.config.retry_delay),
            max_failures: self.config.max_tick_failures,
        };

        let state = Arc::clone(&self.state);
        let listeners = Arc::clone(&self.listeners);
        let clock = Arc::clone(&self.clock);
        let store = Arc::clone(&self.store);
        let backup_interval = Duration::seconds(self.config.backup_interval as i64);
        let mut last_backup = clock.now();

        let ticker = Ticker::spawn(ticker_config, move || {
            let now = clock.now();
            // Ticks are skipped, not queued, while idle or paused.
            let (elapsed, snapshot) = {
                let state = state.lock();
                if state.current_entry.is_none() || state.is_paused {
                    return Ok(());
                }
                (state.elapsed(now), snapshot_of(&state))
            };

            listeners.notify(&SessionEvent::Tick(elapsed));

            if now - last_backup >= backup_interval {
                if let Some(snapshot) = snapshot {
                    write_snapshot(store.as_ref(), &snapshot);
                }
                last_backup = now;
            }

            Ok(())
        });

        *self.ticker.lock() = Some(ticker);
    }

    fn backup_session(&self) {
        let snapshot = {
            let state = self.state.lock();
            snapshot_of(&state)
        };
        if let Some(snapshot) = snapshot {
            write_snapshot(self.store.as_ref(), &snapshot);
        }
    }

    fn clear_session_backup(&self) {
        if let Err(e) = self.store.clear(KEY_CURRENT_SESSION) {
            msg_warning!(Message::BackupClearFailed(
                KEY_CURRENT_SESSION.to_string(),
                e.to_string()
            ));
        }
    }

    fn backup_entries(&self) {
        let entries = self.state.lock().entries.clone();
        match serde_json::to_value(&entries) {
            Ok(value) => {
                if let Err(e) = self.store.backup(KEY_TIME_ENTRIES, &value) {
                    msg_warning!(Message::BackupFailed(
                        KEY_TIME_ENTRIES.to_string(),
                        e.to_string()
                    ));
                }
            }
            Err(e) => {
                msg_warning!(Message::BackupFailed(
                    KEY_TIME_ENTRIES.to_string(),
                    e.to_string()
                ));
            }
        }
    }
}

fn snapshot_of(state: &SessionState) -> Option<SessionSnapshot> {
    let entry = state.current_entry.clone()?;
    Some(SessionSnapshot {
        entry,
        is_paused: state.is_paused,
        pause_start: state.pause_start,
        total_paused_ms: state.total_paused.num_milliseconds(),
    })
}

fn write_snapshot(store: &dyn BackupStore, snapshot: &SessionSnapshot) {
    match serde_json::to_value(snapshot) {
        Ok(value) => {
            if let Err(e) = store.backup(KEY_CURRENT_SESSION, &value) {
                msg_warning!(Message::BackupFailed(
                    KEY_CURRENT_SESSION.to_string(),
                    e.to_string()
                ));
            }
        }
        Err(e) => {
            msg_warning!(Message::BackupFailed(
                KEY_CURRENT_SESSION.to_string(),
                e.to_string()
            ));
        }
    }
}
