//! Session event listeners with panic isolation.
//!
//! Observers register a `SessionListener` to hear about session lifecycle
//! changes and ticks. Dispatch is isolated: a panicking listener is caught,
//! logged and evicted so one bad observer cannot take down the tracker or
//! starve the others.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use chrono::Duration;
use parking_lot::Mutex;

use crate::libs::messages::Message;
use crate::libs::time_entry::TimeEntry;
use crate::{msg_debug, msg_warning};

/// A session lifecycle event delivered to listeners.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Tracking started for the contained entry.
    Started(TimeEntry),
    /// Tracking stopped; the entry carries its final end timestamp.
    Stopped(TimeEntry),
    Paused,
    Resumed,
    /// Periodic tick with the current pause-excluded elapsed time.
    Tick(Duration),
}

/// Observer of session lifecycle events.
///
/// All methods default to no-ops so implementors only override what they
/// care about. Callbacks run on the dispatching thread (the ticker task for
/// `on_tick`) and should return quickly.
pub trait SessionListener: Send + Sync {
    fn on_start(&self, _entry: &TimeEntry) {}
    fn on_stop(&self, _entry: &TimeEntry) {}
    fn on_pause(&self) {}
    fn on_resume(&self) {}
    fn on_tick(&self, _elapsed: Duration) {}
}

/// Registered listeners plus the eviction bookkeeping.
///
/// Holds its own lock, separate from the session state, so dispatch never
/// runs while the tracker's state lock is held.
#[derive(Default)]
pub struct ListenerSet {
    listeners: Mutex<Vec<Arc<dyn SessionListener>>>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener. Adding the same `Arc` twice is a no-op.
    pub fn add(&self, listener: Arc<dyn SessionListener>) {
        let mut listeners = self.listeners.lock();
        if listeners.iter().any(|l| Arc::ptr_eq(l, &listener)) {
            return;
        }
        listeners.push(listener);
    }

    /// Unregisters a listener. Removing an unknown listener is a no-op.
    pub fn remove(&self, listener: &Arc<dyn SessionListener>) {
        self.listeners.lock().retain(|l| !Arc::ptr_eq(l, listener));
    }

    pub fn len(&self) -> usize {
        self.listeners.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.lock().is_empty()
    }

    /// Delivers `event` to every registered listener.
    ///
    /// Dispatch happens on a snapshot of the registration list, so listeners
    /// may add or remove listeners from inside a callback without
    /// deadlocking. A listener that panics is evicted immediately and does
    /// not see further events; the remaining listeners are unaffected.
    pub fn notify(&self, event: &SessionEvent) {
        let snapshot: Vec<Arc<dyn SessionListener>> = self.listeners.lock().clone();

        for listener in snapshot {
            let result = catch_unwind(AssertUnwindSafe(|| match event {
                SessionEvent::Started(entry) => listener.on_start(entry),
                SessionEvent::Stopped(entry) => listener.on_stop(entry),
                SessionEvent::Paused => listener.on_pause(),
                SessionEvent::Resumed => listener.on_resume(),
                SessionEvent::Tick(elapsed) => listener.on_tick(*elapsed),
            }));

            if let Err(payload) = result {
                msg_warning!(Message::ListenerPanicked(panic_message(&payload)));
                self.remove(&listener);
                msg_debug!(Message::ListenerEvicted);
            }
        }
    }
}

fn panic_message(payload: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
