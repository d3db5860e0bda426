//! Current session status command.
//!
//! Shows the in-flight session (if any) from the backup snapshot without
//! resuming its ticker, so `status` can run alongside a foreground `track`
//! process or after a crash.

use crate::{
    libs::{
        activity::ActivityCatalog,
        backup::JsonFileStore,
        clock::SystemClock,
        config::Config,
        formatter::format_duration_hms,
        messages::Message,
        tracker::TimeTracker,
    },
    msg_print,
};
use anyhow::Result;
use std::sync::Arc;

pub async fn cmd() -> Result<()> {
    let config = Config::read()?;
    let store = Arc::new(JsonFileStore::new());
    let catalog = ActivityCatalog::new(store.clone());
    let tracker = TimeTracker::new(Arc::new(SystemClock), store, config.tracker());

    // Read-only view: the snapshot is loaded but the ticker stays down.
    let restored = tracker.restore_from_backup(false)?;

    if !restored {
        msg_print!(Message::StatusIdle);
        return Ok(());
    }

    let entry = match tracker.current_entry() {
        Some(entry) => entry,
        None => {
            msg_print!(Message::StatusIdle);
            return Ok(());
        }
    };

    let activity = catalog
        .get(&entry.activity_id)
        .map(|a| a.name)
        .unwrap_or(entry.activity_id);

    msg_print!(Message::StatusHeader, true);
    msg_print!(Message::TrackingStarted(activity));
    msg_print!(Message::ElapsedTime(format_duration_hms(&tracker.elapsed())));
    if tracker.is_paused() {
        msg_print!(Message::TrackingPaused);
    }

    Ok(())
}
