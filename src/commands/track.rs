//! Foreground time tracking command.
//!
//! Starts a session for the named activity and keeps it in the foreground,
//! printing the pause-excluded elapsed time once per tick, until Ctrl+C
//! stops it. An in-flight session left behind by a crash is picked up and
//! resumed instead of starting fresh.

use crate::{
    libs::{
        activity::ActivityCatalog,
        backup::JsonFileStore,
        clock::SystemClock,
        config::Config,
        formatter::format_duration_hms,
        listener::SessionListener,
        messages::Message,
        time_entry::TimeEntry,
        tracker::{TimeTracker, TrackerError},
    },
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::Duration;
use clap::Args;
use std::io::Write;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct TrackArgs {
    /// Activity name to track. Optional when resuming a recovered session.
    activity: Option<String>,
}

/// Prints tick and lifecycle output for a foreground session.
struct ConsoleListener;

impl SessionListener for ConsoleListener {
    fn on_tick(&self, elapsed: Duration) {
        print!("\r⏱  {}", format_duration_hms(&elapsed));
        let _ = std::io::stdout().flush();
    }

    fn on_pause(&self) {
        println!();
        msg_print!(Message::TrackingPaused);
    }

    fn on_resume(&self) {
        msg_print!(Message::TrackingResumed);
    }

    fn on_stop(&self, _entry: &TimeEntry) {
        println!();
    }
}

pub async fn cmd(args: TrackArgs) -> Result<()> {
    let config = Config::read()?;
    let store = Arc::new(JsonFileStore::new());
    let catalog = ActivityCatalog::new(store.clone());
    let tracker = TimeTracker::new(Arc::new(SystemClock), store, config.tracker());

    tracker.add_listener(Arc::new(ConsoleListener));

    // A crashed process may have left a session snapshot behind. Resume it
    // with its ticker instead of starting a new entry.
    let restored = tracker.restore_from_backup(true)?;

    if !restored {
        let Some(name) = args.activity.as_deref() else {
            msg_error!(Message::TrackingNotActive);
            msg_info!(Message::CreateActivityFirst);
            return Ok(());
        };

        let Some(activity) = catalog.find_by_name(name) else {
            msg_error!(Message::ActivityNotFound(name.to_string()));
            msg_info!(Message::CreateActivityFirst);
            return Ok(());
        };

        match tracker.start(&activity.id).await {
            Ok(_) => msg_success!(Message::TrackingStarted(activity.name)),
            Err(TrackerError::AlreadyTracking) => {
                msg_error!(Message::TrackingAlreadyActive);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
    }

    msg_print!(Message::TrackingForeground);
    tokio::signal::ctrl_c().await?;
    msg_print!(Message::TrackingStopRequested, true);

    let elapsed = tracker.elapsed();
    if tracker.stop().await.is_some() {
        msg_success!(Message::TrackingStopped(format_duration_hms(&elapsed)));
    }

    Ok(())
}
