//! Display implementation for kairos application messages.
//!
//! Provides the `Display` trait implementation for the `Message` enum,
//! converting structured message data into human-readable text for terminal
//! output. All user-facing text lives here, in one place, so wording stays
//! consistent and parameters are interpolated with compile-time checking.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === ACTIVITY MESSAGES ===
            Message::ActivityCreated(name) => format!("Activity '{}' created successfully.", name),
            Message::ActivityDeleted(name) => format!("Activity '{}' deleted successfully.", name),
            Message::ActivityNotFound(name) => format!("Activity '{}' not found.", name),
            Message::ActivityAlreadyExists(name) => format!("Activity '{}' already exists.", name),
            Message::NoActivitiesFound => "No activities found.".to_string(),
            Message::ActivitiesHeader => "Activities:".to_string(),
            Message::ConfirmDeleteActivity(name) => format!("Delete activity '{}'?", name),
            Message::CreateActivityFirst => "Create activities with 'kairos activity new'".to_string(),

            // === TRACKING MESSAGES ===
            Message::TrackingStarted(name) => format!("Started tracking '{}'", name),
            Message::TrackingStopped(duration) => format!("Tracking stopped. Session duration: {}", duration),
            Message::TrackingAlreadyActive => "Time tracking is already active. Stop the current session first.".to_string(),
            Message::TrackingNotActive => "No tracking session is active.".to_string(),
            Message::TrackingPaused => "Tracking paused".to_string(),
            Message::TrackingResumed => "Tracking resumed".to_string(),
            Message::TrackingForeground => "Tracking in foreground... Press Ctrl+C to stop.".to_string(),
            Message::TrackingStopRequested => "Received Ctrl+C, stopping session...".to_string(),
            Message::ElapsedTime(elapsed) => format!("Elapsed: {}", elapsed),

            // === SESSION RECOVERY MESSAGES ===
            Message::SessionRestored(activity_id) => format!("Restored in-flight session for activity {}", activity_id),
            Message::SessionSnapshotCorrupted(error) => format!("Session snapshot is corrupted and was cleared: {}", error),
            Message::EntriesRestored(count) => format!("Restored {} time entries from backup", count),
            Message::EntryRestoreSkipped(error) => format!("Skipped unreadable time entry: {}", error),

            // === TICKER MESSAGES ===
            Message::TickFailed { attempt, error } => format!("Tick failed (attempt {}): {}", attempt, error),
            Message::TickerHalted(count) => format!("Ticker halted after {} consecutive failures", count),
            Message::TickerStopTimeout => "Ticker did not stop in time and was abandoned".to_string(),

            // === LISTENER MESSAGES ===
            Message::ListenerPanicked(payload) => format!("Listener panicked: {}", payload),
            Message::ListenerEvicted => "Listener evicted from registry after failure".to_string(),

            // === BACKUP MESSAGES ===
            Message::BackupFailed(key, error) => format!("Failed to back up '{}': {}", key, error),
            Message::RestoreFailed(key, error) => format!("Failed to restore '{}': {}", key, error),
            Message::BackupClearFailed(key, error) => format!("Failed to clear backup '{}': {}", key, error),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigParseError => "Failed to parse configuration".to_string(),
            Message::ConfigSaveError => "Failed to save configuration".to_string(),
            Message::ConfigModuleTracker => "Tracker settings".to_string(),

            // === REPORT MESSAGES ===
            Message::ReportHeader(date) => format!("Report for {}", date),
            Message::NoEntriesForDate(date) => format!("No time entries found for {}.", date),
            Message::DailyTotal(duration) => format!("Total tracked: {}", duration),
            Message::ActivityTotal(name, duration) => format!("{}: {}", name, duration),

            // === STATUS MESSAGES ===
            Message::StatusHeader => "Current session:".to_string(),
            Message::StatusIdle => "No session in progress.".to_string(),

            // === PROMPTS ===
            Message::PromptActivityName => "Activity name".to_string(),
            Message::PromptActivityCategory => "Category".to_string(),
            Message::PromptActivityDescription => "Description (optional)".to_string(),
            Message::PromptTickInterval => "Enter tick interval (milliseconds)".to_string(),
            Message::PromptRetryDelay => "Enter tick retry delay (milliseconds)".to_string(),
            Message::PromptMaxTickFailures => "Enter maximum consecutive tick failures".to_string(),
            Message::PromptBackupInterval => "Enter backup interval (seconds)".to_string(),
            Message::PromptStopTimeout => "Enter ticker stop timeout (milliseconds)".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
            Message::InvalidInput => "Invalid input provided".to_string(),
        };

        write!(f, "{}", text)
    }
}
