//! Time duration formatting utilities for user-friendly display.
//!
//! Converts time durations into the string representations used across
//! reports, tables and tick output. Two formats are supported: "HH:MM" for
//! report totals and "HH:MM:SS" for live session display. Negative
//! durations are clamped to zero rather than shown.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// A time entry pre-formatted for table display.
///
/// Stores string representations so table rendering and export need no
/// further formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedEntry {
    /// Sequential number for ordering within a listing.
    pub id: i32,
    /// Activity name (or id when the name is unknown).
    pub activity: String,
    /// Formatted start time, e.g. "09:00".
    pub start: String,
    /// Formatted end time, or "-" while the entry is running.
    pub end: String,
    /// Formatted duration, e.g. "01:30:00", or "--:--:--" when unknown.
    pub duration: String,
}

/// Formats a `chrono::Duration` into a "HH:MM" string.
///
/// Hours and minutes are zero-padded; seconds are dropped; negative
/// durations render as "00:00".
pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;

    format!("{:02}:{:02}", hours.max(0), mins.max(0))
}

/// Formats a `chrono::Duration` into a "HH:MM:SS" string.
///
/// Used for live elapsed-time display where second precision matters.
pub fn format_duration_hms(duration: &Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);
    let hours = total_seconds / 3600;
    let mins = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}
