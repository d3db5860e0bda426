//! Time entry model: one start-to-stop tracking interval.
//!
//! A `TimeEntry` is created when tracking starts, mutated exactly once when
//! tracking stops (the end timestamp is set), and immutable afterwards. The
//! session manager owns the entry until stop, then moves it into the
//! completed-entries history.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Maximum length of the free-form notes field, in characters.
pub const NOTES_MAX_LEN: usize = 500;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeEntryError {
    #[error("activity id cannot be empty")]
    EmptyActivityId,
    #[error("notes cannot exceed {NOTES_MAX_LEN} characters")]
    NotesTooLong,
    #[error("end time must be after start time")]
    EndBeforeStart,
    #[error("time entry is already stopped")]
    AlreadyStopped,
}

/// A single tracked interval for an activity.
///
/// Invariant: when `end_time` is set it is strictly after `start_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Opaque unique identifier (UUID v4).
    pub id: String,
    /// Identifier of the tracked activity. Weak reference, never validated
    /// against the catalog here.
    pub activity_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Free-form notes, at most `NOTES_MAX_LEN` characters.
    pub notes: Option<String>,
}

impl TimeEntry {
    /// Creates a new running entry starting at `start_time`.
    pub fn new(activity_id: &str, start_time: DateTime<Utc>) -> Result<Self, TimeEntryError> {
        if activity_id.trim().is_empty() {
            return Err(TimeEntryError::EmptyActivityId);
        }

        Ok(TimeEntry {
            id: Uuid::new_v4().to_string(),
            activity_id: activity_id.to_string(),
            start_time,
            end_time: None,
            notes: None,
        })
    }

    /// Re-validates an entry, e.g. after deserializing from a backup.
    pub fn validate(&self) -> Result<(), TimeEntryError> {
        if self.activity_id.trim().is_empty() {
            return Err(TimeEntryError::EmptyActivityId);
        }
        if let Some(end) = self.end_time {
            if end <= self.start_time {
                return Err(TimeEntryError::EndBeforeStart);
            }
        }
        if let Some(notes) = &self.notes {
            if notes.chars().count() > NOTES_MAX_LEN {
                return Err(TimeEntryError::NotesTooLong);
            }
        }
        Ok(())
    }

    /// True while the entry has no end timestamp.
    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    /// Stops the entry by setting its end timestamp.
    ///
    /// Fails if the entry is already stopped or `end_time` is not strictly
    /// after the start.
    pub fn stop(&mut self, end_time: DateTime<Utc>) -> Result<(), TimeEntryError> {
        if self.end_time.is_some() {
            return Err(TimeEntryError::AlreadyStopped);
        }
        if end_time <= self.start_time {
            return Err(TimeEntryError::EndBeforeStart);
        }
        self.end_time = Some(end_time);
        Ok(())
    }

    /// Sets or replaces the notes, enforcing the length limit.
    pub fn set_notes(&mut self, notes: &str) -> Result<(), TimeEntryError> {
        if notes.chars().count() > NOTES_MAX_LEN {
            return Err(TimeEntryError::NotesTooLong);
        }
        self.notes = Some(notes.to_string());
        Ok(())
    }

    /// Gross duration of the entry: `(end or now) - start`.
    ///
    /// For a running entry the caller supplies `now` from its clock; the
    /// model itself never reads the wall clock.
    pub fn duration(&self, now: DateTime<Utc>) -> Duration {
        self.end_time.unwrap_or(now) - self.start_time
    }
}
