//! Activity model and catalog.
//!
//! Activities are the things time gets tracked against. The catalog keeps
//! them in memory and mirrors every change into the backup store so the set
//! survives restarts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::libs::backup::{BackupStore, KEY_ACTIVITIES};
use crate::libs::messages::Message;
use crate::msg_warning;

/// Maximum length of an activity name, in characters.
pub const NAME_MAX_LEN: usize = 100;
/// Maximum length of an activity category, in characters.
pub const CATEGORY_MAX_LEN: usize = 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActivityError {
    #[error("activity name cannot be empty")]
    EmptyName,
    #[error("activity name cannot exceed {NAME_MAX_LEN} characters")]
    NameTooLong,
    #[error("activity category cannot be empty")]
    EmptyCategory,
    #[error("activity category cannot exceed {CATEGORY_MAX_LEN} characters")]
    CategoryTooLong,
    #[error("an activity named '{0}' already exists")]
    DuplicateName(String),
}

/// Something time can be tracked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Opaque unique identifier (UUID v4).
    pub id: String,
    pub name: String,
    /// Required grouping label, non-empty and at most `CATEGORY_MAX_LEN`
    /// characters.
    pub category: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    pub fn new(
        name: &str,
        category: &str,
        description: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ActivityError> {
        validate_name(name)?;
        validate_category(category)?;

        Ok(Activity {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            category: category.trim().to_string(),
            description: description.map(|d| d.to_string()),
            created_at,
        })
    }

    /// Renames the activity, enforcing the name limits.
    pub fn rename(&mut self, name: &str) -> Result<(), ActivityError> {
        validate_name(name)?;
        self.name = name.trim().to_string();
        Ok(())
    }

    /// Replaces the category, enforcing the same rules as construction.
    pub fn set_category(&mut self, category: &str) -> Result<(), ActivityError> {
        validate_category(category)?;
        self.category = category.trim().to_string();
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), ActivityError> {
    if name.trim().is_empty() {
        return Err(ActivityError::EmptyName);
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(ActivityError::NameTooLong);
    }
    Ok(())
}

fn validate_category(category: &str) -> Result<(), ActivityError> {
    if category.trim().is_empty() {
        return Err(ActivityError::EmptyCategory);
    }
    if category.chars().count() > CATEGORY_MAX_LEN {
        return Err(ActivityError::CategoryTooLong);
    }
    Ok(())
}

/// In-memory activity set mirrored into the backup store.
///
/// Loads the persisted set on construction; every mutation writes the whole
/// set back. A store failure on write is logged and ignored, the in-memory
/// set stays authoritative for the session.
pub struct ActivityCatalog {
    store: Arc<dyn BackupStore>,
    activities: parking_lot::Mutex<Vec<Activity>>,
}

impl ActivityCatalog {
    pub fn new(store: Arc<dyn BackupStore>) -> Self {
        let activities = match store.restore(KEY_ACTIVITIES) {
            Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|e| {
                msg_warning!(Message::RestoreFailed(KEY_ACTIVITIES.to_string(), e.to_string()));
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                msg_warning!(Message::RestoreFailed(KEY_ACTIVITIES.to_string(), e.to_string()));
                Vec::new()
            }
        };

        Self {
            store,
            activities: parking_lot::Mutex::new(activities),
        }
    }

    /// Adds an activity. Names are unique, case-insensitively.
    pub fn add(&self, activity: Activity) -> Result<(), ActivityError> {
        let mut activities = self.activities.lock();
        if activities
            .iter()
            .any(|a| a.name.eq_ignore_ascii_case(&activity.name))
        {
            return Err(ActivityError::DuplicateName(activity.name));
        }
        activities.push(activity);
        self.persist(&activities);
        Ok(())
    }

    pub fn all(&self) -> Vec<Activity> {
        self.activities.lock().clone()
    }

    pub fn get(&self, id: &str) -> Option<Activity> {
        self.activities.lock().iter().find(|a| a.id == id).cloned()
    }

    pub fn find_by_name(&self, name: &str) -> Option<Activity> {
        self.activities
            .lock()
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Removes the activity with `id`, returning it when it existed.
    pub fn remove(&self, id: &str) -> Option<Activity> {
        let mut activities = self.activities.lock();
        let pos = activities.iter().position(|a| a.id == id)?;
        let removed = activities.remove(pos);
        self.persist(&activities);
        Some(removed)
    }

    fn persist(&self, activities: &[Activity]) {
        match serde_json::to_value(activities) {
            Ok(value) => {
                if let Err(e) = self.store.backup(KEY_ACTIVITIES, &value) {
                    msg_warning!(Message::BackupFailed(
                        KEY_ACTIVITIES.to_string(),
                        e.to_string()
                    ));
                }
            }
            Err(e) => {
                msg_warning!(Message::BackupFailed(KEY_ACTIVITIES.to_string(), e.to_string()));
            }
        }
    }
}
