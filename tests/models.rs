#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use kairos::libs::activity::{
        Activity, ActivityCatalog, ActivityError, CATEGORY_MAX_LEN, NAME_MAX_LEN,
    };
    use kairos::libs::backup::MemoryStore;
    use kairos::libs::time_entry::{TimeEntry, TimeEntryError, NOTES_MAX_LEN};
    use std::sync::Arc;

    fn start_time() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_entry_requires_activity_id() {
        assert_eq!(
            TimeEntry::new("", start_time()).unwrap_err(),
            TimeEntryError::EmptyActivityId
        );
        assert_eq!(
            TimeEntry::new("   ", start_time()).unwrap_err(),
            TimeEntryError::EmptyActivityId
        );
        assert!(TimeEntry::new("ok", start_time()).is_ok());
    }

    #[test]
    fn test_entry_ids_are_unique() {
        let a = TimeEntry::new("demo", start_time()).unwrap();
        let b = TimeEntry::new("demo", start_time()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_entry_stop_rules() {
        let mut entry = TimeEntry::new("demo", start_time()).unwrap();
        assert!(entry.is_active());

        assert_eq!(
            entry.stop(start_time()).unwrap_err(),
            TimeEntryError::EndBeforeStart
        );

        entry.stop(start_time() + Duration::minutes(10)).unwrap();
        assert!(!entry.is_active());
        assert_eq!(entry.duration(start_time()), Duration::minutes(10));

        assert_eq!(
            entry.stop(start_time() + Duration::minutes(20)).unwrap_err(),
            TimeEntryError::AlreadyStopped
        );
    }

    #[test]
    fn test_entry_notes_length_limit() {
        let mut entry = TimeEntry::new("demo", start_time()).unwrap();

        entry.set_notes(&"x".repeat(NOTES_MAX_LEN)).unwrap();
        assert_eq!(
            entry.set_notes(&"x".repeat(NOTES_MAX_LEN + 1)).unwrap_err(),
            TimeEntryError::NotesTooLong
        );
        // The previous notes survive the rejected update.
        assert_eq!(entry.notes.as_ref().unwrap().len(), NOTES_MAX_LEN);
    }

    #[test]
    fn test_entry_serde_round_trip() {
        let mut entry = TimeEntry::new("demo", start_time()).unwrap();
        entry.stop(start_time() + Duration::minutes(90)).unwrap();
        entry.set_notes("standup prep").unwrap();

        let json = serde_json::to_string(&entry).unwrap();
        let back: TimeEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
        back.validate().unwrap();
    }

    #[test]
    fn test_entry_validate_catches_inverted_interval() {
        let mut entry = TimeEntry::new("demo", start_time()).unwrap();
        entry.end_time = Some(start_time() - Duration::minutes(1));
        assert_eq!(entry.validate().unwrap_err(), TimeEntryError::EndBeforeStart);
    }

    #[test]
    fn test_activity_validation() {
        assert_eq!(
            Activity::new("", "work", None, start_time()).unwrap_err(),
            ActivityError::EmptyName
        );
        assert_eq!(
            Activity::new(&"n".repeat(NAME_MAX_LEN + 1), "work", None, start_time()).unwrap_err(),
            ActivityError::NameTooLong
        );
        assert_eq!(
            Activity::new("ok", &"c".repeat(CATEGORY_MAX_LEN + 1), None, start_time())
                .unwrap_err(),
            ActivityError::CategoryTooLong
        );
        assert_eq!(
            Activity::new("ok", "  ", None, start_time()).unwrap_err(),
            ActivityError::EmptyCategory
        );
        assert_eq!(
            Activity::new("ok", "", None, start_time()).unwrap_err(),
            ActivityError::EmptyCategory
        );

        let activity =
            Activity::new("  Writing  ", " work ", Some("blog posts"), start_time()).unwrap();
        assert_eq!(activity.name, "Writing");
        assert_eq!(activity.category, "work");
    }

    #[test]
    fn test_activity_rename_and_category_update() {
        let mut activity = Activity::new("Old", "general", None, start_time()).unwrap();

        activity.rename("New").unwrap();
        assert_eq!(activity.name, "New");
        assert_eq!(activity.rename("").unwrap_err(), ActivityError::EmptyName);
        assert_eq!(activity.name, "New");

        activity.set_category("deep").unwrap();
        assert_eq!(activity.category, "deep");
        assert_eq!(
            activity.set_category("").unwrap_err(),
            ActivityError::EmptyCategory
        );
        assert_eq!(activity.category, "deep");
    }

    #[test]
    fn test_catalog_add_lookup_remove() {
        let catalog = ActivityCatalog::new(Arc::new(MemoryStore::new()));

        let writing = Activity::new("Writing", "work", None, start_time()).unwrap();
        let id = writing.id.clone();
        catalog.add(writing).unwrap();

        assert_eq!(catalog.all().len(), 1);
        assert!(catalog.get(&id).is_some());
        assert!(catalog.find_by_name("writing").is_some()); // case-insensitive
        assert!(catalog.find_by_name("reading").is_none());

        let duplicate = Activity::new("WRITING", "work", None, start_time()).unwrap();
        assert!(matches!(
            catalog.add(duplicate).unwrap_err(),
            ActivityError::DuplicateName(_)
        ));

        assert!(catalog.remove(&id).is_some());
        assert!(catalog.remove(&id).is_none());
        assert!(catalog.all().is_empty());
    }

    #[test]
    fn test_catalog_persists_across_instances() {
        let store = Arc::new(MemoryStore::new());

        {
            let catalog = ActivityCatalog::new(store.clone());
            catalog
                .add(Activity::new("Writing", "work", None, start_time()).unwrap())
                .unwrap();
        }

        let catalog = ActivityCatalog::new(store);
        let restored = catalog.find_by_name("Writing").unwrap();
        assert_eq!(restored.category, "work");
    }
}
