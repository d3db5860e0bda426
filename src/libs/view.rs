use super::activity::Activity;
use super::formatter::FormattedEntry;
use prettytable::{row, Table};
use std::error::Error;

pub struct View {}

impl View {
    pub fn activities(activities: &[Activity]) -> Result<(), Box<dyn Error>> {
        let mut table = Table::new();

        table.add_row(row!["NAME", "CATEGORY", "DESCRIPTION", "CREATED"]);
        for activity in activities {
            table.add_row(row![
                activity.name,
                activity.category,
                activity.description.as_deref().unwrap_or("-"),
                activity.created_at.format("%Y-%m-%d")
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn entries(entries: &[FormattedEntry]) -> Result<(), Box<dyn Error>> {
        let mut table = Table::new();

        table.add_row(row!["ID", "ACTIVITY", "START", "END", "DURATION"]);
        for entry in entries {
            table.add_row(row![
                entry.id,
                entry.activity,
                entry.start,
                entry.end,
                entry.duration
            ]);
        }
        table.printstd();

        Ok(())
    }
}
