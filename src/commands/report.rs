//! Daily time report command.
//!
//! Lists the completed entries for a given date with per-activity and daily
//! totals. Entries are read from the backup store, so reports work without
//! a session in progress.

use crate::{
    libs::{
        activity::ActivityCatalog,
        backup::JsonFileStore,
        clock::SystemClock,
        config::Config,
        formatter::{format_duration, FormattedEntry},
        messages::Message,
        tracker::TimeTracker,
        view::View,
    },
    msg_error_anyhow, msg_info, msg_print,
};
use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Command-line arguments for the report command.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Date to report on (YYYY-MM-DD or 'today')
    #[arg(long, short, default_value = "today", help = "Date to report on (YYYY-MM-DD or 'today')")]
    date: String,
}

pub async fn cmd(args: ReportArgs) -> Result<()> {
    let date = parse_date(&args.date)?;

    let config = Config::read()?;
    let store = Arc::new(JsonFileStore::new());
    let catalog = ActivityCatalog::new(store.clone());
    let tracker = TimeTracker::new(Arc::new(SystemClock), store, config.tracker());
    tracker.restore_from_backup(false)?;

    let entries: Vec<_> = tracker
        .entries()
        .into_iter()
        .filter(|e| e.start_time.date_naive() == date)
        .collect();

    if entries.is_empty() {
        msg_info!(Message::NoEntriesForDate(date.to_string()));
        return Ok(());
    }

    msg_print!(Message::ReportHeader(date.to_string()), true);

    let activity_name = |id: &str| {
        catalog
            .get(id)
            .map(|a| a.name)
            .unwrap_or_else(|| id.to_string())
    };

    let mut formatted = Vec::new();
    let mut per_activity: BTreeMap<String, Duration> = BTreeMap::new();
    let mut total = Duration::zero();

    for (i, entry) in entries.iter().enumerate() {
        let name = activity_name(&entry.activity_id);
        let end = entry.end_time.unwrap_or(entry.start_time);
        let duration = entry.duration(end);

        formatted.push(FormattedEntry {
            id: (i + 1) as i32,
            activity: name.clone(),
            start: entry.start_time.with_timezone(&Local).format("%H:%M").to_string(),
            end: entry
                .end_time
                .map(|e| e.with_timezone(&Local).format("%H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
            duration: format_duration(&duration),
        });

        *per_activity.entry(name).or_insert_with(Duration::zero) += duration;
        total += duration;
    }

    View::entries(&formatted).map_err(|e| anyhow::anyhow!("{}", e))?;

    for (name, duration) in &per_activity {
        msg_print!(Message::ActivityTotal(name.clone(), format_duration(duration)));
    }
    msg_print!(Message::DailyTotal(format_duration(&total)), true);

    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    if raw.eq_ignore_ascii_case("today") {
        return Ok(Local::now().date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| msg_error_anyhow!(Message::InvalidInput))
}
