//! Activity management command.
//!
//! Creates, lists and deletes the activities time can be tracked against.
//! The catalog is persisted through the backup store, so activities survive
//! restarts.

use crate::{
    libs::{
        activity::{Activity, ActivityCatalog, ActivityError},
        backup::JsonFileStore,
        messages::Message,
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::Utc;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct ActivityArgs {
    #[command(subcommand)]
    command: Option<ActivityCommand>,
}

#[derive(Debug, Subcommand)]
enum ActivityCommand {
    /// Create a new activity
    New {
        /// Activity name
        name: String,
        /// Activity category (prompted for when omitted)
        #[arg(short, long)]
        category: Option<String>,
        /// Free-form description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List all activities
    List,
    /// Delete an activity
    Delete {
        /// Activity name to delete
        name: String,
    },
}

pub async fn cmd(args: ActivityArgs) -> Result<()> {
    let catalog = ActivityCatalog::new(Arc::new(JsonFileStore::new()));

    match args.command {
        Some(ActivityCommand::New {
            name,
            category,
            description,
        }) => {
            let category = match category {
                Some(category) => category,
                None => prompt_category()?,
            };
            handle_create(&catalog, &name, &category, description.as_deref())
        }
        Some(ActivityCommand::List) => handle_list(&catalog),
        Some(ActivityCommand::Delete { name }) => handle_delete(&catalog, &name),
        None => handle_interactive(&catalog),
    }
}

fn handle_create(
    catalog: &ActivityCatalog,
    name: &str,
    category: &str,
    description: Option<&str>,
) -> Result<()> {
    if catalog.find_by_name(name).is_some() {
        msg_error!(Message::ActivityAlreadyExists(name.to_string()));
        return Ok(());
    }

    let activity = Activity::new(name, category, description, Utc::now())?;
    match catalog.add(activity) {
        Ok(()) => msg_success!(Message::ActivityCreated(name.to_string())),
        Err(ActivityError::DuplicateName(name)) => {
            msg_error!(Message::ActivityAlreadyExists(name))
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn handle_list(catalog: &ActivityCatalog) -> Result<()> {
    let activities = catalog.all();

    if activities.is_empty() {
        msg_info!(Message::NoActivitiesFound);
        return Ok(());
    }

    msg_print!(Message::ActivitiesHeader, true);
    View::activities(&activities).map_err(|e| anyhow::anyhow!("{}", e))?;
    Ok(())
}

fn handle_delete(catalog: &ActivityCatalog, name: &str) -> Result<()> {
    let Some(activity) = catalog.find_by_name(name) else {
        msg_error!(Message::ActivityNotFound(name.to_string()));
        return Ok(());
    };

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmDeleteActivity(activity.name.clone()).to_string())
        .default(false)
        .interact()?;

    if !confirmed {
        msg_print!(Message::OperationCancelled);
        return Ok(());
    }

    catalog.remove(&activity.id);
    msg_success!(Message::ActivityDeleted(activity.name));
    Ok(())
}

fn prompt_category() -> Result<String> {
    let category: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptActivityCategory.to_string())
        .interact_text()?;
    Ok(category)
}

fn handle_interactive(catalog: &ActivityCatalog) -> Result<()> {
    let name: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptActivityName.to_string())
        .interact_text()?;
    let category = prompt_category()?;
    let description: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptActivityDescription.to_string())
        .allow_empty(true)
        .interact_text()?;

    let description = if description.is_empty() { None } else { Some(description.as_str()) };

    handle_create(catalog, &name, &category, description)
}
