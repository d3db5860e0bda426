//! Application configuration management.
//!
//! The configuration lives as a JSON file in the application data directory
//! and is created either implicitly with defaults or interactively through
//! the `init` command wizard.

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Timing parameters for the session tracker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Delay between ticks, in milliseconds.
    #[serde(default = "default_tick_interval")]
    pub tick_interval: u64,
    /// Delay before retrying a failed tick, in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay: u64,
    /// Consecutive tick failures after which the ticker halts.
    #[serde(default = "default_max_tick_failures")]
    pub max_tick_failures: u32,
    /// Seconds between periodic session backups.
    #[serde(default = "default_backup_interval")]
    pub backup_interval: u64,
    /// Milliseconds to wait for the ticker to exit on stop.
    #[serde(default = "default_stop_timeout")]
    pub stop_timeout: u64,
}

fn default_tick_interval() -> u64 {
    1000
}

fn default_retry_delay() -> u64 {
    2000
}

fn default_max_tick_failures() -> u32 {
    5
}

fn default_backup_interval() -> u64 {
    30
}

fn default_stop_timeout() -> u64 {
    1000
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tick_interval: default_tick_interval(),
            retry_delay: default_retry_delay(),
            max_tick_failures: default_max_tick_failures(),
            backup_interval: default_backup_interval(),
            stop_timeout: default_stop_timeout(),
        }
    }
}

impl TrackerConfig {
    fn init() -> Result<Self> {
        let tick_interval: u64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTickInterval.to_string())
            .default(default_tick_interval())
            .interact_text()?;
        let retry_delay: u64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptRetryDelay.to_string())
            .default(default_retry_delay())
            .interact_text()?;
        let max_tick_failures: u32 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptMaxTickFailures.to_string())
            .default(default_max_tick_failures())
            .interact_text()?;
        let backup_interval: u64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptBackupInterval.to_string())
            .default(default_backup_interval())
            .interact_text()?;
        let stop_timeout: u64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptStopTimeout.to_string())
            .default(default_stop_timeout())
            .interact_text()?;

        Ok(Self {
            tick_interval,
            retry_delay,
            max_tick_failures,
            backup_interval,
            stop_timeout,
        })
    }
}

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracker: Option<TrackerConfig>,
}

impl Config {
    /// Reads the configuration file, falling back to defaults when it does
    /// not exist yet.
    pub fn read() -> Result<Self> {
        let path = DataStorage::new()
            .get_path(CONFIG_FILE_NAME)
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&path)?;
        serde_json::from_str(&contents).map_err(|_| msg_error_anyhow!(Message::ConfigParseError))
    }

    /// Writes the configuration back to its file.
    pub fn save(&self) -> Result<()> {
        let path = DataStorage::new()
            .get_path(CONFIG_FILE_NAME)
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        let json = serde_json::to_string_pretty(self)
            .map_err(|_| msg_error_anyhow!(Message::ConfigSaveError))?;
        fs::write(&path, json)?;
        Ok(())
    }

    /// Effective tracker configuration: the configured section or defaults.
    pub fn tracker(&self) -> TrackerConfig {
        self.tracker.clone().unwrap_or_default()
    }

    /// Interactive configuration wizard. Returns the updated configuration
    /// for the caller to save.
    pub fn init() -> Result<Self> {
        let mut config = Config::read().unwrap_or_default();

        let modules = vec![Message::ConfigModuleTracker.to_string()];
        let mut defaults = vec![false; modules.len()];
        if config.tracker.is_some() {
            defaults[0] = true;
        }

        let selections = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules)
            .defaults(&defaults)
            .interact()?;

        if selections.contains(&0) {
            config.tracker = Some(TrackerConfig::init()?);
        } else {
            config.tracker = None;
        }

        Ok(config)
    }
}
