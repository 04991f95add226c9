//! Configuration management for doable.
//!
//! Settings are kept as pretty-printed JSON in the platform data directory
//! (see [`DataStorage`]). Every section is optional: a missing file, or a
//! missing section, means "use the defaults".
//!
//! ## Database location
//!
//! The SQLite file is resolved in this order:
//!
//! 1. `DOABLE_DATABASE` environment variable
//! 2. `DATABASE_URL` environment variable (a plain path or `sqlite://<path>`)
//! 3. `database.path` from the configuration file
//! 4. `doable.db` in the data directory
//!
//! Variables from a `.env` file in the working directory are loaded at
//! startup, so either variable can also live there.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use doable::libs::config::Config;
//!
//! let mut config = Config::read()?;
//! config.display.get_or_insert_with(Default::default).hide_completed = true;
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::category::{is_valid_color, DEFAULT_COLOR};
use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_warning;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DB_FILE_NAME: &str = "doable.db";
const DATABASE_ENV: &str = "DOABLE_DATABASE";
const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file.
    pub path: PathBuf,
}

/// Presentation defaults for the task list.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DisplayConfig {
    /// Hide completed tasks from `task list` unless asked otherwise.
    #[serde(default)]
    pub hide_completed: bool,

    /// Color used for new categories when none is given.
    #[serde(default = "default_color")]
    pub default_color: String,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            hide_completed: false,
            default_color: default_color(),
        }
    }
}

/// Root configuration object.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayConfig>,
}

impl Config {
    /// Reads the configuration from the data directory, falling back to defaults.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    /// Reads a configuration file. A missing file yields [`Config::default`].
    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file if there is one.
    pub fn delete() -> Result<bool> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn hide_completed(&self) -> bool {
        self.display.as_ref().map(|d| d.hide_completed).unwrap_or(false)
    }

    /// Whether a listing hides completed tasks. `--show-completed` beats both
    /// `--hide-completed` and the configured default.
    pub fn resolve_hide_completed(&self, hide_flag: bool, show_flag: bool) -> bool {
        !show_flag && (hide_flag || self.hide_completed())
    }

    pub fn default_color(&self) -> String {
        self.display
            .as_ref()
            .map(|d| d.default_color.clone())
            .filter(|c| is_valid_color(c))
            .unwrap_or_else(default_color)
    }

    /// Resolves the database file path from the environment, this config, or the data directory.
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = env_database_path() {
            return Ok(path);
        }
        if let Some(database) = &self.database {
            return Ok(database.path.clone());
        }
        DataStorage::new().get_path(DB_FILE_NAME)
    }

    /// Interactive setup wizard. Starts from the current configuration.
    pub fn init() -> Result<Config> {
        let mut config = Config::read()?;
        let theme = ColorfulTheme::default();

        let current_path = config.database_path()?;
        let path: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptDatabasePath.to_string())
            .default(current_path.display().to_string())
            .interact_text()?;
        config.database = Some(DatabaseConfig { path: PathBuf::from(path) });

        let mut display = config.display.clone().unwrap_or_default();
        display.hide_completed = Confirm::with_theme(&theme)
            .with_prompt(Message::PromptHideCompleted.to_string())
            .default(display.hide_completed)
            .interact()?;

        let color: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptDefaultColor.to_string())
            .default(display.default_color.clone())
            .interact_text()?;
        if is_valid_color(&color) {
            display.default_color = color;
        } else {
            msg_warning!(Message::InvalidColorKeptDefault(color));
        }
        config.display = Some(display);

        Ok(config)
    }
}

fn env_database_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(DATABASE_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    env::var(DATABASE_URL_ENV).ok().and_then(|url| parse_database_url(&url))
}

/// Accepts `sqlite:///abs/path`, `sqlite://rel/path` or a bare path.
pub fn parse_database_url(url: &str) -> Option<PathBuf> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    match url.strip_prefix("sqlite://") {
        Some(rest) if !rest.is_empty() => Some(PathBuf::from(rest)),
        Some(_) => None,
        None if url.contains("://") => None,
        None => Some(PathBuf::from(url)),
    }
}
