//! `config.toml` loading.

use crate::error::{AppError, Result};
use crate::words::DEFAULT_WORD_LIST_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_NAME: &str = "taskle";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub tasks: TasksConfig,
    #[serde(default)]
    pub wordle: WordleConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TasksConfig {
    /// REST API base URL. Unset means local mode.
    #[serde(default)]
    pub api_url: Option<String>,
    /// JSON file for local mode; unset keeps tasks in memory only.
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            file: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Where the task list lives for this run.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskSource {
    Remote(String),
    File(PathBuf),
    Memory,
}

impl TasksConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Command-line flags win over the config file; within each level a
    /// remote URL wins over a local file.
    pub fn source(&self, cli_remote: Option<String>, cli_file: Option<PathBuf>) -> TaskSource {
        if let Some(url) = cli_remote {
            return TaskSource::Remote(url);
        }
        if let Some(path) = cli_file {
            return TaskSource::File(path);
        }
        match (&self.api_url, &self.file) {
            (Some(url), _) => TaskSource::Remote(url.clone()),
            (None, Some(path)) => TaskSource::File(path.clone()),
            (None, None) => TaskSource::Memory,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WordleConfig {
    #[serde(default = "default_word_list_url")]
    pub word_list_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for WordleConfig {
    fn default() -> Self {
        Self {
            word_list_url: default_word_list_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl WordleConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_word_list_url() -> String {
    DEFAULT_WORD_LIST_URL.to_string()
}

/// `TASKLE_CONFIG` overrides the default `<config dir>/taskle/config.toml`.
pub fn config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("TASKLE_CONFIG") {
        return Ok(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_NAME).join("config.toml"))
        .ok_or_else(|| AppError::config("could not determine config directory"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Missing file yields defaults; a malformed file is an error.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_NAME)
        .join("taskle.log")
}
