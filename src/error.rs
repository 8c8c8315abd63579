//! Error types shared by the task backends, config loading and the word list.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// File reads/writes (local task file, config, log file)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport-level HTTP failure (connection refused, timeout, DNS)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Server answered with a non-success status
    #[error("server returned {code}: {body}")]
    Status { code: u16, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid word: {0}")]
    InvalidWord(String),

    #[error("Word list unusable: {0}")]
    EmptyWordList(String),

    /// OS random source failed
    #[error("Random source error: {0}")]
    Random(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<ureq::Error> for AppError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(404, response) => {
                AppError::NotFound(response.get_url().to_string())
            }
            ureq::Error::Status(code, response) => AppError::Status {
                code,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => AppError::Http(transport.to_string()),
        }
    }
}
