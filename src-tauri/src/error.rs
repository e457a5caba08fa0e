use std::fmt::Display;

use thiserror::Error;

pub type ShellResult<T> = Result<T, ShellError>;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("tauri error: {0}")]
    Tauri(#[from] tauri::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid logged-out pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("local resource is missing: {0}")]
    MissingResource(String),
    #[error("invalid shell config: {0}")]
    Config(String),
    #[error("window `{0}` is not available")]
    WindowUnavailable(&'static str),
    #[error("tray error: {0}")]
    Tray(String),
    #[error("lifecycle error: {0}")]
    Lifecycle(String),
    #[error("failed to open external url: {0}")]
    External(String),
}

impl ShellError {
    pub fn config<E: Display>(err: E) -> Self {
        Self::Config(err.to_string())
    }

    pub fn tray<E: Display>(err: E) -> Self {
        Self::Tray(err.to_string())
    }

    pub fn external<E: Display>(err: E) -> Self {
        Self::External(err.to_string())
    }
}
