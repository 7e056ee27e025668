use std::path::PathBuf;

use thiserror::Error;

/// Chat errors. Every variant is terminal for the process.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Validation(String),
    #[error("API error: {0}")]
    RemoteApi(String),
}

impl ChatError {
    /// Tag an I/O error with the path that produced it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ChatError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::RemoteApi(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
