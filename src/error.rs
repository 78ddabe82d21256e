use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitTerminalError {
    #[error("failed to scan {}: {source}", root.display())]
    Discovery {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("status collection failed: {0}")]
    Collection(String),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, GitTerminalError>;
