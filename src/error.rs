use thiserror::Error;

#[derive(Error, Debug)]
pub enum MentionError {
    #[error("Termination character set is empty")]
    EmptyTerminationSet,

    #[error("Invalid termination character {0:?}: it may appear inside usernames")]
    InvalidTerminationChar(char),

    #[error("Seed length cap must be greater than zero")]
    InvalidSeedCap,

    #[error("Failed to get data directory")]
    DataDir,

    #[error("Invalid user: {0}")]
    InvalidUser(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, MentionError>;
