use thiserror::Error;

#[derive(Debug, Error)]
pub enum BirdwatchError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BirdwatchError {
    /// Returns `true` for errors a user can fix by entering different input
    /// (wrong credentials, missing session), as opposed to environment failures.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::NotAuthenticated)
    }
}

impl From<rusqlite::Error> for BirdwatchError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(value.to_string())
    }
}

impl From<std::io::Error> for BirdwatchError {
    fn from(value: std::io::Error) -> Self {
        Self::Storage(value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BirdwatchError>;
