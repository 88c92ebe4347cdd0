use thiserror::Error;

#[derive(Debug, Error)]
pub enum MoodvieError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("bundle error: {0}")]
    Bundle(#[from] BundleError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a detail screen refuses to activate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BundleError {
    #[error("navigation bundle cannot be empty")]
    Missing,

    #[error("bundle is missing required key `{0}`")]
    MissingKey(&'static str),

    #[error("`movieRating` is not a number: {0:?}")]
    InvalidRating(String),

    #[error("user context could not be read: {0}")]
    InvalidUser(String),
}
