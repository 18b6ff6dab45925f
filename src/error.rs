use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Weather provider error: {0}")]
    Provider(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
    #[error("Database channel closed")]
    DbChannel,
    #[error("Config error: {0}")]
    Config(String),
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Host error: {0}")]
    Host(String),
    #[error("Logging error: {0}")]
    Logging(String),
}
