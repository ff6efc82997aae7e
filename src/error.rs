use thiserror::Error;

#[derive(Error, Debug)]
pub enum FieldwatchError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Notification delivery failed: {0}")]
    Notification(String),
}

pub type Result<T> = std::result::Result<T, FieldwatchError>;
