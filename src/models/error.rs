use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("Missing required query parameter: user")]
    MissingUser,

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Upstream returned status {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("Upstream fetch timed out for {url}")]
    UpstreamTimeout { url: String },

    #[error("Upstream fetching is disabled")]
    UpstreamDisabled,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CardError>;
