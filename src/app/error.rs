use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartographError {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Element not found: {0}")]
    NotFound(String),

    #[error("Timed out after {0} ms: {1}")]
    Timeout(u64, String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CartographError>;
