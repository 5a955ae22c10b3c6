#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Stored filter '{key}' no longer matches the current filter schema (stored hash {stored}, current hash {current})")]
    StaleFilter {
        key: String,
        stored: i32,
        current: i32,
    },
}

pub type Result<T> = std::result::Result<T, DeckError>;
