use thiserror::Error;

/// Errors that can occur while searching or exploring recipes
#[derive(Error, Debug)]
pub enum SearchError {
    /// Transport failure or non-success status from the recipe API
    #[error("Failed to fetch recipes: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Response body did not have the expected shape
    #[error("Failed to decode response: {0}")]
    DecodeError(#[from] serde_json::Error),

    /// Query rejected before any request was made
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Operation not offered for this category
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Async runtime could not be created
    #[error("Runtime error: {0}")]
    RuntimeError(String),
}
