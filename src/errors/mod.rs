use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GraphQL query failed: {0}")]
    GraphQl(String),

    // Storage errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // User input errors
    #[error("Invalid publication slug: {0}")]
    InvalidSlug(String),

    // Load lifecycle
    #[error("Feed load was cancelled")]
    Cancelled,

    #[error("Feed load task failed: {0}")]
    TaskFailed(String),
}

impl FeedError {
    /// Whether the error came from the remote backend rather than local state.
    pub fn is_network(&self) -> bool {
        matches!(self, FeedError::Http(_) | FeedError::GraphQl(_))
    }
}

pub type FeedResult<T> = Result<T, FeedError>;
