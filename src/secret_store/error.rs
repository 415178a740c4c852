/// Errors related to secret store operations
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    /// Secret not found
    #[error("Secret not found: {0}")]
    NotFound(String),

    /// AWS SDK error, already rendered with its full error context
    #[error("{0}")]
    Aws(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The secret exists but carries no string value
    #[error("Secret has no string value")]
    UnexpectedFormat,
}

pub type Result<T> = std::result::Result<T, SecretError>;
