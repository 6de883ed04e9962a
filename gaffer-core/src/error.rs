//! Error types for gaffer.

use thiserror::Error;

/// Result type for gaffer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for gaffer operations.
///
/// "No match" and "nothing resolved" are not errors: the matcher returns
/// `None` and the pipeline returns a failure prompt for those.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid input provided (e.g. an empty matcher pattern).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The knowledge-base collaborator failed (network, HTTP status, response format).
    #[error("Knowledge base error: {0}")]
    Collaborator(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Evaluation dataset loading/parsing error.
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a knowledge-base collaborator error.
    #[must_use]
    pub fn collaborator(msg: impl Into<String>) -> Self {
        Self::Collaborator(msg.into())
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a parse error.
    #[must_use]
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a dataset error.
    #[must_use]
    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset(msg.into())
    }

    /// True when the error came from the knowledge-base collaborator.
    ///
    /// Callers use this to show a degraded-service message instead of a
    /// hard failure.
    #[must_use]
    pub fn is_collaborator(&self) -> bool {
        matches!(self, Self::Collaborator(_))
    }
}
