//! Error types for the unifier

use thiserror::Error;

/// Unifier-wide error type
#[derive(Error, Debug)]
pub enum UnifierError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Site error ({site}): {message}")]
    Site { site: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl UnifierError {
    pub fn api(msg: impl Into<String>) -> Self {
        UnifierError::Api(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        UnifierError::Network(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        UnifierError::Parse(msg.into())
    }

    pub fn io(msg: impl Into<String>) -> Self {
        UnifierError::Io(msg.into())
    }

    pub fn site(site: impl Into<String>, message: impl Into<String>) -> Self {
        UnifierError::Site {
            site: site.into(),
            message: message.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        UnifierError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        UnifierError::Internal(msg.into())
    }
}

/// Result type alias for unifier operations
pub type UnifierResult<T> = Result<T, UnifierError>;
