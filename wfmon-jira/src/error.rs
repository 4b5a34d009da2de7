//! Error types for Jira operations

use thiserror::Error;

/// Result type for Jira operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during Jira operations
#[derive(Error, Debug)]
pub enum Error {
    /// Transport or decoding error
    #[error("Jira request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Credentials were rejected
    #[error("Jira authentication error: {0}")]
    Auth(String),

    /// Jira answered with a non-success status
    #[error("Jira returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Base URL could not be parsed
    #[error("Invalid Jira URL: {0}")]
    Url(#[from] url::ParseError),
}
