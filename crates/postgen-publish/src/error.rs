//! Error types for publishing collections.

use thiserror::Error;

/// Result type for publish operations.
pub type Result<T> = std::result::Result<T, PublishError>;

/// Errors raised while talking to the Postman API. All of them end the run.
#[derive(Error, Debug)]
pub enum PublishError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Postman API returned {status} for {operation}: {body}")]
    ApiError {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// No workspace with the configured name
    #[error("Workspace '{0}' not found")]
    WorkspaceNotFound(String),

    /// Response body did not have the expected shape
    #[error("Unexpected response from Postman API: {0}")]
    UnexpectedResponse(String),

    /// Missing or invalid configuration
    #[error(transparent)]
    Config(#[from] postgen_core::Error),
}
