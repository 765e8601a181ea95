//! Error types for OpenAPI loading.

use thiserror::Error;

/// Result type for OpenAPI operations.
pub type Result<T> = std::result::Result<T, OpenApiError>;

/// Errors that can occur while loading an OpenAPI document.
///
/// Schema-shape problems inside a loaded document are never errors: they
/// degrade to empty sections or empty schemas.
#[derive(Error, Debug)]
pub enum OpenApiError {
    /// OpenAPI spec parsing error
    #[error("Failed to parse OpenAPI spec: {0}")]
    ParseError(String),

    /// Document root is not an object
    #[error("Invalid OpenAPI spec: {0}")]
    InvalidSpec(String),

    /// HTTP request error
    #[error("Failed to fetch OpenAPI spec: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
