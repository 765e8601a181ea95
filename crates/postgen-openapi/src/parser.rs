//! OpenAPI document loading.
//!
//! Documents are read as JSON or YAML from a string, a file or a URL and then
//! folded into the tolerant [`OpenApiDocument`] model.

use crate::document::OpenApiDocument;
use crate::error::{OpenApiError, Result};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

impl OpenApiDocument {
    /// Load and parse an OpenAPI document from a file.
    ///
    /// `.json` files are parsed as JSON, anything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading OpenAPI spec from file: {}", path.display());
        let content = std::fs::read_to_string(path)?;

        let value: Value = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else {
            yaml_to_json(&content)?
        };

        Self::from_value(value)
    }

    /// Fetch and parse an OpenAPI document from a URL.
    ///
    /// A non-success status is an error; nothing is parsed in that case.
    pub async fn from_url(url: &str) -> Result<Self> {
        info!("Fetching OpenAPI spec from URL: {}", url);
        let response = reqwest::get(url).await?.error_for_status()?;
        let content = response.text().await?;

        debug!("Fetched {} bytes", content.len());
        Self::from_str(&content)
    }

    /// Parse an OpenAPI document from a string.
    ///
    /// Automatically detects JSON or YAML format.
    pub fn from_str(content: &str) -> Result<Self> {
        // Try JSON first
        let value = match serde_json::from_str(content) {
            Ok(value) => value,
            Err(_) => {
                yaml_to_json(content).map_err(|e| OpenApiError::ParseError(e.to_string()))?
            }
        };

        Self::from_value(value)
    }

    /// Build the document model from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(OpenApiError::InvalidSpec(
                "document root must be an object".to_string(),
            ));
        }

        let document: Self = serde_json::from_value(value)?;
        debug!(
            "Loaded {} paths and {} schemas",
            document.paths.len(),
            document.components.schemas.len()
        );
        Ok(document)
    }

    /// Load a document from a URL (`http://`, `https://`) or a local path.
    pub async fn load(source: &str) -> Result<Self> {
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::from_url(source).await
        } else {
            Self::from_file(source)
        }
    }
}

/// YAML allows non-string mapping keys (`200:`); going through the YAML value
/// model lets serde_json stringify them.
fn yaml_to_json(content: &str) -> Result<Value> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
    Ok(serde_json::to_value(yaml)?)
}
