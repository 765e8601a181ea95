//! Postman collection (v2.1) document.

use serde::{Deserialize, Serialize};

/// Schema URL carried in every collection's `info`.
pub const POSTMAN_SCHEMA_URL: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// A request collection: one folder per tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub info: CollectionInfo,
    pub item: Vec<TagGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    pub schema: String,
}

/// Folder of requests sharing a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagGroup {
    pub name: String,
    pub item: Vec<RequestItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestItem {
    pub name: String,
    pub request: Request,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// HTTP method, upper-case
    pub method: String,
    pub url: Url,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub header: Vec<Header>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Url {
    /// Host variable followed by the raw OpenAPI path
    pub raw: String,
    pub host: Vec<String>,
    /// Non-empty path segments
    pub path: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Vec<QueryParam>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub mode: String,
    pub raw: String,
    pub options: BodyOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyOptions {
    pub raw: RawOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOptions {
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl CollectionInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: POSTMAN_SCHEMA_URL.to_string(),
        }
    }
}

impl Collection {
    /// Total number of requests across all folders.
    pub fn request_count(&self) -> usize {
        self.item.iter().map(|group| group.item.len()).sum()
    }

    /// Find a folder by tag name.
    pub fn group(&self, name: &str) -> Option<&TagGroup> {
        self.item.iter().find(|group| group.name == name)
    }
}

impl Body {
    /// Raw body rendered as JSON in the Postman editor.
    pub fn json(raw: impl Into<String>) -> Self {
        Self {
            mode: "raw".to_string(),
            raw: raw.into(),
            options: BodyOptions {
                raw: RawOptions {
                    language: "json".to_string(),
                },
            },
        }
    }
}

impl Header {
    pub fn content_type(value: impl Into<String>) -> Self {
        Self {
            key: "Content-Type".to_string(),
            value: value.into(),
        }
    }
}

impl QueryParam {
    /// Query parameter with an empty placeholder value.
    pub fn placeholder(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: String::new(),
            description: description.into(),
        }
    }
}
