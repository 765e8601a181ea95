//! Tolerant OpenAPI document model.
//!
//! Only the parts of the document the collection builder reads are modelled.
//! Every section is optional and a malformed section is dropped with a
//! warning instead of failing the load.

use crate::schema::{SchemaNode, SchemaRegistry};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Prefix of local references into `components.parameters`.
pub const PARAMETER_REF_PREFIX: &str = "#/components/parameters/";

/// Path-item keys that declare operations, in OpenAPI order.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// The subset of an OpenAPI document used to build a collection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenApiDocument {
    #[serde(default, deserialize_with = "lenient")]
    pub info: Info,

    #[serde(default, deserialize_with = "lenient")]
    pub paths: IndexMap<String, PathItem>,

    #[serde(default, deserialize_with = "lenient")]
    pub components: Components,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Info {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    #[serde(default, deserialize_with = "lenient")]
    pub schemas: SchemaRegistry,

    #[serde(default, deserialize_with = "lenient")]
    pub parameters: IndexMap<String, ParameterOrRef>,
}

/// Operations of one path, in declaration order, plus the parameters shared
/// by all of them.
#[derive(Debug, Clone, Default)]
pub struct PathItem {
    pub parameters: Vec<ParameterOrRef>,
    /// `(lower-case method, operation)` pairs
    pub operations: Vec<(String, Operation)>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub tags: Vec<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "lenient_seq")]
    pub parameters: Vec<ParameterOrRef>,

    #[serde(default, deserialize_with = "lenient")]
    pub request_body: Option<RequestBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    #[serde(default, deserialize_with = "lenient")]
    pub content: IndexMap<String, MediaType>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<SchemaNode>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Reference {
        #[serde(rename = "$ref")]
        reference: String,
    },
    Item(Parameter),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(default)]
    pub description: Option<String>,
}

/// Location where a parameter appears in the request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Path parameter (e.g., /users/{id})
    Path,
    /// Query parameter (e.g., ?search=value)
    Query,
    /// Header parameter (e.g., X-Custom-Header)
    Header,
    /// Cookie parameter
    Cookie,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "path"),
            ParameterLocation::Query => write!(f, "query"),
            ParameterLocation::Header => write!(f, "header"),
            ParameterLocation::Cookie => write!(f, "cookie"),
            ParameterLocation::Unknown => write!(f, "unknown"),
        }
    }
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let Value::Object(entries) = value else {
            warn!("Ignoring path item that is not an object");
            return Ok(PathItem::default());
        };

        let mut item = PathItem::default();
        for (key, value) in entries {
            if key == "parameters" {
                item.parameters = seq_of(value);
                continue;
            }

            let method = key.to_ascii_lowercase();
            if !HTTP_METHODS.contains(&method.as_str()) {
                continue;
            }

            match serde_json::from_value::<Operation>(value) {
                Ok(operation) => item.operations.push((method, operation)),
                Err(e) => warn!("Skipping malformed {} operation: {}", method.to_uppercase(), e),
            }
        }
        Ok(item)
    }
}

impl Components {
    /// Resolve a parameter, following one `#/components/parameters/` hop.
    pub fn parameter<'a>(&'a self, parameter: &'a ParameterOrRef) -> Option<&'a Parameter> {
        match parameter {
            ParameterOrRef::Item(item) => Some(item),
            ParameterOrRef::Reference { reference } => {
                let name = reference.strip_prefix(PARAMETER_REF_PREFIX)?;
                match self.parameters.get(name)? {
                    ParameterOrRef::Item(item) => Some(item),
                    ParameterOrRef::Reference { .. } => None,
                }
            }
        }
    }
}

/// Deserialize a section, falling back to its default when it is malformed.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        warn!("Ignoring malformed section: {}", e);
        T::default()
    }))
}

/// Deserialize a list, dropping the entries that are malformed.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(seq_of(Value::deserialize(deserializer)?))
}

fn seq_of<T: DeserializeOwned>(value: Value) -> Vec<T> {
    match value {
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    warn!("Ignoring malformed list entry: {}", e);
                    None
                }
            })
            .collect(),
        Value::Null => Vec::new(),
        _ => {
            warn!("Ignoring list field that is not an array");
            Vec::new()
        }
    }
}
