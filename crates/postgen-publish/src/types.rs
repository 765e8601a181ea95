//! Postman API payloads.

use postgen_openapi::Collection;
use serde::{Deserialize, Serialize};

/// A workspace visible to the API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    /// `personal`, `team`, ...
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// The collection as acknowledged by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedCollection {
    pub id: String,
    pub name: String,
    pub uid: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkspaceList {
    #[serde(default)]
    pub workspaces: Vec<Workspace>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateCollectionRequest<'a> {
    pub collection: &'a Collection,
    pub workspace: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateCollectionResponse {
    pub collection: CreatedCollection,
}
