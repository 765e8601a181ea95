//! Postman API client.

use crate::error::{PublishError, Result};
use crate::types::{
    CreateCollectionRequest, CreateCollectionResponse, CreatedCollection, Workspace, WorkspaceList,
};
use postgen_core::{PostmanSettings, WorkspaceTarget};
use postgen_openapi::Collection;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Header carrying the Postman API key.
pub const API_KEY_HEADER: &str = "X-Api-Key";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the parts of the Postman API used to publish collections.
///
/// Requests are not retried; any failure is returned to the caller.
pub struct PostmanClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl PostmanClient {
    /// Create a client from settings. Fails when no API key is configured.
    pub fn new(settings: &PostmanSettings) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key()?.to_string(),
            client,
        })
    }

    /// List the workspaces the API key can see.
    #[instrument(skip(self))]
    pub async fn list_workspaces(&self) -> Result<Vec<Workspace>> {
        let response = self
            .client
            .get(format!("{}/workspaces", self.base_url))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let list: WorkspaceList = Self::check(response, "list workspaces")
            .await?
            .json()
            .await
            .map_err(|e| PublishError::UnexpectedResponse(e.to_string()))?;

        debug!("Found {} workspaces", list.workspaces.len());
        Ok(list.workspaces)
    }

    /// Find the id of the workspace called `name` (exact match).
    pub async fn resolve_workspace_id(&self, name: &str) -> Result<String> {
        self.list_workspaces()
            .await?
            .into_iter()
            .find(|workspace| workspace.name == name)
            .map(|workspace| workspace.id)
            .ok_or_else(|| PublishError::WorkspaceNotFound(name.to_string()))
    }

    /// Id of the target workspace, looking it up by name if needed.
    pub async fn workspace_id(&self, target: &WorkspaceTarget) -> Result<String> {
        match target {
            WorkspaceTarget::Id(id) => Ok(id.clone()),
            WorkspaceTarget::Name(name) => {
                let id = self.resolve_workspace_id(name).await?;
                info!("Resolved workspace '{}' to {}", name, id);
                Ok(id)
            }
        }
    }

    /// Upload `collection` into the workspace.
    #[instrument(skip(self, collection), fields(collection = %collection.info.name))]
    pub async fn create_collection(
        &self,
        collection: &Collection,
        workspace_id: &str,
    ) -> Result<CreatedCollection> {
        let payload = CreateCollectionRequest {
            collection,
            workspace: workspace_id,
        };

        let response = self
            .client
            .post(format!("{}/collections", self.base_url))
            .query(&[("workspace", workspace_id)])
            .header(API_KEY_HEADER, &self.api_key)
            .json(&payload)
            .send()
            .await?;

        let created: CreateCollectionResponse = Self::check(response, "create collection")
            .await?
            .json()
            .await
            .map_err(|e| PublishError::UnexpectedResponse(e.to_string()))?;

        info!("Collection uploaded: {}", created.collection.uid);
        Ok(created.collection)
    }

    async fn check(
        response: reqwest::Response,
        operation: &'static str,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        debug!("Response status for {}: {}", operation, status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(PublishError::ApiError {
            operation,
            status: status.as_u16(),
            body,
        })
    }
}
