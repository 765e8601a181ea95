//! Fetch → build → publish against a mocked document host and Postman API.

use mockito::Matcher;
use postgen_core::{PostgenConfig, WorkspaceTarget};
use postgen_openapi::{CollectionBuilder, OpenApiDocument};
use postgen_publish::{API_KEY_HEADER, PostmanClient, PublishError};
use serde_json::json;

const SPEC: &str = r#"{
    "info": {"title": "Billing"},
    "paths": {
        "/invoices": {
            "post": {
                "tags": ["Invoices"],
                "summary": "Create invoice",
                "requestBody": {"content": {"application/json": {"schema": {
                    "type": "object",
                    "properties": {"amount": {"type": "integer"}, "paid": {"type": "boolean"}}
                }}}}
            }
        }
    }
}"#;

fn config_for(server: &mockito::ServerGuard) -> PostgenConfig {
    let mut config = PostgenConfig::default();
    config.source.openapi_url = Some(format!("{}/openapi.json", server.url()));
    config.postman.api_key = Some("pmak-test".into());
    config.postman.api_base_url = server.url();
    config.postman.workspace_name = Some("Finance".into());
    config
}

#[tokio::test]
async fn test_publish_to_named_workspace() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _spec = server
        .mock("GET", "/openapi.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SPEC)
        .create_async()
        .await;
    let workspaces = server
        .mock("GET", "/workspaces")
        .match_header(API_KEY_HEADER, "pmak-test")
        .with_status(200)
        .with_body(
            json!({"workspaces": [
                {"id": "ws-1", "name": "Sandbox", "type": "personal"},
                {"id": "ws-2", "name": "Finance", "type": "team"}
            ]})
            .to_string(),
        )
        .create_async()
        .await;
    let upload = server
        .mock("POST", "/collections")
        .match_header(API_KEY_HEADER, "pmak-test")
        .match_query(Matcher::UrlEncoded("workspace".into(), "ws-2".into()))
        .match_body(Matcher::PartialJson(json!({"workspace": "ws-2"})))
        .with_status(200)
        .with_body(r#"{"collection": {"id": "col-9", "name": "Billing", "uid": "42-col-9"}}"#)
        .create_async()
        .await;

    let config = config_for(&server);
    let document = OpenApiDocument::load(config.openapi_source()?).await?;
    let collection = CollectionBuilder::new(&document).build();

    let client = PostmanClient::new(&config.postman)?;
    let target = config.postman.workspace_target()?;
    assert_eq!(target, WorkspaceTarget::Name("Finance".into()));

    let workspace_id = client.workspace_id(&target).await?;
    let created = client.create_collection(&collection, &workspace_id).await?;

    assert_eq!(created.uid, "42-col-9");
    workspaces.assert_async().await;
    upload.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_document_fetch_failure_is_fatal() {
    let mut server = mockito::Server::new_async().await;
    let _spec = server
        .mock("GET", "/openapi.json")
        .with_status(503)
        .create_async()
        .await;

    let config = config_for(&server);
    let result = OpenApiDocument::load(config.openapi_source().unwrap()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_rejected_upload_is_surfaced() {
    let mut server = mockito::Server::new_async().await;
    let _upload = server
        .mock("POST", "/collections")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"error": {"name": "AuthenticationError"}}"#)
        .create_async()
        .await;

    let config = config_for(&server);
    let document = OpenApiDocument::from_str(SPEC).unwrap();
    let collection = CollectionBuilder::new(&document).build();
    let client = PostmanClient::new(&config.postman).unwrap();

    let err = client
        .create_collection(&collection, "ws-2")
        .await
        .unwrap_err();
    match err {
        PublishError::ApiError { status, body, .. } => {
            assert_eq!(status, 401);
            assert!(body.contains("AuthenticationError"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_client_requires_api_key() {
    let settings = PostgenConfig::default().postman;
    assert!(matches!(
        PostmanClient::new(&settings),
        Err(PublishError::Config(_))
    ));
}
