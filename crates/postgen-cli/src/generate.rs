use anyhow::{Context, Result};
use clap::Args;
use postgen_core::PostgenConfig;
use postgen_openapi::{Collection, CollectionBuilder, OpenApiDocument};
use postgen_publish::PostmanClient;
use postgen_telemetry::{
    BuildSpanAttributes, PublishSpanAttributes, trace_collection_build, trace_publish,
};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// OpenAPI document URL or file (overrides OPENAPI_URL)
    #[arg(long)]
    pub source: Option<String>,

    /// Also write the collection JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Collection name prefix (default: the document title)
    #[arg(long)]
    pub name: Option<String>,

    /// Variable used as request host, rendered as {{variable}}
    #[arg(long)]
    pub base_url_variable: Option<String>,

    /// Target workspace name (overrides POSTMAN_WORKSPACE_NAME)
    #[arg(long, conflicts_with = "workspace_id")]
    pub workspace: Option<String>,

    /// Target workspace id (overrides POSTMAN_WORKSPACE_ID)
    #[arg(long)]
    pub workspace_id: Option<String>,

    /// Build the collection without uploading it
    #[arg(long)]
    pub no_upload: bool,
}

impl GenerateArgs {
    /// Command-line values win over file and environment configuration.
    fn apply(&self, config: &mut PostgenConfig) {
        if let Some(source) = &self.source {
            config.source.openapi_url = Some(source.clone());
        }
        if let Some(name) = &self.name {
            config.collection.name = Some(name.clone());
        }
        if let Some(variable) = &self.base_url_variable {
            config.collection.base_url_variable = variable.clone();
        }
        if let Some(name) = &self.workspace {
            config.postman.workspace_id = None;
            config.postman.workspace_name = Some(name.clone());
        }
        if let Some(id) = &self.workspace_id {
            config.postman.workspace_id = Some(id.clone());
        }
    }
}

pub async fn execute(args: GenerateArgs, mut config: PostgenConfig) -> Result<()> {
    args.apply(&mut config);
    let source = config.openapi_source()?.to_string();

    // Resolve the upload target first so a bad key or workspace fails fast.
    let target = if args.no_upload {
        None
    } else {
        let client = PostmanClient::new(&config.postman)?;
        let workspace_id = client
            .workspace_id(&config.postman.workspace_target()?)
            .await
            .context("Failed to resolve target workspace")?;
        Some((client, workspace_id))
    };

    info!("Loading OpenAPI document...");
    let document = OpenApiDocument::load(&source)
        .await
        .with_context(|| format!("Failed to load OpenAPI document from {}", source))?;

    info!("Building collection...");
    let collection = build_collection(&document, &config);
    trace_collection_build(BuildSpanAttributes {
        source: source.clone(),
        collection_name: collection.info.name.clone(),
        request_count: collection.request_count(),
        folder_count: collection.item.len(),
    });

    if let Some(path) = &args.output {
        write_collection(&collection, path)?;
        info!("Collection written to {}", path.display());
    }

    let Some((client, workspace_id)) = target else {
        info!("Upload skipped");
        return Ok(());
    };

    info!("Uploading collection...");
    let created = client
        .create_collection(&collection, &workspace_id)
        .await
        .context("Failed to upload collection")?;

    trace_publish(PublishSpanAttributes {
        workspace_id,
        collection_name: created.name.clone(),
        collection_uid: created.uid.clone(),
    });
    println!("Collection uploaded: {}", created.uid);
    Ok(())
}

fn build_collection(document: &OpenApiDocument, config: &PostgenConfig) -> Collection {
    let mut builder = CollectionBuilder::new(document)
        .with_base_url_variable(config.collection.base_url_variable.clone());
    if let Some(name) = &config.collection.name {
        builder = builder.with_name(name.clone());
    }
    builder.build()
}

fn write_collection(collection: &Collection, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(collection)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write collection to {}", path.display()))
}
