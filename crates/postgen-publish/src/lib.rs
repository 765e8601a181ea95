//! # postgen Publish
//!
//! Uploads collections to a Postman workspace.
//!
//! ## Example
//!
//! ```no_run
//! use postgen_core::PostgenConfig;
//! use postgen_openapi::{CollectionBuilder, OpenApiDocument};
//! use postgen_publish::PostmanClient;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = PostgenConfig::load()?;
//! let document = OpenApiDocument::load(config.openapi_source()?).await?;
//! let collection = CollectionBuilder::new(&document).build();
//!
//! let client = PostmanClient::new(&config.postman)?;
//! let workspace_id = client.workspace_id(&config.postman.workspace_target()?).await?;
//! let created = client.create_collection(&collection, &workspace_id).await?;
//! println!("Uploaded {}", created.uid);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod types;

pub use client::{API_KEY_HEADER, PostmanClient};
pub use error::{PublishError, Result};
pub use types::{CreatedCollection, Workspace};
