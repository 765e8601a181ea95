//! # postgen OpenAPI
//!
//! Turns an OpenAPI document into a Postman collection.
//!
//! ## Features
//!
//! - Load OpenAPI v3 documents (JSON and YAML) from a string, file or URL
//! - Tolerate missing or malformed sections instead of failing
//! - Synthesize one example value per request-body schema, following `$ref`s
//! - Group requests into folders by their first tag
//!
//! ## Example
//!
//! ```no_run
//! use postgen_openapi::{CollectionBuilder, OpenApiDocument};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), postgen_openapi::OpenApiError> {
//! let document = OpenApiDocument::load("https://api.example.com/openapi.json").await?;
//! let collection = CollectionBuilder::new(&document).build();
//! println!("{} requests", collection.request_count());
//! # Ok(())
//! # }
//! ```

mod builder;
mod collection;
mod document;
mod error;
mod example;
mod parser;
mod schema;

pub use builder::{CollectionBuilder, DEFAULT_COLLECTION_NAME, DEFAULT_TAG};
pub use collection::{
    Body, BodyOptions, Collection, CollectionInfo, Header, POSTMAN_SCHEMA_URL, QueryParam,
    RawOptions, Request, RequestItem, TagGroup, Url,
};
pub use document::{
    Components, HTTP_METHODS, Info, MediaType, OpenApiDocument, Operation, Parameter,
    ParameterLocation, ParameterOrRef, PathItem, RequestBody,
};
pub use error::{OpenApiError, Result};
pub use example::{ExampleSynthesizer, TIMESTAMP_FORMAT};
pub use schema::{
    PrimitiveKind, SCHEMA_REF_PREFIX, SchemaNode, SchemaRegistry, UnionChoice, schema_name,
};
