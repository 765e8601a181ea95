//! # postgen Telemetry
//!
//! Structured logging and OpenTelemetry spans for collection builds and
//! uploads.

mod spans;
mod tracer;

pub use spans::{
    BuildSpanAttributes, PublishSpanAttributes, trace_collection_build, trace_publish,
};
pub use tracer::{filter_for_verbosity, init_telemetry, register_span_processor, tracer_provider};

/// Span attribute names.
pub mod attributes {
    pub const POSTGEN_SOURCE: &str = "postgen.source";
    pub const POSTGEN_COLLECTION_NAME: &str = "postgen.collection.name";
    pub const POSTGEN_COLLECTION_UID: &str = "postgen.collection.uid";
    pub const POSTGEN_REQUEST_COUNT: &str = "postgen.collection.request_count";
    pub const POSTGEN_FOLDER_COUNT: &str = "postgen.collection.folder_count";
    pub const POSTGEN_WORKSPACE_ID: &str = "postgen.workspace.id";

    // System name constant
    pub const SYSTEM_NAME: &str = "postgen";
}
