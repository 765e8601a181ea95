//! Span helpers for collection builds and uploads

use crate::attributes::*;

/// Attributes for tracing a collection build
#[derive(Debug, Clone)]
pub struct BuildSpanAttributes {
    pub source: String,
    pub collection_name: String,
    pub request_count: usize,
    pub folder_count: usize,
}

/// Attributes for tracing a collection upload
#[derive(Debug, Clone)]
pub struct PublishSpanAttributes {
    pub workspace_id: String,
    pub collection_name: String,
    pub collection_uid: String,
}

/// Record a span for a finished collection build.
pub fn trace_collection_build(attrs: BuildSpanAttributes) {
    let span = tracing::info_span!(
        "build_collection",
        { POSTGEN_SOURCE } = %attrs.source,
        { POSTGEN_COLLECTION_NAME } = %attrs.collection_name,
        { POSTGEN_REQUEST_COUNT } = attrs.request_count,
        { POSTGEN_FOLDER_COUNT } = attrs.folder_count,
    );

    // Enter and immediately exit the span (it's recorded)
    let _guard = span.enter();
}

/// Record a span for a finished upload.
pub fn trace_publish(attrs: PublishSpanAttributes) {
    let span = tracing::info_span!(
        "publish_collection",
        { POSTGEN_WORKSPACE_ID } = %attrs.workspace_id,
        { POSTGEN_COLLECTION_NAME } = %attrs.collection_name,
        { POSTGEN_COLLECTION_UID } = %attrs.collection_uid,
    );

    let _guard = span.enter();
}
