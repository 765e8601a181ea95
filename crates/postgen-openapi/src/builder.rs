//! Collection builder: OpenAPI operations → tag folders of request templates.

use crate::collection::{
    Body, Collection, CollectionInfo, Header, QueryParam, Request, RequestItem, TagGroup, Url,
};
use crate::document::{
    MediaType, OpenApiDocument, Operation, Parameter, ParameterLocation, PathItem,
};
use crate::example::ExampleSynthesizer;
use crate::schema::SchemaNode;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::{debug, info};

/// Folder for operations that declare no tag.
pub const DEFAULT_TAG: &str = "uncategorized";

/// Collection name used when neither a name nor a document title is set.
pub const DEFAULT_COLLECTION_NAME: &str = "API";

const NAME_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
const JSON_MEDIA_TYPE: &str = "application/json";

/// Builds a [`Collection`] from an OpenAPI document.
///
/// # Example
///
/// ```
/// use postgen_openapi::{CollectionBuilder, OpenApiDocument};
///
/// let document = OpenApiDocument::from_str(r#"
///     {"paths": {"/users": {"get": {"tags": ["Users"], "summary": "List users"}}}}
/// "#)?;
///
/// let collection = CollectionBuilder::new(&document).build();
/// let users = collection.group("Users").unwrap();
/// assert_eq!(users.item[0].name, "List users");
/// assert_eq!(users.item[0].request.url.raw, "{{baseUrl}}/users");
/// # Ok::<(), postgen_openapi::OpenApiError>(())
/// ```
pub struct CollectionBuilder<'a> {
    document: &'a OpenApiDocument,
    name: Option<String>,
    base_url_variable: String,
    now: DateTime<Utc>,
}

impl<'a> CollectionBuilder<'a> {
    pub fn new(document: &'a OpenApiDocument) -> Self {
        Self {
            document,
            name: None,
            base_url_variable: "baseUrl".to_string(),
            now: Utc::now(),
        }
    }

    /// Name prefix for the collection; defaults to the document title.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Variable rendered as the request host (`{{variable}}`).
    pub fn with_base_url_variable(mut self, variable: impl Into<String>) -> Self {
        self.base_url_variable = variable.into();
        self
    }

    /// Build time, used for the name suffix and `date-time` examples.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn build(&self) -> Collection {
        let synthesizer = ExampleSynthesizer::at(&self.document.components.schemas, self.now);
        let mut groups: IndexMap<String, Vec<RequestItem>> = IndexMap::new();

        for (path, path_item) in &self.document.paths {
            for (method, operation) in &path_item.operations {
                let tag = operation
                    .tags
                    .first()
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_TAG.to_string());

                let item = self.request_item(path, method, path_item, operation, &synthesizer);
                debug!("{} {} -> folder '{}'", item.request.method, path, tag);
                groups.entry(tag).or_default().push(item);
            }
        }

        let collection = Collection {
            info: CollectionInfo::new(self.collection_name()),
            item: groups
                .into_iter()
                .map(|(name, item)| TagGroup { name, item })
                .collect(),
        };

        info!(
            "Built collection '{}' with {} requests in {} folders",
            collection.info.name,
            collection.request_count(),
            collection.item.len()
        );
        collection
    }

    fn collection_name(&self) -> String {
        let prefix = self
            .name
            .as_deref()
            .or(self.document.info.title.as_deref())
            .unwrap_or(DEFAULT_COLLECTION_NAME);
        format!("{}_{}", prefix, self.now.format(NAME_TIMESTAMP_FORMAT))
    }

    fn request_item(
        &self,
        path: &str,
        method: &str,
        path_item: &PathItem,
        operation: &Operation,
        synthesizer: &ExampleSynthesizer<'_>,
    ) -> RequestItem {
        let method = method.to_uppercase();
        let name = operation
            .summary
            .clone()
            .unwrap_or_else(|| format!("{} {}", method, path));

        let mut request = Request {
            method,
            url: self.url(path, self.query_params(path_item, operation)),
            body: None,
            header: Vec::new(),
        };

        if let Some((media_type, schema)) = operation
            .request_body
            .as_ref()
            .and_then(|body| preferred_media_type(&body.content))
        {
            let example = synthesizer.synthesize(schema);
            request.body = Some(Body::json(format!("{:#}", example)));
            request.header.push(Header::content_type(media_type));
        }

        RequestItem { name, request }
    }

    fn url(&self, path: &str, query: Vec<QueryParam>) -> Url {
        let host = format!("{{{{{}}}}}", self.base_url_variable);
        Url {
            raw: format!("{}{}", host, path),
            host: vec![host],
            path: path
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
            query: (!query.is_empty()).then_some(query),
        }
    }

    /// Query parameters, path-level first. An operation-level parameter
    /// replaces a path-level one with the same name and location.
    fn query_params(&self, path_item: &PathItem, operation: &Operation) -> Vec<QueryParam> {
        let components = &self.document.components;
        let operation_params: Vec<&Parameter> = operation
            .parameters
            .iter()
            .filter_map(|p| components.parameter(p))
            .collect();

        let shared = path_item
            .parameters
            .iter()
            .filter_map(|p| components.parameter(p))
            .filter(|shared| {
                !operation_params
                    .iter()
                    .any(|p| p.name == shared.name && p.location == shared.location)
            });

        shared
            .chain(operation_params.iter().copied())
            .filter(|p| p.location == ParameterLocation::Query)
            .map(|p| QueryParam::placeholder(&p.name, p.description.clone().unwrap_or_default()))
            .collect()
    }
}

/// Pick the media type whose example becomes the body: `application/json`,
/// then any `+json` type, then the last declared one. Entries without a
/// schema never qualify.
fn preferred_media_type(
    content: &IndexMap<String, MediaType>,
) -> Option<(&str, &SchemaNode)> {
    let candidates = || {
        content
            .iter()
            .filter_map(|(media_type, entry)| Some((media_type.as_str(), entry.schema.as_ref()?)))
    };
    let essence = |media_type: &str| {
        media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    };

    candidates()
        .find(|(media_type, _)| essence(media_type) == JSON_MEDIA_TYPE)
        .or_else(|| candidates().find(|(media_type, _)| essence(media_type).ends_with("+json")))
        .or_else(|| candidates().last())
}
