//! Schema nodes and the named-schema registry.
//!
//! Raw OpenAPI schemas are loosely shaped JSON. They are folded into a
//! [`SchemaNode`] once, at load time, keeping only what example synthesis
//! looks at. Conversion is total: anything unrecognised becomes
//! [`SchemaNode::Untyped`].

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Prefix of local references into `components.schemas`.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

const FORMAT_BINARY: &str = "binary";

/// A schema reduced to the shape that drives example synthesis.
///
/// Variant order mirrors precedence: a `$ref` hides every sibling keyword,
/// an explicit example hides the type, and a union falls back to `otherwise`
/// when none of its alternatives match.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum SchemaNode {
    /// `$ref` to a named schema
    Reference(String),
    /// Explicit `example` (or first of `examples`)
    Example(Value),
    /// `anyOf` / `oneOf`
    Union {
        choices: Vec<UnionChoice>,
        otherwise: Box<SchemaNode>,
    },
    /// `type: array`
    Array(Box<SchemaNode>),
    /// `type: object`, properties in declaration order
    Object(IndexMap<String, SchemaNode>),
    /// `type: string | integer | boolean | null`
    Primitive {
        kind: PrimitiveKind,
        format: Option<String>,
        nullable: bool,
    },
    /// No recognised type
    Untyped { nullable: bool },
}

/// Scalar schema types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Integer,
    Boolean,
    Null,
}

/// One alternative of a union, classified when the schema is loaded.
///
/// Alternatives are inspected shallowly: a `$ref` alternative is not
/// resolved and only matches through its own `example`.
#[derive(Debug, Clone, PartialEq)]
pub enum UnionChoice {
    BinaryString,
    String,
    Integer,
    Boolean,
    Example(Value),
    Unmatched,
}

impl Default for SchemaNode {
    fn default() -> Self {
        SchemaNode::Untyped { nullable: false }
    }
}

impl From<Value> for SchemaNode {
    fn from(value: Value) -> Self {
        SchemaNode::from_value(&value)
    }
}

impl SchemaNode {
    /// Fold a raw JSON schema into a node.
    pub fn from_value(value: &Value) -> Self {
        let Some(schema) = value.as_object() else {
            return SchemaNode::default();
        };

        if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
            return SchemaNode::Reference(reference.to_string());
        }

        if let Some(example) = explicit_example(schema) {
            return SchemaNode::Example(example.clone());
        }

        let typed = Self::typed(schema);
        let alternatives = schema
            .get("anyOf")
            .or_else(|| schema.get("oneOf"))
            .and_then(Value::as_array);

        match alternatives {
            Some(alternatives) => SchemaNode::Union {
                choices: alternatives.iter().map(UnionChoice::classify).collect(),
                otherwise: Box::new(typed),
            },
            None => typed,
        }
    }

    fn typed(schema: &Map<String, Value>) -> Self {
        let nullable = schema
            .get("nullable")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let format = schema
            .get("format")
            .and_then(Value::as_str)
            .map(str::to_string);

        let kind = match type_tag(schema) {
            Some("array") => {
                let items = schema.get("items").map(Self::from_value).unwrap_or_default();
                return SchemaNode::Array(Box::new(items));
            }
            Some("object") => {
                let properties = schema
                    .get("properties")
                    .and_then(Value::as_object)
                    .map(|props| {
                        props
                            .iter()
                            .map(|(name, prop)| (name.clone(), Self::from_value(prop)))
                            .collect()
                    })
                    .unwrap_or_default();
                return SchemaNode::Object(properties);
            }
            Some("string") => PrimitiveKind::String,
            Some("integer") => PrimitiveKind::Integer,
            Some("boolean") => PrimitiveKind::Boolean,
            Some("null") => PrimitiveKind::Null,
            _ => return SchemaNode::Untyped { nullable },
        };

        SchemaNode::Primitive {
            kind,
            format,
            nullable,
        }
    }

    /// Shorthand for a primitive node without format.
    pub fn primitive(kind: PrimitiveKind) -> Self {
        SchemaNode::Primitive {
            kind,
            format: None,
            nullable: false,
        }
    }
}

impl UnionChoice {
    fn classify(value: &Value) -> Self {
        let Some(schema) = value.as_object() else {
            return UnionChoice::Unmatched;
        };

        let format = schema.get("format").and_then(Value::as_str);
        match type_tag(schema) {
            Some("string") if format == Some(FORMAT_BINARY) => UnionChoice::BinaryString,
            Some("string") => UnionChoice::String,
            Some("integer") => UnionChoice::Integer,
            Some("boolean") => UnionChoice::Boolean,
            _ => match explicit_example(schema) {
                Some(example) => UnionChoice::Example(example.clone()),
                None => UnionChoice::Unmatched,
            },
        }
    }
}

/// `type` may be a single tag or, in OpenAPI 3.1, a list. For a list the
/// first non-null tag wins.
fn type_tag(schema: &Map<String, Value>) -> Option<&str> {
    match schema.get("type")? {
        Value::String(tag) => Some(tag.as_str()),
        Value::Array(tags) => {
            let mut tags = tags.iter().filter_map(Value::as_str);
            let first = tags.next()?;
            if first == "null" {
                tags.next().or(Some(first))
            } else {
                Some(first)
            }
        }
        _ => None,
    }
}

fn explicit_example(schema: &Map<String, Value>) -> Option<&Value> {
    schema.get("example").or_else(|| {
        schema
            .get("examples")
            .and_then(Value::as_array)
            .and_then(|examples| examples.first())
    })
}

static EMPTY_SCHEMA: SchemaNode = SchemaNode::Untyped { nullable: false };

/// Named schemas from `components.schemas`, immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SchemaRegistry {
    schemas: IndexMap<String, SchemaNode>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a schema by its bare name.
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.schemas.get(name)
    }

    /// Resolve a `#/components/schemas/<Name>` reference.
    ///
    /// Unknown names and references of any other shape resolve to the empty
    /// schema. The returned node is not resolved further.
    pub fn resolve(&self, reference: &str) -> &SchemaNode {
        let Some(name) = schema_name(reference) else {
            tracing::debug!("Unsupported reference: {}", reference);
            return &EMPTY_SCHEMA;
        };

        self.get(&name).unwrap_or_else(|| {
            tracing::debug!("Unresolved reference: {}", reference);
            &EMPTY_SCHEMA
        })
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl FromIterator<(String, SchemaNode)> for SchemaRegistry {
    fn from_iter<I: IntoIterator<Item = (String, SchemaNode)>>(iter: I) -> Self {
        Self {
            schemas: iter.into_iter().collect(),
        }
    }
}

/// Extract the schema name from a local reference, undoing JSON-pointer
/// escapes (`~1` → `/`, `~0` → `~`).
pub fn schema_name(reference: &str) -> Option<Cow<'_, str>> {
    let name = reference.strip_prefix(SCHEMA_REF_PREFIX)?;
    if name.is_empty() {
        return None;
    }
    if name.contains('~') {
        Some(Cow::Owned(name.replace("~1", "/").replace("~0", "~")))
    } else {
        Some(Cow::Borrowed(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reference_hides_siblings() {
        let node = SchemaNode::from_value(&json!({
            "$ref": "#/components/schemas/User",
            "type": "string",
            "example": "ignored"
        }));
        assert_eq!(node, SchemaNode::Reference("#/components/schemas/User".into()));
    }

    #[test]
    fn test_example_beats_type() {
        let node = SchemaNode::from_value(&json!({"type": "integer", "example": 7}));
        assert_eq!(node, SchemaNode::Example(json!(7)));

        let node = SchemaNode::from_value(&json!({"type": "string", "examples": ["a", "b"]}));
        assert_eq!(node, SchemaNode::Example(json!("a")));
    }

    #[test]
    fn test_union_keeps_fallback_type() {
        let node = SchemaNode::from_value(&json!({
            "type": "boolean",
            "anyOf": [
                {"type": "string", "format": "binary"},
                {"$ref": "#/components/schemas/Thing"},
                {"example": {"k": 1}},
                {"type": "number"}
            ]
        }));

        assert_eq!(
            node,
            SchemaNode::Union {
                choices: vec![
                    UnionChoice::BinaryString,
                    UnionChoice::Unmatched,
                    UnionChoice::Example(json!({"k": 1})),
                    UnionChoice::Unmatched,
                ],
                otherwise: Box::new(SchemaNode::primitive(PrimitiveKind::Boolean)),
            }
        );
    }

    #[test]
    fn test_object_properties_keep_declaration_order() {
        let node = SchemaNode::from_value(&json!({
            "type": "object",
            "properties": {
                "zeta": {"type": "string"},
                "alpha": {"type": "integer"},
                "mid": {"type": "array", "items": {"type": "boolean"}}
            }
        }));

        let SchemaNode::Object(properties) = node else {
            panic!("expected object node");
        };
        let keys: Vec<&str> = properties.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
        assert_eq!(
            properties["mid"],
            SchemaNode::Array(Box::new(SchemaNode::primitive(PrimitiveKind::Boolean)))
        );
    }

    #[test]
    fn test_type_list_and_unknown_types() {
        let node = SchemaNode::from_value(&json!({"type": ["null", "string"], "format": "date-time"}));
        assert_eq!(
            node,
            SchemaNode::Primitive {
                kind: PrimitiveKind::String,
                format: Some("date-time".into()),
                nullable: false,
            }
        );

        assert_eq!(
            SchemaNode::from_value(&json!({"type": "number", "nullable": true})),
            SchemaNode::Untyped { nullable: true }
        );
        assert_eq!(SchemaNode::from_value(&json!("not a schema")), SchemaNode::default());
        assert_eq!(
            SchemaNode::from_value(&json!({"type": "array"})),
            SchemaNode::Array(Box::new(SchemaNode::default()))
        );
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        let registry: SchemaRegistry = serde_json::from_value(json!({
            "User": {"type": "object", "properties": {"id": {"type": "integer"}}},
            "Alias": {"$ref": "#/components/schemas/User"}
        }))
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(matches!(
            registry.resolve("#/components/schemas/User"),
            SchemaNode::Object(_)
        ));
        // One level only: the alias comes back as a reference.
        assert_eq!(
            registry.resolve("#/components/schemas/Alias"),
            &SchemaNode::Reference("#/components/schemas/User".into())
        );
        assert_eq!(registry.resolve("#/components/schemas/Missing"), &SchemaNode::default());
        assert_eq!(registry.resolve("#/definitions/User"), &SchemaNode::default());
    }

    #[test]
    fn test_schema_name_prefix_is_exact() {
        assert_eq!(schema_name("#/components/schemas/schema_x").as_deref(), Some("schema_x"));
        assert_eq!(schema_name("#/components/schemas/a~1b~0c").as_deref(), Some("a/b~c"));
        assert_eq!(schema_name("#/components/schemas/"), None);
        assert_eq!(schema_name("User"), None);
    }
}
