//! Example value synthesis.

use crate::schema::{PrimitiveKind, SchemaNode, SchemaRegistry, UnionChoice};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use tracing::debug;

pub const STRING_PLACEHOLDER: &str = "example_string_2";
pub const INTEGER_PLACEHOLDER: i64 = 1;
pub const BOOLEAN_PLACEHOLDER: bool = false;

pub const UNION_BINARY_PLACEHOLDER: &str = "binary_data";
pub const UNION_STRING_PLACEHOLDER: &str = "example_string_1";
pub const UNION_INTEGER_PLACEHOLDER: i64 = 42;
pub const UNION_BOOLEAN_PLACEHOLDER: bool = true;

/// Layout of synthesized `date-time` strings.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const FORMAT_DATE_TIME: &str = "date-time";

/// Produces one representative JSON value per schema node.
///
/// The clock is read once, when the synthesizer is created, so every
/// `date-time` field in a run carries the same instant.
///
/// # Example
///
/// ```
/// use postgen_openapi::{ExampleSynthesizer, SchemaNode, SchemaRegistry};
/// use serde_json::json;
///
/// let registry = SchemaRegistry::new();
/// let schema = SchemaNode::from_value(&json!({
///     "type": "object",
///     "properties": {"id": {"type": "integer"}, "name": {"type": "string"}}
/// }));
///
/// let example = ExampleSynthesizer::new(&registry).synthesize(&schema);
/// assert_eq!(example, json!({"id": 1, "name": "example_string_2"}));
/// ```
pub struct ExampleSynthesizer<'a> {
    registry: &'a SchemaRegistry,
    timestamp: String,
}

impl<'a> ExampleSynthesizer<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self::at(registry, Utc::now())
    }

    /// Synthesizer whose `date-time` examples render `now`.
    pub fn at(registry: &'a SchemaRegistry, now: DateTime<Utc>) -> Self {
        Self {
            registry,
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn synthesize(&self, node: &SchemaNode) -> Value {
        let mut expanding = Vec::new();
        self.example_for(node, &mut expanding)
    }

    /// `expanding` holds the references currently being followed; meeting
    /// one of them again means the registry is cyclic and yields `null`.
    fn example_for(&self, node: &SchemaNode, expanding: &mut Vec<String>) -> Value {
        match node {
            SchemaNode::Reference(reference) => {
                if expanding.contains(reference) {
                    debug!("Cyclic reference {} replaced with null", reference);
                    return Value::Null;
                }
                expanding.push(reference.clone());
                let example = self.example_for(self.registry.resolve(reference), expanding);
                expanding.pop();
                example
            }
            SchemaNode::Example(example) => example.clone(),
            SchemaNode::Union { choices, otherwise } => choices
                .iter()
                .find_map(UnionChoice::example)
                .unwrap_or_else(|| self.example_for(otherwise, expanding)),
            SchemaNode::Array(items) => Value::Array(vec![self.example_for(items, expanding)]),
            SchemaNode::Object(properties) => Value::Object(
                properties
                    .iter()
                    .map(|(name, property)| (name.clone(), self.example_for(property, expanding)))
                    .collect(),
            ),
            SchemaNode::Primitive { kind, format, .. } => match kind {
                PrimitiveKind::String if format.as_deref() == Some(FORMAT_DATE_TIME) => {
                    Value::String(self.timestamp.clone())
                }
                PrimitiveKind::String => json!(STRING_PLACEHOLDER),
                PrimitiveKind::Integer => json!(INTEGER_PLACEHOLDER),
                PrimitiveKind::Boolean => json!(BOOLEAN_PLACEHOLDER),
                PrimitiveKind::Null => Value::Null,
            },
            SchemaNode::Untyped { .. } => Value::Null,
        }
    }
}

impl UnionChoice {
    fn example(&self) -> Option<Value> {
        match self {
            UnionChoice::BinaryString => Some(json!(UNION_BINARY_PLACEHOLDER)),
            UnionChoice::String => Some(json!(UNION_STRING_PLACEHOLDER)),
            UnionChoice::Integer => Some(json!(UNION_INTEGER_PLACEHOLDER)),
            UnionChoice::Boolean => Some(json!(UNION_BOOLEAN_PLACEHOLDER)),
            UnionChoice::Example(example) => Some(example.clone()),
            UnionChoice::Unmatched => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, TimeZone};
    use pretty_assertions::assert_eq;

    fn node(value: Value) -> SchemaNode {
        SchemaNode::from_value(&value)
    }

    fn registry(value: Value) -> SchemaRegistry {
        serde_json::from_value(value).unwrap()
    }

    fn synthesize(schema: Value) -> Value {
        let registry = SchemaRegistry::new();
        ExampleSynthesizer::new(&registry).synthesize(&node(schema))
    }

    #[test]
    fn test_explicit_example_returned_verbatim() {
        let example = json!({"nested": [1, "two", null], "flag": true});
        assert_eq!(
            synthesize(json!({"type": "object", "example": example.clone()})),
            example
        );
        assert_eq!(synthesize(json!({"type": "integer", "example": 0})), json!(0));
    }

    #[test]
    fn test_large_integer_example_is_not_rounded() {
        let schema: Value =
            serde_json::from_str(r#"{"type": "integer", "example": 123456789012345678901234567890}"#)
                .unwrap();
        let example = synthesize(schema);
        assert_eq!(example.to_string(), "123456789012345678901234567890");
    }

    #[test]
    fn test_primitive_placeholders() {
        assert_eq!(synthesize(json!({"type": "string"})), json!("example_string_2"));
        assert_eq!(synthesize(json!({"type": "integer"})), json!(1));
        assert_eq!(synthesize(json!({"type": "boolean"})), json!(false));
        assert_eq!(synthesize(json!({"type": "null"})), Value::Null);
        assert_eq!(synthesize(json!({"nullable": true})), Value::Null);
        assert_eq!(synthesize(json!({"type": "number"})), Value::Null);
        assert_eq!(synthesize(json!({})), Value::Null);
    }

    #[test]
    fn test_nullable_does_not_override_type() {
        assert_eq!(
            synthesize(json!({"type": "string", "nullable": true})),
            json!("example_string_2")
        );
    }

    #[test]
    fn test_object_example() {
        assert_eq!(
            synthesize(json!({
                "type": "object",
                "properties": {"id": {"type": "integer"}, "name": {"type": "string"}}
            })),
            json!({"id": 1, "name": "example_string_2"})
        );
        assert_eq!(synthesize(json!({"type": "object"})), json!({}));
    }

    #[test]
    fn test_object_key_order_follows_declaration() {
        let example = synthesize(json!({
            "type": "object",
            "properties": {"b": {"type": "string"}, "a": {"type": "integer"}}
        }));
        let keys: Vec<&String> = example.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn test_array_wraps_single_item() {
        assert_eq!(
            synthesize(json!({"type": "array", "items": {"type": "boolean"}})),
            json!([false])
        );
        assert_eq!(
            synthesize(json!({
                "type": "array",
                "items": {"type": "array", "items": {"type": "object", "properties": {"x": {"type": "integer"}}}}
            })),
            json!([[{"x": 1}]])
        );
        assert_eq!(synthesize(json!({"type": "array"})), json!([null]));
    }

    #[test]
    fn test_union_precedence() {
        assert_eq!(
            synthesize(json!({"anyOf": [{"type": "string"}, {"type": "integer"}]})),
            json!("example_string_1")
        );
        assert_eq!(
            synthesize(json!({"anyOf": [{"type": "integer"}, {"type": "string"}]})),
            json!(42)
        );
        assert_eq!(
            synthesize(json!({"anyOf": [{"type": "null"}, {"type": "string", "format": "binary"}]})),
            json!("binary_data")
        );
        assert_eq!(
            synthesize(json!({"oneOf": [{"type": "number"}, {"type": "boolean"}]})),
            json!(true)
        );
        assert_eq!(
            synthesize(json!({"anyOf": [{"type": "object"}, {"example": [1, 2]}]})),
            json!([1, 2])
        );
    }

    #[test]
    fn test_union_falls_through_to_own_type() {
        assert_eq!(
            synthesize(json!({"type": "integer", "anyOf": [{"type": "null"}]})),
            json!(1)
        );
        assert_eq!(
            synthesize(json!({"anyOf": [{"$ref": "#/components/schemas/X"}, {"type": "null"}]})),
            Value::Null
        );
    }

    #[test]
    fn test_date_time_uses_clock() {
        let registry = SchemaRegistry::new();
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 1).unwrap();
        let example = ExampleSynthesizer::at(&registry, now)
            .synthesize(&node(json!({"type": "string", "format": "date-time"})));
        assert_eq!(example, json!("2024-02-29T23:59:01Z"));
    }

    #[test]
    fn test_date_time_matches_pattern() {
        let example = synthesize(json!({"type": "string", "format": "date-time"}));
        let text = example.as_str().unwrap();

        assert_eq!(text.len(), 20);
        assert!(text.ends_with('Z'));
        assert!(NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_references_are_followed() {
        let registry = registry(json!({
            "User": {
                "type": "object",
                "properties": {
                    "id": {"type": "integer"},
                    "tags": {"type": "array", "items": {"$ref": "#/components/schemas/Tag"}}
                }
            },
            "Tag": {"type": "string", "example": "vip"},
            "Alias": {"$ref": "#/components/schemas/User"}
        }));
        let synthesizer = ExampleSynthesizer::new(&registry);

        let example = synthesizer.synthesize(&SchemaNode::Reference("#/components/schemas/Alias".into()));
        assert_eq!(example, json!({"id": 1, "tags": ["vip"]}));
    }

    #[test]
    fn test_missing_reference_degrades_to_null() {
        let registry = SchemaRegistry::new();
        let example = ExampleSynthesizer::new(&registry)
            .synthesize(&SchemaNode::Reference("#/components/schemas/Nope".into()));
        assert_eq!(example, Value::Null);
    }

    #[test]
    fn test_cyclic_references_terminate() {
        let registry = registry(json!({
            "Node": {
                "type": "object",
                "properties": {
                    "value": {"type": "integer"},
                    "next": {"$ref": "#/components/schemas/Node"},
                    "children": {"type": "array", "items": {"$ref": "#/components/schemas/Node"}}
                }
            }
        }));

        let example = ExampleSynthesizer::new(&registry)
            .synthesize(&SchemaNode::Reference("#/components/schemas/Node".into()));
        assert_eq!(example, json!({"value": 1, "next": null, "children": [null]}));
    }

    #[test]
    fn test_sibling_references_are_not_cycles() {
        let registry = registry(json!({
            "Money": {"type": "object", "properties": {"amount": {"type": "integer"}}}
        }));
        let schema = node(json!({
            "type": "object",
            "properties": {
                "price": {"$ref": "#/components/schemas/Money"},
                "tax": {"$ref": "#/components/schemas/Money"}
            }
        }));

        let example = ExampleSynthesizer::new(&registry).synthesize(&schema);
        assert_eq!(example, json!({"price": {"amount": 1}, "tax": {"amount": 1}}));
    }

    #[test]
    fn test_synthesis_does_not_mutate_inputs() {
        let registry = registry(json!({"A": {"type": "string"}}));
        let before = registry.clone();
        let schema = node(json!({"type": "array", "items": {"$ref": "#/components/schemas/A"}}));
        let schema_before = schema.clone();

        ExampleSynthesizer::new(&registry).synthesize(&schema);

        assert_eq!(registry, before);
        assert_eq!(schema, schema_before);
    }
}
