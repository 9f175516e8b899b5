use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Declared kind of a tracker field. Tags are matched case-insensitively and
/// both the builder names (`FOR_EACH_OBJECT`) and the descriptive names
/// (`MAP_OF_OBJECTS`) are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FieldType {
    #[default]
    String,
    Array,
    Object,
    /// Keyed map whose values are objects.
    ForEachObject,
    /// Keyed map whose values are arrays.
    ForEachArray,
    /// Plain array of objects.
    ArrayObject,
    /// Tag this crate does not know; rendered as a scalar leaf.
    Other(String),
}

impl FieldType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "" | "STRING" => Self::String,
            "ARRAY" => Self::Array,
            "OBJECT" => Self::Object,
            "FOR_EACH_OBJECT" | "MAP_OF_OBJECTS" => Self::ForEachObject,
            "FOR_EACH_ARRAY" | "MAP_OF_ARRAYS" => Self::ForEachArray,
            "ARRAY_OBJECT" => Self::ArrayObject,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "STRING",
            Self::Array => "ARRAY",
            Self::Object => "OBJECT",
            Self::ForEachObject => "FOR_EACH_OBJECT",
            Self::ForEachArray => "FOR_EACH_ARRAY",
            Self::ArrayObject => "ARRAY_OBJECT",
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Renders as a single leaf rather than a group.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::String | Self::Other(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Self::ForEachObject | Self::ForEachArray)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// One field of the user-authored tracker definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaNode {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub presence: Option<String>,
    pub prompt: Option<String>,
    pub default_value: Option<String>,
    pub example_values: Vec<serde_json::Value>,
    pub nested_fields: Schema,
}

impl SchemaNode {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            ..Default::default()
        }
    }

    pub fn with_nested(mut self, id: impl Into<String>, node: SchemaNode) -> Self {
        self.nested_fields.insert(id, node);
        self
    }
}

/// Ordered `field id -> node` map; iteration follows declaration order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: IndexMap<String, SchemaNode>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn insert(&mut self, id: impl Into<String>, node: SchemaNode) {
        self.fields.insert(id.into(), node);
    }

    pub fn with_field(mut self, id: impl Into<String>, node: SchemaNode) -> Self {
        self.insert(id, node);
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = &SchemaNode> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when the schema describes exactly one scalar field, which makes a
    /// map-of-arrays entry a plain string list.
    pub fn is_single_scalar(&self) -> bool {
        let mut fields = self.fields();
        matches!(
            (fields.next(), fields.next()),
            (Some(only), None) if only.field_type.is_scalar()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldType, Schema, SchemaNode};
    use pretty_assertions::assert_eq;

    #[test]
    fn field_type_parses_aliases_case_insensitively() {
        assert_eq!(FieldType::parse("for_each_object"), FieldType::ForEachObject);
        assert_eq!(FieldType::parse("MAP_OF_ARRAYS"), FieldType::ForEachArray);
        assert_eq!(FieldType::parse("Array"), FieldType::Array);
        assert_eq!(FieldType::parse(""), FieldType::String);
        assert_eq!(
            FieldType::parse("number"),
            FieldType::Other("NUMBER".to_string())
        );
    }

    #[test]
    fn schema_json_keeps_declaration_order_and_defaults() {
        let schema = Schema::from_json(
            r#"{
                "field-1": {"name": "Time", "type": "STRING"},
                "field-0": {"name": "Enemies", "type": "FOR_EACH_OBJECT", "nestedFields": {
                    "field-2": {"name": "hp", "type": "STRING", "exampleValues": ["5"]}
                }}
            }"#,
        )
        .expect("schema parses");

        let names: Vec<&str> = schema.fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Time", "Enemies"]);

        let enemies = schema.fields().nth(1).expect("enemies");
        assert_eq!(enemies.field_type, FieldType::ForEachObject);
        assert_eq!(enemies.nested_fields.len(), 1);
        assert!(enemies.nested_fields.is_single_scalar());
    }

    #[test]
    fn single_scalar_requires_exactly_one_string_field() {
        let one = Schema::new().with_field("a", SchemaNode::new("item", FieldType::String));
        let list = Schema::new().with_field("a", SchemaNode::new("items", FieldType::Array));
        let two = one
            .clone()
            .with_field("b", SchemaNode::new("qty", FieldType::String));
        assert!(one.is_single_scalar());
        assert!(!list.is_single_scalar());
        assert!(!two.is_single_scalar());
        assert!(!Schema::new().is_single_scalar());
    }
}
