//! Static attribute schema of a data source.
//!
//! The schema is derived from the [`JsonSchema`] of the typed configuration
//! tree, so field names, doc comments and required fields never drift from
//! the Rust types. Nested structs become object attributes, `Option`al fields
//! become optional attributes.
use std::collections::BTreeMap;

use schemars::{JsonSchema, generate::SchemaSettings};
use serde::Serialize;
use serde_json::{Map, Value};
use snafu::{ResultExt, Snafu};

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to serialize JSON schema of {type_name}"))]
    SerializeJsonSchema {
        source: serde_json::Error,
        type_name: String,
    },

    #[snafu(display("JSON schema of {type_name} does not describe an object with properties"))]
    RootNotAnObject { type_name: String },
}

/// The value type of an attribute.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Int64,
    Number,
    Bool,

    /// Any value, used where the schema allows more than one type (for
    /// example int-or-string fields) or is not constrained at all.
    Dynamic,

    /// An ordered sequence of elements of one type.
    List(Box<AttributeType>),

    /// An unordered mapping from string keys to elements of one type.
    Map(Box<AttributeType>),

    /// A nested block with a fixed set of attributes.
    Object(BTreeMap<String, Attribute>),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub required: bool,
    pub optional: bool,
    pub computed: bool,
}

impl Attribute {
    /// An attribute set by the data source itself, never by the user.
    pub fn computed(attribute_type: AttributeType, description: impl Into<String>) -> Self {
        Self {
            attribute_type,
            description: Some(description.into()),
            required: false,
            optional: false,
            computed: true,
        }
    }

    /// Returns the attributes of a nested block, if this is one.
    pub fn nested(&self) -> Option<&BTreeMap<String, Self>> {
        match &self.attribute_type {
            AttributeType::Object(attributes) => Some(attributes),
            _ => None,
        }
    }
}

/// The complete schema of one data source.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceSchema {
    pub description: String,
    pub attributes: BTreeMap<String, Attribute>,
}

/// Builds the top-level attributes of `T`, which must be a struct.
pub fn attributes_for<T: JsonSchema>() -> Result<BTreeMap<String, Attribute>> {
    let type_name = T::schema_name().into_owned();
    let generator = SchemaSettings::draft2020_12()
        .with(|settings| settings.inline_subschemas = true)
        .into_generator();

    let root = generator.into_root_schema_for::<T>();
    let root = serde_json::to_value(&root).context(SerializeJsonSchemaSnafu {
        type_name: type_name.clone(),
    })?;

    match attribute_type(&root) {
        AttributeType::Object(attributes) => Ok(attributes),
        _ => RootNotAnObjectSnafu { type_name }.fail(),
    }
}

fn attribute_type(schema: &Value) -> AttributeType {
    // The `true` schema (or anything else that isn't an object) accepts any value
    let Some(object) = schema.as_object() else {
        return AttributeType::Dynamic;
    };

    for keyword in ["anyOf", "oneOf"] {
        if let Some(Value::Array(alternatives)) = object.get(keyword) {
            let types = alternatives
                .iter()
                .filter(|alternative| !is_null_schema(alternative))
                .map(attribute_type)
                .collect::<Vec<_>>();

            return match types.as_slice() {
                [first, rest @ ..] if rest.iter().all(|other| other == first) => first.clone(),
                _ => AttributeType::Dynamic,
            };
        }
    }

    if let Some(Value::Array(all_of)) = object.get("allOf") {
        if let [single] = all_of.as_slice() {
            return attribute_type(single);
        }
    }

    match primary_type(object) {
        Some("string") => AttributeType::String,
        Some("integer") => AttributeType::Int64,
        Some("number") => AttributeType::Number,
        Some("boolean") => AttributeType::Bool,
        Some("array") => AttributeType::List(Box::new(
            object
                .get("items")
                .map_or(AttributeType::Dynamic, attribute_type),
        )),
        Some("object") => match object.get("properties") {
            Some(Value::Object(properties)) => {
                AttributeType::Object(nested_attributes(properties, object))
            }
            _ => AttributeType::Map(Box::new(
                object
                    .get("additionalProperties")
                    .map_or(AttributeType::Dynamic, attribute_type),
            )),
        },
        _ => AttributeType::Dynamic,
    }
}

fn nested_attributes(
    properties: &Map<String, Value>,
    parent: &Map<String, Value>,
) -> BTreeMap<String, Attribute> {
    let required = parent
        .get("required")
        .and_then(Value::as_array)
        .map(|required| required.iter().filter_map(Value::as_str).collect::<Vec<_>>())
        .unwrap_or_default();

    properties
        .iter()
        .map(|(name, schema)| {
            let is_required = required.contains(&name.as_str());
            let attribute = Attribute {
                attribute_type: attribute_type(schema),
                description: schema
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_owned),
                required: is_required,
                optional: !is_required,
                computed: false,
            };

            (name.clone(), attribute)
        })
        .collect()
}

/// Returns the first non-null entry of the `type` keyword.
fn primary_type(object: &Map<String, Value>) -> Option<&str> {
    match object.get("type") {
        Some(Value::String(instance_type)) => Some(instance_type),
        Some(Value::Array(instance_types)) => instance_types
            .iter()
            .filter_map(Value::as_str)
            .find(|instance_type| *instance_type != "null"),
        _ => None,
    }
}

fn is_null_schema(schema: &Value) -> bool {
    schema.get("type").and_then(Value::as_str) == Some("null")
}
