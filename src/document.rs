//! Input document types.
//!
//! These mirror the subset of an OpenAPI 3.0 document the model builder reads. The
//! document is expected to be bundled already: every `$ref` points inside it.
//! Unknown keys are ignored on deserialization.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A bundled OpenAPI document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Components section
    #[serde(default)]
    pub components: Components,
}

/// OpenAPI Components object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// Schema definitions, in document order
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,
    /// Every other component section (`parameters`, `responses`, ...) kept as raw JSON
    #[serde(flatten)]
    pub other: IndexMap<String, Value>,
}

/// OpenAPI Schema object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Reference to another schema
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// The type of the schema (string, integer, object, array, etc.)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Format for primitive types (e.g., "int32", "date-time", "binary")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Default value; an explicit `null` deserializes to `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Enum values, in declaration order
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    /// Properties for object types, in declaration order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,
    /// Required property names for object types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<u64>,

    /// Items schema for array types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Discriminator>,
}

/// `additionalProperties` is either a boolean or a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Any(bool),
    Schema(Box<Schema>),
}

/// OpenAPI Discriminator object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discriminator {
    /// Name of the property holding the discriminating value
    pub property_name: String,
    /// Discriminating value to `$ref`, in declaration order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping: Option<IndexMap<String, String>>,
}

/// The three ways a schema can combine sub-schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompositionType {
    /// `oneOf`: exclusive union
    OneOf,
    /// `anyOf`: overlapping union
    AnyOf,
    /// `allOf`: intersection
    AllOf,
}

impl CompositionType {
    /// Lookup order when a node declares more than one keyword
    pub const ALL: [CompositionType; 3] = [
        CompositionType::OneOf,
        CompositionType::AnyOf,
        CompositionType::AllOf,
    ];

    /// The OpenAPI keyword, e.g. `oneOf`
    pub fn keyword(self) -> &'static str {
        match self {
            CompositionType::OneOf => "oneOf",
            CompositionType::AnyOf => "anyOf",
            CompositionType::AllOf => "allOf",
        }
    }

    pub fn is_union(self) -> bool {
        !matches!(self, CompositionType::AllOf)
    }
}

impl Schema {
    /// Deserialize a schema from any JSON value
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    pub fn is_reference(&self) -> bool {
        self.reference.is_some()
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable.unwrap_or(false)
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required
            .as_ref()
            .is_some_and(|required| required.iter().any(|name| name == property))
    }

    pub fn has_composition(&self) -> bool {
        self.one_of.is_some() || self.any_of.is_some() || self.all_of.is_some()
    }

    /// The first declared composition keyword and its branches
    pub fn composition(&self) -> Option<(CompositionType, &[Schema])> {
        CompositionType::ALL.into_iter().find_map(|kind| {
            let branches = match kind {
                CompositionType::OneOf => self.one_of.as_deref(),
                CompositionType::AnyOf => self.any_of.as_deref(),
                CompositionType::AllOf => self.all_of.as_deref(),
            };
            branches.map(|branches| (kind, branches))
        })
    }

    /// Whether this node declares nothing at all (`{}`), i.e. accepts any value
    pub fn is_empty(&self) -> bool {
        *self == Schema::default()
    }
}
