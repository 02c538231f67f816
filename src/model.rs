//! Output model graph.
//!
//! A [`Model`] is one of four closed variants. Parents hold their children through a
//! [`ModelRef`]: small anonymous primitives are owned inline, everything else lives in
//! the [`ModelRegistry`] and is referenced by name.

use crate::document::CompositionType;
use crate::registry::ModelRegistry;
use serde::Serialize;
use serde_json::Value;

/// Fields shared by every model variant
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMeta {
    /// Canonical name, unique within one registry
    pub name: String,
    pub nullable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// The `$ref` this model was built through, if any
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// A built model
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "modelType", rename_all = "camelCase")]
pub enum Model {
    Primitive(PrimitiveModel),
    Array(ArrayModel),
    Object(ObjectModel),
    Composition(CompositionModel),
}

/// Target-neutral primitive type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    String,
    Number,
    Boolean,
    Date,
    Binary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimitiveModel {
    #[serde(flatten)]
    pub meta: ModelMeta,
    pub primitive_type: PrimitiveType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Allowed values, in declaration order
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    pub exclusive_maximum: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    pub exclusive_minimum: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl PrimitiveModel {
    pub fn is_enum(&self) -> bool {
        self.enum_values.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayModel {
    #[serde(flatten)]
    pub meta: ModelMeta,
    /// Item model; `None` when the schema declares no `items`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<ModelRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    pub unique_items: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectModel {
    #[serde(flatten)]
    pub meta: ModelMeta,
    /// Declared properties, in declaration order
    pub properties: Vec<Property>,
    /// Model of the values of undeclared keys
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<ModelRef>,
    /// No declared properties, only `additionalProperties`
    pub is_dictionary: bool,
    /// `additionalProperties: true` (or `{}`)
    pub has_any_additional_properties: bool,
    /// Composition declared on the same node, registered under its own name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composition: Option<ModelRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<u64>,
}

impl ObjectModel {
    /// An object with no properties and no constraints
    pub fn empty(meta: ModelMeta) -> Self {
        Self {
            meta,
            properties: Vec::new(),
            additional_properties: None,
            is_dictionary: false,
            has_any_additional_properties: false,
            composition: None,
            max_properties: None,
            min_properties: None,
        }
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.name == name)
    }
}

/// One declared property of an object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    /// Declared (unescaped) property name
    pub name: String,
    pub model: ModelRef,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionModel {
    #[serde(flatten)]
    pub meta: ModelMeta,
    pub composition_type: CompositionType,
    /// All branches, in declaration order
    pub branches: Vec<Branch>,
    /// Discriminator property name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    /// The discriminator declared a `mapping`
    pub has_mapping: bool,
}

impl CompositionModel {
    /// Branches tagged with a discriminator value, in declaration order
    pub fn mapped_branches(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter().filter(|branch| branch.discriminator_value.is_some())
    }

    /// Branches without a discriminator value, in declaration order
    pub fn unmapped_branches(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter().filter(|branch| branch.discriminator_value.is_none())
    }
}

/// One branch of a composition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub model: ModelRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator_value: Option<String>,
}

/// How a parent holds a child model
///
/// Serialized with the variant in a `kind` field, next to the model or reference fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ModelRef {
    /// Owned, unregistered child
    Inline(Box<Model>),
    /// Child registered under a name
    Named(NamedRef),
}

/// An occurrence of a registered model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedRef {
    pub name: String,
    /// Nullability added by this occurrence; the registered model is not affected
    pub nullable: bool,
    /// The `$ref` of this occurrence, if it was one
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl ModelRef {
    pub fn name(&self) -> &str {
        match self {
            ModelRef::Inline(model) => model.name(),
            ModelRef::Named(named) => &named.name,
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, ModelRef::Inline(_))
    }

    pub fn as_inline(&self) -> Option<&Model> {
        match self {
            ModelRef::Inline(model) => Some(model),
            ModelRef::Named(_) => None,
        }
    }

    pub fn as_named(&self) -> Option<&NamedRef> {
        match self {
            ModelRef::Named(named) => Some(named),
            ModelRef::Inline(_) => None,
        }
    }

    /// The model this occurrence stands for
    pub fn resolve<'r>(&'r self, registry: &'r ModelRegistry) -> Option<&'r Model> {
        match self {
            ModelRef::Inline(model) => Some(model),
            ModelRef::Named(named) => registry.get(&named.name),
        }
    }

    /// Whether a value at this occurrence may be `null`
    pub fn is_nullable(&self, registry: &ModelRegistry) -> bool {
        match self {
            ModelRef::Inline(model) => model.meta().nullable,
            ModelRef::Named(named) => {
                named.nullable || registry.get(&named.name).is_some_and(|m| m.meta().nullable)
            }
        }
    }
}

impl Model {
    pub fn meta(&self) -> &ModelMeta {
        match self {
            Model::Primitive(model) => &model.meta,
            Model::Array(model) => &model.meta,
            Model::Object(model) => &model.meta,
            Model::Composition(model) => &model.meta,
        }
    }

    pub fn meta_mut(&mut self) -> &mut ModelMeta {
        match self {
            Model::Primitive(model) => &mut model.meta,
            Model::Array(model) => &mut model.meta,
            Model::Object(model) => &mut model.meta,
            Model::Composition(model) => &mut model.meta,
        }
    }

    pub fn name(&self) -> &str {
        &self.meta().name
    }

    pub fn as_primitive(&self) -> Option<&PrimitiveModel> {
        match self {
            Model::Primitive(model) => Some(model),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayModel> {
        match self {
            Model::Array(model) => Some(model),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectModel> {
        match self {
            Model::Object(model) => Some(model),
            _ => None,
        }
    }

    pub fn as_composition(&self) -> Option<&CompositionModel> {
        match self {
            Model::Composition(model) => Some(model),
            _ => None,
        }
    }
}
