use crate::document::Schema;
use serde::Serialize;

/// Which builder handles a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SchemaKind {
    Composition,
    Array,
    Object,
    Primitive,
    /// Matches nothing; built as an empty object
    Unknown,
}

const SCALAR_TYPES: [&str; 4] = ["string", "number", "integer", "boolean"];

impl SchemaKind {
    /// Classify a (dereferenced) schema node.
    ///
    /// Checks run in priority order: composition, array, object, primitive. A node that
    /// is object-shaped as well as composed is an object; the object builder attaches
    /// the composition.
    pub fn classify(schema: &Schema) -> Self {
        let object_shaped = is_object_shaped(schema);
        if schema.has_composition() && !object_shaped {
            return SchemaKind::Composition;
        }
        match schema.schema_type.as_deref() {
            Some("array") => SchemaKind::Array,
            _ if object_shaped => SchemaKind::Object,
            Some(t) if SCALAR_TYPES.contains(&t) => SchemaKind::Primitive,
            None if schema.enum_values.is_some() => SchemaKind::Primitive,
            _ => SchemaKind::Unknown,
        }
    }
}

fn is_object_shaped(schema: &Schema) -> bool {
    match schema.schema_type.as_deref() {
        Some("object") => true,
        None => schema.properties.is_some() || schema.additional_properties.is_some(),
        Some(_) => false,
    }
}
