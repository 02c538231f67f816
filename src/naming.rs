//! Identifier escaping and name synthesis.
//!
//! Declared names (component keys, property names, `$ref` segments) are escaped into
//! identifiers. Anonymous nested schemas get a name built from the name of the model
//! that owns them plus a suffix describing their slot, so the same document always
//! yields the same names.

use crate::document::{CompositionType, Schema};
use crate::resolver::decode_pointer_segment;

/// Escape a declared name into an identifier.
///
/// `[A-Za-z0-9_]` pass through; any other character is dropped and capitalizes the
/// next kept one. The first character is capitalized and a leading digit gets an
/// underscore prefix.
///
/// ```
/// use openapi_model_builder::naming::escape_name;
///
/// assert_eq!(escape_name("my-schema"), "MySchema");
/// assert_eq!(escape_name("2fa code"), "_2faCode");
/// ```
pub fn escape_name(raw: &str) -> String {
    let mut name = String::with_capacity(raw.len());
    let mut capitalize_next = true;

    for c in raw.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if capitalize_next {
                name.push(c.to_ascii_uppercase());
                capitalize_next = false;
            } else {
                name.push(c);
            }
        } else {
            capitalize_next = true;
        }
    }

    if name.is_empty() {
        return "_".to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

/// Uppercase the first character, leaving the rest untouched
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The escaped component name a `$ref` points at.
///
/// For `#/components/<kind>/<name>` this is the fourth segment; any other shape falls
/// back to the last segment.
pub fn name_from_ref(reference: &str) -> String {
    let segments: Vec<&str> = reference.split('/').collect();
    let raw = segments
        .get(3)
        .or_else(|| segments.last())
        .copied()
        .unwrap_or(reference);
    escape_name(&decode_pointer_segment(raw))
}

pub fn object_name(parent: &str) -> String {
    format!("{}Object", parent)
}

pub fn array_name(parent: &str) -> String {
    format!("{}Array", parent)
}

/// Slot of an array's items or an object's additional-properties value
pub fn item_name(owner: &str) -> String {
    format!("{}Item", owner)
}

pub fn property_name(owner: &str, property: &str) -> String {
    format!("{}{}", owner, escape_name(property))
}

/// Name of a composition that has no name of its own, e.g. `PetOneOf`
pub fn composition_name(parent: &str, kind: CompositionType) -> String {
    format!("{}{}", parent, capitalize(kind.keyword()))
}

/// Slot of the `index`-th (0-based) branch: `Option<N>` for unions, `Part<N>` for `allOf`
pub fn branch_name(owner: &str, kind: CompositionType, index: usize) -> String {
    let suffix = if kind.is_union() { "Option" } else { "Part" };
    format!("{}{}{}", owner, suffix, index + 1)
}

/// Name of an anonymous primitive.
///
/// Enum-bearing primitives get `Enum`; the rest get their escaped format, or type when
/// there is no format.
pub fn primitive_name(parent: &str, schema: &Schema) -> String {
    if schema.enum_values.is_some() {
        return format!("{}Enum", parent);
    }
    let role = schema
        .format
        .as_deref()
        .or(schema.schema_type.as_deref())
        .unwrap_or("value");
    format!("{}{}", parent, escape_name(role))
}
