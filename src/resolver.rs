//! Local `$ref` resolution.
//!
//! Only references of the form `#/components/<kind>/<name>` are understood. The
//! document must already be bundled; nothing is fetched.

use crate::document::{Document, Schema};
use crate::error::{Error, Result};
use log::{debug, warn};
use std::borrow::Cow;

/// Resolves local references against one document
pub struct ReferenceResolver<'a> {
    document: &'a Document,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    /// Return the node a schema stands for: its `$ref` target, or the schema itself.
    ///
    /// Exactly one hop is taken; a target that is itself a `$ref` is returned as is.
    pub fn resolve<'s>(&'s self, schema: &'s Schema) -> Result<Cow<'s, Schema>> {
        match schema.reference.as_deref() {
            Some(reference) => {
                let target = self.resolve_ref(reference)?;
                if let Some(next) = target.reference.as_deref() {
                    warn!("{} points at another reference ({}), which is not followed", reference, next);
                }
                Ok(target)
            }
            None => Ok(Cow::Borrowed(schema)),
        }
    }

    /// Look up the node a `#/components/<kind>/<name>` pointer targets
    pub fn resolve_ref(&self, reference: &str) -> Result<Cow<'a, Schema>> {
        debug!("Resolving reference: {}", reference);

        let pointer = reference
            .strip_prefix("#/")
            .ok_or_else(|| Error::unresolved(reference))?;
        let segments: Vec<String> = pointer.split('/').map(decode_pointer_segment).collect();

        let (kind, name) = match segments.as_slice() {
            [root, kind, name] if root == "components" => (kind.as_str(), name.as_str()),
            _ => return Err(Error::unresolved(reference)),
        };

        let components = &self.document.components;
        if kind == "schemas" {
            return components
                .schemas
                .get(name)
                .map(Cow::Borrowed)
                .ok_or_else(|| Error::unresolved(reference));
        }

        let node = components
            .other
            .get(kind)
            .and_then(|section| section.get(name))
            .ok_or_else(|| Error::unresolved(reference))?;
        match Schema::from_value(node.clone()) {
            Ok(schema) => Ok(Cow::Owned(schema)),
            Err(e) => {
                warn!("{} does not point at a schema: {}", reference, e);
                Err(Error::unresolved(reference))
            }
        }
    }
}

/// Decode one JSON Pointer segment (`~1` is `/`, `~0` is `~`)
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: serde_json::Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_resolve_schema_reference() {
        let doc = document(json!({
            "components": { "schemas": { "Pet": { "type": "object" } } }
        }));
        let resolver = ReferenceResolver::new(&doc);

        let node = Schema::from_value(json!({ "$ref": "#/components/schemas/Pet" })).unwrap();
        let resolved = resolver.resolve(&node).unwrap();
        assert_eq!(resolved.schema_type.as_deref(), Some("object"));
        assert!(matches!(resolved, Cow::Borrowed(_)));
    }

    #[test]
    fn test_non_reference_resolves_to_itself() {
        let doc = Document::default();
        let resolver = ReferenceResolver::new(&doc);

        let node = Schema::from_value(json!({ "type": "string" })).unwrap();
        let resolved = resolver.resolve(&node).unwrap();
        assert_eq!(*resolved, node);
    }

    #[test]
    fn test_missing_target_is_unresolved() {
        let doc = document(json!({ "components": { "schemas": {} } }));
        let resolver = ReferenceResolver::new(&doc);

        let err = resolver.resolve_ref("#/components/schemas/Missing").unwrap_err();
        assert_eq!(
            err,
            Error::UnresolvedReference {
                reference: "#/components/schemas/Missing".to_string()
            }
        );
        assert!(resolver.resolve_ref("#/components/widgets/Missing").is_err());
    }

    #[test]
    fn test_malformed_pointers_are_unresolved() {
        let doc = document(json!({
            "components": { "schemas": { "Pet": { "type": "object" } } }
        }));
        let resolver = ReferenceResolver::new(&doc);

        assert!(resolver.resolve_ref("other.yaml#/components/schemas/Pet").is_err());
        assert!(resolver.resolve_ref("#/components/schemas").is_err());
        assert!(resolver.resolve_ref("#/components/schemas/Pet/properties").is_err());
        assert!(resolver.resolve_ref("#/definitions/schemas/Pet").is_err());
    }

    #[test]
    fn test_escaped_segments() {
        let doc = document(json!({
            "components": { "schemas": { "a/b": { "type": "string" } } }
        }));
        let resolver = ReferenceResolver::new(&doc);

        let resolved = resolver.resolve_ref("#/components/schemas/a~1b").unwrap();
        assert_eq!(resolved.schema_type.as_deref(), Some("string"));
    }

    #[test]
    fn test_other_component_kind() {
        let doc = document(json!({
            "components": {
                "schemas": {},
                "headers": { "RateLimit": { "type": "integer" } }
            }
        }));
        let resolver = ReferenceResolver::new(&doc);

        let resolved = resolver.resolve_ref("#/components/headers/RateLimit").unwrap();
        assert_eq!(resolved.schema_type.as_deref(), Some("integer"));
        assert!(matches!(resolved, Cow::Owned(_)));
    }

    #[test]
    fn test_single_hop_only() {
        let doc = document(json!({
            "components": { "schemas": {
                "Alias": { "$ref": "#/components/schemas/Pet" },
                "Pet": { "type": "object" }
            } }
        }));
        let resolver = ReferenceResolver::new(&doc);

        let node = Schema::from_value(json!({ "$ref": "#/components/schemas/Alias" })).unwrap();
        let resolved = resolver.resolve(&node).unwrap();
        assert_eq!(resolved.reference.as_deref(), Some("#/components/schemas/Pet"));
        assert!(resolved.schema_type.is_none());
    }
}
