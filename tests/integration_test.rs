use openapi_model_builder::{
    build_models, CompositionType, Document, Error, Model, ModelBuilder, ModelRegistry,
    PrimitiveType,
};
use pretty_assertions::assert_eq;

/// Helper function to load a YAML fixture into a document
fn load_fixture(yaml: &str) -> Document {
    serde_yaml::from_str(yaml).expect("Failed to parse fixture")
}

fn shapes() -> Document {
    load_fixture(include_str!("fixtures/shapes.yaml"))
}

#[test]
fn test_shapes_registry_names() {
    let registry = build_models(&shapes()).expect("Failed to build models");

    let names: Vec<_> = registry.names().collect();
    assert_eq!(
        names,
        vec![
            "Problem",
            "ProblemParameters",
            "ShapeType",
            "Shape",
            "ShapePosition",
            "Square",
            "SquarePart2",
            "Circle",
            "CirclePart2",
            "SubResource",
            "SubResourceAttachments",
            "SubResourceOneOf",
            "Tree",
            "TreeChildren",
        ]
    );
    assert!(registry.flagged().is_empty());
}

#[test]
fn test_shapes_object_properties() {
    let registry = build_models(&shapes()).unwrap();
    let shape = registry.get("Shape").and_then(Model::as_object).unwrap();

    let properties: Vec<_> = shape
        .properties
        .iter()
        .map(|p| (p.name.as_str(), p.model.name(), p.required))
        .collect();
    assert_eq!(
        properties,
        vec![
            ("shape-type", "ShapeType", true),
            ("text", "ShapeTextString", false),
            ("rotation", "ShapeRotationNumber", true),
            ("position", "ShapePosition", true),
        ]
    );

    let text = &shape.property("text").unwrap().model;
    assert!(text.is_inline());
    assert!(text.is_nullable(&registry));

    let parameters = registry
        .get("ProblemParameters")
        .and_then(Model::as_object)
        .unwrap();
    assert!(parameters.is_dictionary);
    assert!(parameters.has_any_additional_properties);
}

#[test]
fn test_shapes_intersections() {
    let registry = build_models(&shapes()).unwrap();

    for (name, part) in [("Square", "SquarePart2"), ("Circle", "CirclePart2")] {
        let intersection = registry.get(name).and_then(Model::as_composition).unwrap();
        assert_eq!(intersection.composition_type, CompositionType::AllOf);
        let branches: Vec<_> = intersection.branches.iter().map(|b| b.model.name()).collect();
        assert_eq!(branches, vec!["Shape", part]);

        let shape = intersection.branches[0].model.as_named().unwrap();
        assert_eq!(shape.reference.as_deref(), Some("#/components/schemas/Shape"));
    }
}

#[test]
fn test_shapes_discriminated_union_on_object() {
    let registry = build_models(&shapes()).unwrap();

    let resource = registry.get("SubResource").and_then(Model::as_object).unwrap();
    assert_eq!(resource.composition.as_ref().unwrap().name(), "SubResourceOneOf");
    assert!(!resource.is_dictionary);

    let created = &resource.property("created").unwrap().model;
    assert_eq!(
        created.as_inline().and_then(Model::as_primitive).unwrap().primitive_type,
        PrimitiveType::Date
    );

    let attachments = registry
        .get("SubResourceAttachments")
        .and_then(Model::as_array)
        .unwrap();
    let item = attachments.items.as_ref().unwrap();
    assert_eq!(
        item.as_inline().and_then(Model::as_primitive).unwrap().primitive_type,
        PrimitiveType::Binary
    );

    let union = registry
        .get("SubResourceOneOf")
        .and_then(Model::as_composition)
        .unwrap();
    assert_eq!(union.composition_type, CompositionType::OneOf);
    assert_eq!(union.discriminator.as_deref(), Some("shape-type"));
    assert!(union.has_mapping);
    let mapped: Vec<_> = union
        .mapped_branches()
        .map(|b| (b.discriminator_value.as_deref().unwrap(), b.model.name()))
        .collect();
    assert_eq!(mapped, vec![("square", "Square"), ("circle", "Circle")]);
    assert_eq!(union.unmapped_branches().count(), 0);
}

#[test]
fn test_shapes_recursive_tree() {
    let registry = build_models(&shapes()).unwrap();

    let tree = registry.get("Tree").and_then(Model::as_object).unwrap();
    let parent = &tree.property("parent").unwrap().model;
    assert_eq!(parent.name(), "Tree");
    assert!(parent.as_named().unwrap().nullable);
    assert!(!tree.meta.nullable);

    let children = registry.get("TreeChildren").and_then(Model::as_array).unwrap();
    let item = children.items.as_ref().unwrap();
    assert_eq!(item.name(), "Tree");
    assert!(std::ptr::eq(item.resolve(&registry).unwrap(), registry.get("Tree").unwrap()));
}

#[test]
fn test_build_is_idempotent() {
    let document = shapes();
    let first = build_models(&document).unwrap();
    let second = build_models(&document).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_component_subset() {
    let document = shapes();
    let builder = ModelBuilder::new(&document);
    let mut registry = ModelRegistry::new();

    builder.build_component(&mut registry, "Square").unwrap();
    let names: Vec<_> = registry.names().collect();
    assert_eq!(
        names,
        vec!["Square", "Shape", "ShapeType", "ShapePosition", "SquarePart2"]
    );
}

#[test]
fn test_dangling_reference_aborts_build() {
    let document = load_fixture(
        r#"
components:
  schemas:
    Good:
      type: object
    Bad:
      type: object
      properties:
        owner:
          $ref: '#/components/schemas/Owner'
"#,
    );

    let err = build_models(&document).unwrap_err();
    assert_eq!(
        err,
        Error::UnresolvedReference {
            reference: "#/components/schemas/Owner".to_string()
        }
    );
    assert!(err.is_fatal());
}

#[test]
fn test_malformed_leaf_does_not_abort_build() {
    let document = load_fixture(
        r#"
components:
  schemas:
    Holder:
      type: object
      properties:
        weird:
          type: tuple
        fine:
          type: string
"#,
    );

    let registry = build_models(&document).unwrap();
    let holder = registry.get("Holder").and_then(Model::as_object).unwrap();
    assert_eq!(holder.properties.len(), 2);

    let weird = registry.get("HolderWeird").and_then(Model::as_object).unwrap();
    assert!(weird.properties.is_empty());
    assert_eq!(registry.flagged().len(), 1);
    assert!(!registry.flagged()[0].is_fatal());
}

#[test]
fn test_json_document() {
    let document: Document = serde_json::from_str(
        r#"{
            "components": {
                "schemas": {
                    "my-schema": { "oneOf": [{ "type": "string" }, { "type": "number" }] }
                }
            }
        }"#,
    )
    .unwrap();

    let registry = build_models(&document).unwrap();
    let union = registry.get("MySchema").and_then(Model::as_composition).unwrap();
    let types: Vec<_> = union
        .branches
        .iter()
        .map(|b| {
            b.model
                .as_inline()
                .and_then(Model::as_primitive)
                .unwrap()
                .primitive_type
        })
        .collect();
    assert_eq!(types, vec![PrimitiveType::String, PrimitiveType::Number]);
}
