//! Model builder - turns schema nodes into registered models.
//!
//! The builder walks a schema depth-first. Each node is dereferenced, classified once
//! and handed to the builder for its kind. A model's name is fixed and reserved in the
//! registry before any child is built, which both roots the children's synthesized
//! names at the current model and stops reference cycles at the second visit.

use crate::classifier::SchemaKind;
use crate::document::{AdditionalProperties, Document, Schema};
use crate::error::{Error, Result};
use crate::model::{
    ArrayModel, Branch, CompositionModel, Model, ModelMeta, ModelRef, NamedRef, ObjectModel,
    PrimitiveModel, PrimitiveType, Property,
};
use crate::naming;
use crate::registry::ModelRegistry;
use crate::resolver::ReferenceResolver;
use log::{debug, warn};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Build every component schema of a document into a fresh registry
pub fn build_models(document: &Document) -> Result<ModelRegistry> {
    let builder = ModelBuilder::new(document);
    let mut registry = ModelRegistry::new();
    builder.build_all(&mut registry)?;
    debug!("Built {} models", registry.len());
    Ok(registry)
}

/// Model builder over one bundled document
pub struct ModelBuilder<'a> {
    document: &'a Document,
    resolver: ReferenceResolver<'a>,
    /// Escaped names of all component schemas, never handed out to anonymous models
    component_names: HashSet<String>,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(document: &'a Document) -> Self {
        let component_names = document
            .components
            .schemas
            .keys()
            .map(|key| naming::escape_name(key))
            .collect();
        Self {
            document,
            resolver: ReferenceResolver::new(document),
            component_names,
        }
    }

    /// Build every schema in `components.schemas`, in document order
    pub fn build_all(&self, registry: &mut ModelRegistry) -> Result<()> {
        for (key, schema) in &self.document.components.schemas {
            self.build(registry, schema, "", Some(&naming::escape_name(key)))?;
        }
        Ok(())
    }

    /// Build one component schema and everything it reaches
    pub fn build_component(&self, registry: &mut ModelRegistry, key: &str) -> Result<ModelRef> {
        let schema = self
            .document
            .components
            .schemas
            .get(key)
            .ok_or_else(|| Error::UnknownComponent(key.to_string()))?;
        self.build(registry, schema, "", Some(&naming::escape_name(key)))
    }

    /// Build one schema node.
    ///
    /// `parent_name` roots the synthesized name when `name` is `None`. Named models are
    /// registered and returned as [`ModelRef::Named`]; anonymous non-enum primitives are
    /// returned inline.
    pub fn build(
        &self,
        registry: &mut ModelRegistry,
        node: &Schema,
        parent_name: &str,
        name: Option<&str>,
    ) -> Result<ModelRef> {
        if let Some(name) = name {
            if registry.contains(name) {
                debug!("Model {} already registered, reusing", name);
                return Ok(occurrence(name, node));
            }
        }

        let resolved = self.resolver.resolve(node)?;
        let kind = SchemaKind::classify(&resolved);
        self.build_classified(registry, node, &resolved, kind, parent_name, name)
    }

    fn build_classified(
        &self,
        registry: &mut ModelRegistry,
        node: &Schema,
        resolved: &Schema,
        kind: SchemaKind,
        parent_name: &str,
        name: Option<&str>,
    ) -> Result<ModelRef> {
        let model_name = match name {
            Some(name) => name.to_string(),
            None => synthesize_name(kind, resolved, parent_name),
        };
        let registered =
            name.is_some() || kind != SchemaKind::Primitive || resolved.enum_values.is_some();
        if registered && !registry.reserve(&model_name) {
            debug!("Model {} already registered, reusing", model_name);
            return Ok(occurrence(&model_name, node));
        }
        debug!("Building {:?} model {}", kind, model_name);

        let meta = model_meta(resolved, model_name.clone());
        let mut model = match kind {
            SchemaKind::Primitive => Model::Primitive(build_primitive(resolved, meta)),
            SchemaKind::Array => Model::Array(self.build_array(registry, resolved, meta)?),
            SchemaKind::Object => Model::Object(self.build_object(registry, resolved, meta)?),
            SchemaKind::Composition => {
                Model::Composition(self.build_composition(registry, resolved, meta)?)
            }
            SchemaKind::Unknown => {
                warn!("Schema {} matches no known shape, using an empty object", model_name);
                registry.flag(Error::UnknownSchemaShape {
                    name: model_name.clone(),
                });
                Model::Object(ObjectModel::empty(meta))
            }
        };
        // Only an alias keeps its `$ref`; the referenced model itself is canonical
        if let Some(reference) = node.reference.as_deref() {
            if naming::name_from_ref(reference) != model_name {
                model.meta_mut().reference = Some(reference.to_string());
            }
        }

        if registered {
            registry.register(model);
            Ok(occurrence(&model_name, node))
        } else {
            Ok(ModelRef::Inline(Box::new(model)))
        }
    }

    /// Build a child in the slot `slot`.
    ///
    /// A `$ref` child takes the referenced component's name. An inline non-enum
    /// primitive stays anonymous; any other inline child is named after the slot, made
    /// unique if a different model already holds that name.
    fn build_child(
        &self,
        registry: &mut ModelRegistry,
        child: &Schema,
        slot: &str,
    ) -> Result<ModelRef> {
        match child.reference.as_deref() {
            Some(reference) => {
                let name = naming::name_from_ref(reference);
                self.build(registry, child, slot, Some(&name))
            }
            None => {
                let kind = SchemaKind::classify(child);
                let candidate = match kind {
                    SchemaKind::Primitive if child.enum_values.is_none() => {
                        return self.build_classified(registry, child, child, kind, slot, None);
                    }
                    SchemaKind::Primitive => naming::primitive_name(slot, child),
                    _ => slot.to_string(),
                };
                let name = self.unique_name(registry, &candidate);
                self.build_classified(registry, child, child, kind, slot, Some(&name))
            }
        }
    }

    /// `candidate`, or `candidate` with the first free numeric suffix from 2 when the
    /// name is already registered or belongs to a component schema
    fn unique_name(&self, registry: &mut ModelRegistry, candidate: &str) -> String {
        let taken = |name: &str| registry.contains(name) || self.component_names.contains(name);
        if !taken(candidate) {
            return candidate.to_string();
        }

        let mut suffix = 2;
        let renamed = loop {
            let name = format!("{}{}", candidate, suffix);
            if !taken(&name) {
                break name;
            }
            suffix += 1;
        };
        warn!("Model name {} is already taken, using {}", candidate, renamed);
        registry.flag(Error::NameCollision {
            name: candidate.to_string(),
            renamed: renamed.clone(),
        });
        renamed
    }

    fn build_array(
        &self,
        registry: &mut ModelRegistry,
        schema: &Schema,
        meta: ModelMeta,
    ) -> Result<ArrayModel> {
        let items = match schema.items.as_deref() {
            Some(items) => Some(self.build_child(registry, items, &naming::item_name(&meta.name))?),
            None => None,
        };

        Ok(ArrayModel {
            meta,
            items,
            max_items: schema.max_items,
            min_items: schema.min_items,
            unique_items: schema.unique_items.unwrap_or(false),
        })
    }

    fn build_object(
        &self,
        registry: &mut ModelRegistry,
        schema: &Schema,
        meta: ModelMeta,
    ) -> Result<ObjectModel> {
        let mut properties = Vec::new();
        for (property_name, property) in schema.properties.iter().flatten() {
            let slot = naming::property_name(&meta.name, property_name);
            let model = self.build_child(registry, property, &slot)?;
            let required = schema.is_required(property_name)
                || self.resolver.resolve(property)?.default.is_some();

            properties.push(Property {
                name: property_name.clone(),
                model,
                required,
            });
        }

        let mut additional_properties = None;
        let mut has_any_additional_properties = false;
        match &schema.additional_properties {
            Some(AdditionalProperties::Any(any)) => has_any_additional_properties = *any,
            Some(AdditionalProperties::Schema(value)) if value.is_empty() => {
                has_any_additional_properties = true
            }
            Some(AdditionalProperties::Schema(value)) => {
                let slot = naming::item_name(&meta.name);
                additional_properties = Some(self.build_child(registry, value, &slot)?);
            }
            None => {}
        }

        let composition = if schema.has_composition() {
            Some(self.build_attached_composition(registry, schema, &meta.name)?)
        } else {
            None
        };

        let is_dictionary = composition.is_none()
            && schema.properties.is_none()
            && (has_any_additional_properties || additional_properties.is_some());

        Ok(ObjectModel {
            meta,
            properties,
            additional_properties,
            is_dictionary,
            has_any_additional_properties,
            composition,
            max_properties: schema.max_properties,
            min_properties: schema.min_properties,
        })
    }

    /// Build the composition an object declares next to its properties.
    ///
    /// It is registered on its own as `<Owner><Kind>` so emitters can address it.
    fn build_attached_composition(
        &self,
        registry: &mut ModelRegistry,
        schema: &Schema,
        owner: &str,
    ) -> Result<ModelRef> {
        let kind = schema
            .composition()
            .map(|(kind, _)| kind)
            .ok_or_else(|| Error::InvalidComposition {
                name: owner.to_string(),
            })?;
        let name = self.unique_name(registry, &naming::composition_name(owner, kind));

        registry.reserve(&name);
        let meta = ModelMeta {
            name: name.clone(),
            ..ModelMeta::default()
        };
        let composition = self.build_composition(registry, schema, meta)?;
        registry.register(Model::Composition(composition));

        Ok(ModelRef::Named(NamedRef {
            name,
            nullable: false,
            reference: None,
        }))
    }

    fn build_composition(
        &self,
        registry: &mut ModelRegistry,
        schema: &Schema,
        meta: ModelMeta,
    ) -> Result<CompositionModel> {
        let (composition_type, sources) = match schema.composition() {
            Some((kind, sources)) if !sources.is_empty() => (kind, sources),
            _ => return Err(Error::InvalidComposition { name: meta.name }),
        };

        let mut branch_of_ref: HashMap<&str, usize> = HashMap::new();
        let mut branches = Vec::with_capacity(sources.len());
        for (index, source) in sources.iter().enumerate() {
            if let Some(reference) = source.reference.as_deref() {
                branch_of_ref.insert(reference, index);
            }
            let slot = naming::branch_name(&meta.name, composition_type, index);
            branches.push(Branch {
                model: self.build_child(registry, source, &slot)?,
                discriminator_value: None,
            });
        }

        let mut discriminator = None;
        let mut has_mapping = false;
        if let Some(declared) = &schema.discriminator {
            discriminator = Some(declared.property_name.clone());

            if let Some(mapping) = &declared.mapping {
                has_mapping = true;
                for (value, target) in mapping {
                    // Targets that are not a branch's own $ref address the branch by
                    // position, e.g. `#/components/schemas/Pet/oneOf/1`.
                    let index = branch_of_ref
                        .get(target.as_str())
                        .copied()
                        .or_else(|| trailing_index(target));

                    match index.and_then(|index| branches.get_mut(index)) {
                        Some(branch) => {
                            debug!("{}: {} maps to {}", meta.name, value, branch.model.name());
                            branch.discriminator_value = Some(value.clone());
                        }
                        None => warn!(
                            "{}: discriminator mapping {} -> {} matches no branch",
                            meta.name, value, target
                        ),
                    }
                }
            }
        }

        Ok(CompositionModel {
            meta,
            composition_type,
            branches,
            discriminator,
            has_mapping,
        })
    }
}

fn trailing_index(target: &str) -> Option<usize> {
    target.rsplit('/').next()?.parse().ok()
}

fn synthesize_name(kind: SchemaKind, schema: &Schema, parent_name: &str) -> String {
    match kind {
        SchemaKind::Composition => match schema.composition() {
            Some((composition_type, _)) => naming::composition_name(parent_name, composition_type),
            None => naming::object_name(parent_name),
        },
        SchemaKind::Array => naming::array_name(parent_name),
        SchemaKind::Object | SchemaKind::Unknown => naming::object_name(parent_name),
        SchemaKind::Primitive => naming::primitive_name(parent_name, schema),
    }
}

/// A named occurrence of `name` as written at `node`
fn occurrence(name: &str, node: &Schema) -> ModelRef {
    ModelRef::Named(NamedRef {
        name: name.to_string(),
        nullable: node.is_nullable(),
        reference: node.reference.clone(),
    })
}

fn model_meta(schema: &Schema, name: String) -> ModelMeta {
    ModelMeta {
        name,
        nullable: schema.is_nullable(),
        title: schema.title.clone(),
        description: schema.description.clone(),
        deprecated: schema.deprecated.unwrap_or(false),
        default: schema.default.clone(),
        reference: None,
    }
}

fn build_primitive(schema: &Schema, meta: ModelMeta) -> PrimitiveModel {
    PrimitiveModel {
        meta,
        primitive_type: primitive_type(schema),
        format: schema.format.clone(),
        enum_values: schema.enum_values.clone(),
        multiple_of: schema.multiple_of,
        maximum: schema.maximum,
        exclusive_maximum: schema.exclusive_maximum.unwrap_or(false),
        minimum: schema.minimum,
        exclusive_minimum: schema.exclusive_minimum.unwrap_or(false),
        max_length: schema.max_length,
        min_length: schema.min_length,
        pattern: schema.pattern.clone(),
    }
}

/// Map `type` + `format` to a primitive type; an untyped enum goes by its first value
fn primitive_type(schema: &Schema) -> PrimitiveType {
    match schema.schema_type.as_deref() {
        Some("integer") | Some("number") => PrimitiveType::Number,
        Some("boolean") => PrimitiveType::Boolean,
        Some("string") => match schema.format.as_deref() {
            Some("date") | Some("date-time") => PrimitiveType::Date,
            Some("binary") => PrimitiveType::Binary,
            _ => PrimitiveType::String,
        },
        _ => match schema.enum_values.as_ref().and_then(|values| values.first()) {
            Some(Value::Number(_)) => PrimitiveType::Number,
            Some(Value::Bool(_)) => PrimitiveType::Boolean,
            _ => PrimitiveType::String,
        },
    }
}
