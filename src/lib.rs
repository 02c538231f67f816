//! OpenAPI Model Builder - a canonical, named model graph from OpenAPI component schemas.
//!
//! This library turns the `components.schemas` section of a bundled OpenAPI document
//! into a [`ModelRegistry`]: every schema, and every anonymous schema nested inside one,
//! becomes a [`Model`] with a deterministic, unique name. Code emitters render the
//! registry into target-language declarations and validators.
//!
//! # Architecture
//!
//! 1. [`document`] - Serde types for the input document
//! 2. [`resolver`] - Resolves local `#/components/<kind>/<name>` references
//! 3. [`classifier`] - Decides which of the four model kinds a schema node is
//! 4. [`naming`] - Escapes declared names and synthesizes names for anonymous schemas
//! 5. [`registry`] - Owns the built models, deduplicates them and breaks cycles
//! 6. [`builder`] - Recursively builds models and populates the registry
//! 7. [`serializer`] - Serializes a registry to YAML or JSON
//!
//! # Example Usage
//!
//! ```
//! use openapi_model_builder::{build_models, Document, Model};
//!
//! let yaml = r#"
//! components:
//!   schemas:
//!     my-schema:
//!       oneOf:
//!         - type: string
//!         - type: number
//! "#;
//! let document: Document = serde_yaml::from_str(yaml).unwrap();
//! let registry = build_models(&document).unwrap();
//!
//! let model = registry.get("MySchema").unwrap();
//! assert!(matches!(model, Model::Composition(_)));
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod builder;
pub mod classifier;
pub mod cli;
pub mod document;
pub mod error;
pub mod model;
pub mod naming;
pub mod registry;
pub mod resolver;
pub mod serializer;

pub use builder::{build_models, ModelBuilder};
pub use classifier::SchemaKind;
pub use document::{AdditionalProperties, Components, CompositionType, Discriminator, Document, Schema};
pub use error::{Error, Result};
pub use model::{
    ArrayModel, Branch, CompositionModel, Model, ModelMeta, ModelRef, NamedRef, ObjectModel,
    PrimitiveModel, PrimitiveType, Property,
};
pub use registry::ModelRegistry;
