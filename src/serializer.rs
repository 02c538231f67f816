//! Serialization module for writing a model registry as YAML or JSON.
//!
//! The output is a map from model name to model, in registry order, with each model's
//! variant in its `modelType` field. Emitters written in other languages can consume
//! it directly.

use crate::registry::ModelRegistry;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes a model registry to YAML format.
///
/// # Errors
///
/// Returns an error if serialization fails.
///
/// # Example
///
/// ```
/// use openapi_model_builder::{build_models, Document};
/// use openapi_model_builder::serializer::serialize_yaml;
///
/// let document: Document = serde_yaml::from_str("components:\n  schemas:\n    Pet:\n      type: object\n").unwrap();
/// let registry = build_models(&document).unwrap();
/// let yaml = serialize_yaml(&registry).unwrap();
/// assert!(yaml.contains("modelType: object"));
/// ```
pub fn serialize_yaml(registry: &ModelRegistry) -> Result<String> {
    debug!("Serializing {} models to YAML", registry.len());
    serde_yaml::to_string(registry).context("Failed to serialize model registry to YAML")
}

/// Serializes a model registry to JSON format with pretty printing.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_json(registry: &ModelRegistry) -> Result<String> {
    debug!("Serializing {} models to JSON", registry.len());
    serde_json::to_string_pretty(registry).context("Failed to serialize model registry to JSON")
}

/// Writes string content to a file.
///
/// Creates the file if it doesn't exist, or overwrites it if it does. Missing parent
/// directories are created.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
