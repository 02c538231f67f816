//! Model registry.
//!
//! Owns every named model produced by one build. A name is reserved before the model
//! behind it is built, so a schema that reaches itself again through references finds
//! its own name already taken and stops there.

use crate::error::Error;
use crate::model::Model;
use indexmap::IndexMap;
use log::debug;
use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, PartialEq)]
enum Slot {
    /// Name taken, model still being built
    Pending,
    Built(Model),
}

/// Canonical name to model mapping for one build
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelRegistry {
    models: IndexMap<String, Slot>,
    flagged: Vec<Error>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` is taken, by a finished model or one still being built
    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// The finished model registered under `name`
    pub fn get(&self, name: &str) -> Option<&Model> {
        match self.models.get(name) {
            Some(Slot::Built(model)) => Some(model),
            _ => None,
        }
    }

    /// Take `name` for a model about to be built.
    ///
    /// Returns `false` if the name is already taken.
    pub(crate) fn reserve(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        debug!("Reserving model name: {}", name);
        self.models.insert(name.to_string(), Slot::Pending);
        true
    }

    /// Store a finished model under its own name.
    ///
    /// A name holds at most one finished model; registering a second one is ignored and
    /// returns `false`.
    pub(crate) fn register(&mut self, model: Model) -> bool {
        let name = model.name().to_string();
        match self.models.get_mut(&name) {
            Some(Slot::Built(_)) => {
                debug!("Model {} already registered, keeping the existing one", name);
                false
            }
            Some(slot) => {
                *slot = Slot::Built(model);
                true
            }
            None => {
                self.models.insert(name, Slot::Built(model));
                true
            }
        }
    }

    /// Record a schema that was recovered from instead of failing the build
    pub(crate) fn flag(&mut self, error: Error) {
        self.flagged.push(error);
    }

    /// Problems recovered from during the build
    pub fn flagged(&self) -> &[Error] {
        &self.flagged
    }

    /// Number of finished models
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of finished models, parents before the children they reached
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(name, _)| name)
    }

    /// Finished models, parents before the children they reached
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Model)> {
        self.models.iter().filter_map(|(name, slot)| match slot {
            Slot::Built(model) => Some((name.as_str(), model)),
            Slot::Pending => None,
        })
    }

    /// Consume the registry, keeping the finished models
    pub fn into_models(self) -> IndexMap<String, Model> {
        self.models
            .into_iter()
            .filter_map(|(name, slot)| match slot {
                Slot::Built(model) => Some((name, model)),
                Slot::Pending => None,
            })
            .collect()
    }
}

impl Serialize for ModelRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, model) in self.iter() {
            map.serialize_entry(name, model)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelMeta, ObjectModel};

    fn object(name: &str) -> Model {
        Model::Object(ObjectModel::empty(ModelMeta {
            name: name.to_string(),
            ..ModelMeta::default()
        }))
    }

    #[test]
    fn test_reserve_then_register() {
        let mut registry = ModelRegistry::new();
        assert!(registry.reserve("Pet"));
        assert!(registry.contains("Pet"));
        assert!(registry.get("Pet").is_none());
        assert!(registry.is_empty());

        assert!(registry.register(object("Pet")));
        assert!(registry.get("Pet").is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_name_is_taken_once() {
        let mut registry = ModelRegistry::new();
        assert!(registry.reserve("Pet"));
        assert!(!registry.reserve("Pet"));

        registry.register(object("Pet"));
        let mut other = object("Pet");
        other.meta_mut().description = Some("second".to_string());
        assert!(!registry.register(other));
        assert!(registry.get("Pet").unwrap().meta().description.is_none());
    }

    #[test]
    fn test_iteration_follows_reservation_order() {
        let mut registry = ModelRegistry::new();
        registry.reserve("Parent");
        registry.register(object("Child"));
        registry.register(object("Parent"));
        registry.reserve("Unfinished");

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["Parent", "Child"]);
        assert_eq!(registry.clone().into_models().len(), 2);
    }

    #[test]
    fn test_serializes_as_name_map() {
        let mut registry = ModelRegistry::new();
        registry.register(object("Pet"));

        let value = serde_json::to_value(&registry).unwrap();
        assert_eq!(value["Pet"]["modelType"], "object");
        assert_eq!(value["Pet"]["name"], "Pet");
    }
}
