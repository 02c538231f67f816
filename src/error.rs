/// Result type alias for model building
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for model building
///
/// `UnresolvedReference` and `InvalidComposition` abort a build. `UnknownSchemaShape`
/// and `NameCollision` are never returned: the builder records them in the registry
/// and carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A `$ref` that does not point at a node inside the document
    #[error("unresolved reference: {reference}")]
    UnresolvedReference { reference: String },

    /// A composition node without a non-empty `oneOf`, `anyOf` or `allOf`
    #[error("invalid composition in {name}: expected a non-empty oneOf, anyOf or allOf")]
    InvalidComposition { name: String },

    /// A schema node that matches no known shape
    #[error("unknown schema shape for {name}, treated as an empty object")]
    UnknownSchemaShape { name: String },

    /// A synthesized name that was already taken by a different schema
    #[error("model name {name} is already taken, using {renamed}")]
    NameCollision { name: String, renamed: String },

    /// A component name that is not present in `components.schemas`
    #[error("unknown component schema: {0}")]
    UnknownComponent(String),
}

impl Error {
    pub(crate) fn unresolved(reference: &str) -> Self {
        Error::UnresolvedReference {
            reference: reference.to_string(),
        }
    }

    /// Whether this error aborts a build
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Error::UnknownSchemaShape { .. } | Error::NameCollision { .. }
        )
    }
}
