//! Resolution error taxonomy.

use core::fmt;

/// Human-readable form of the lookup key a failed resolution used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingKey {
    /// Lookup by the field's declared type; payload is the type name.
    Type(&'static str),
    /// Lookup by provider name.
    Name(String),
}

impl fmt::Display for MissingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(declared) => write!(f, "type `{declared}`"),
            Self::Name(name) => write!(f, "name \"{name}\""),
        }
    }
}

/// Errors returned by resolution.
///
/// All variants are returned to the immediate caller as values; nothing is
/// handled internally. Fields assigned before the failing field keep their
/// values (resolution does not roll back).
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// A required binding has no matching provider in the merged view.
    #[error("missing required dependency ({key}) for field `{field}`")]
    MissingDependency {
        /// Destination field the binding belongs to.
        field: &'static str,
        /// Key the lookup used.
        key: MissingKey,
    },

    /// A named provider exists but its value is not of the field's declared
    /// type.
    #[error("provider of type `{stored}` does not fit field `{field}` of type `{declared}`")]
    TypeMismatch {
        /// Destination field the binding belongs to.
        field: &'static str,
        /// Type name of the registered value.
        stored: &'static str,
        /// Type name the field declares.
        declared: &'static str,
    },
}
