//! Field bindings and the [`Resolvable`] destination contract.
//!
//! A destination record declares, per field, how that field is wired:
//!
//! | Annotation        | Lookup                    | Missing provider |
//! |-------------------|---------------------------|------------------|
//! | none              | field ignored entirely    | -                |
//! | `#[resolve]`      | by the field's type       | skipped          |
//! | `#[resolve("*")]` | by the field's type       | error            |
//! | `#[resolve("n")]` | by name `n`               | skipped          |
//! | `#[resolve("n*")]`| by name `n`               | error            |
//!
//! The trailing `*` is the *required marker*: it upgrades a lookup from
//! optional to mandatory and is never part of the lookup key itself.
//!
//! `#[derive(Resolvable)]` turns these attributes into a [`Resolvable`]
//! impl. The trait can also be implemented by hand for record types the
//! derive cannot express; it is just an ordered list of [`FieldSlot`]s.

use core::any::{Any, TypeId};
use std::sync::Arc;

/// Trailing character that upgrades a binding from optional to required.
pub(crate) const REQUIRED_MARKER: char = '*';

/// Strips one trailing required marker, if present.
pub(crate) fn strip_required_marker(name: &str) -> &str {
    name.strip_suffix(REQUIRED_MARKER).unwrap_or(name)
}

/// Parsed form of a field's binding annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// Provider name; empty means "resolve by the field's declared type".
    pub name: &'static str,
    /// Whether a missing provider is an error rather than a skip.
    pub required: bool,
}

impl Binding {
    /// Parses a raw annotation string (`""`, `"*"`, `"name"`, `"name*"`).
    #[must_use]
    pub fn parse(raw: &'static str) -> Self {
        match raw.strip_suffix(REQUIRED_MARKER) {
            Some(name) => Self {
                name,
                required: true,
            },
            None => Self {
                name: raw,
                required: false,
            },
        }
    }
}

/// Assignment target for one destination field.
///
/// Implemented for every `Clone + Send + Sync + 'static` type, so any such
/// struct field can receive a resolved value. The engine only writes through
/// this trait; a field whose lookup misses (optionally) is never touched.
pub trait Slot {
    /// `TypeId` of the field's declared type.
    fn declared_type(&self) -> TypeId;

    /// Type name of the field's declared type, for diagnostics.
    fn declared_type_name(&self) -> &'static str;

    /// Clones `value` into the field.
    ///
    /// Returns `false` (leaving the field untouched) when `value` is not of
    /// the field's declared type.
    fn accept(&mut self, value: &Arc<dyn Any + Send + Sync>) -> bool;
}

impl<T: Clone + Send + Sync + 'static> Slot for T {
    fn declared_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn declared_type_name(&self) -> &'static str {
        core::any::type_name::<T>()
    }

    fn accept(&mut self, value: &Arc<dyn Any + Send + Sync>) -> bool {
        match value.downcast_ref::<T>() {
            Some(value) => {
                *self = value.clone();
                true
            }
            None => false,
        }
    }
}

/// One annotated field of a destination record.
pub struct FieldSlot<'a> {
    pub(crate) field: &'static str,
    pub(crate) binding: Binding,
    pub(crate) slot: &'a mut dyn Slot,
}

impl<'a> FieldSlot<'a> {
    /// Builds a slot for `field` from its raw annotation string.
    ///
    /// Called by generated [`Resolvable`] impls; `raw` follows the
    /// annotation grammar (`""`, `"*"`, `"name"`, `"name*"`).
    pub fn new(field: &'static str, raw: &'static str, slot: &'a mut dyn Slot) -> Self {
        Self {
            field,
            binding: Binding::parse(raw),
            slot,
        }
    }
}

impl core::fmt::Debug for FieldSlot<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FieldSlot")
            .field("field", &self.field)
            .field("binding", &self.binding)
            .field("declared", &self.slot.declared_type_name())
            .finish()
    }
}

/// A destination record whose annotated fields can be populated.
///
/// Ordinarily derived via `#[derive(Resolvable)]`; unannotated fields are
/// omitted from [`bindings`](Self::bindings) and therefore invisible to the
/// resolution engine.
pub trait Resolvable {
    /// Annotated fields in declaration order.
    fn bindings(&mut self) -> Vec<FieldSlot<'_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_is_by_type_optional() {
        let binding = Binding::parse("");
        assert_eq!(binding.name, "");
        assert!(!binding.required);
    }

    #[test]
    fn parse_marker_only_is_by_type_required() {
        let binding = Binding::parse("*");
        assert_eq!(binding.name, "");
        assert!(binding.required);
    }

    #[test]
    fn parse_name_is_optional() {
        let binding = Binding::parse("cache");
        assert_eq!(binding.name, "cache");
        assert!(!binding.required);
    }

    #[test]
    fn parse_name_with_marker_is_required() {
        let binding = Binding::parse("cache*");
        assert_eq!(binding.name, "cache");
        assert!(binding.required);
    }

    #[test]
    fn marker_is_only_stripped_from_the_end() {
        let binding = Binding::parse("ca*che");
        assert_eq!(binding.name, "ca*che");
        assert!(!binding.required);
    }

    #[test]
    fn slot_accept_assigns_matching_type() {
        let mut field = String::new();
        let value: Arc<dyn Any + Send + Sync> = Arc::new(String::from("hello"));

        let slot: &mut dyn Slot = &mut field;
        assert!(slot.accept(&value));
        assert_eq!(field, "hello");
    }

    #[test]
    fn slot_accept_rejects_other_type() {
        let mut field = String::from("before");
        let value: Arc<dyn Any + Send + Sync> = Arc::new(42_u32);

        let slot: &mut dyn Slot = &mut field;
        assert!(!slot.accept(&value));
        assert_eq!(field, "before");
    }
}
