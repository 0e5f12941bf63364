//! The field-resolution walk.
//!
//! Stateless: given a merged, read-only view and a destination, walk the
//! destination's bindings in declaration order, look each key up, enforce
//! the optional/required rule, and assign. Stops at the first failure;
//! earlier assignments are kept.

use crate::binding::{FieldSlot, Resolvable};
use crate::error::{MissingKey, ResolveError};
use crate::store::{ProviderKey, ProviderStore};

pub(crate) fn resolve_fields<R: Resolvable>(
    view: &ProviderStore,
    destination: &mut R,
) -> Result<(), ResolveError> {
    for FieldSlot {
        field,
        binding,
        slot,
    } in destination.bindings()
    {
        let key = if binding.name.is_empty() {
            ProviderKey::Type(slot.declared_type())
        } else {
            ProviderKey::Name(binding.name.to_owned())
        };

        let Some(entry) = view.get(&key) else {
            if binding.required {
                let key = if binding.name.is_empty() {
                    MissingKey::Type(slot.declared_type_name())
                } else {
                    MissingKey::Name(binding.name.to_owned())
                };
                tracing::debug!(field, %key, "no provider for required binding");
                return Err(ResolveError::MissingDependency { field, key });
            }
            continue;
        };

        if !slot.accept(&entry.value) {
            return Err(ResolveError::TypeMismatch {
                field,
                stored: entry.type_name,
                declared: slot.declared_type_name(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Hand-written Resolvable impl: the engine does not care whether the
    // bindings come from the derive or from an explicit descriptor list.
    #[derive(Default)]
    struct Target {
        greeting: String,
        count: u32,
    }

    impl Resolvable for Target {
        fn bindings(&mut self) -> Vec<FieldSlot<'_>> {
            vec![
                FieldSlot::new("greeting", "greeting*", &mut self.greeting),
                FieldSlot::new("count", "", &mut self.count),
            ]
        }
    }

    #[test]
    fn resolves_by_name_and_by_type() {
        let mut view = ProviderStore::new();
        view.put_named(String::from("hello"), "greeting");
        view.put(7_u32);

        let mut target = Target::default();
        view.resolve_into(&mut target).unwrap();

        assert_eq!(target.greeting, "hello");
        assert_eq!(target.count, 7);
    }

    #[test]
    fn required_missing_fails_with_key() {
        let view = ProviderStore::new();
        let mut target = Target::default();

        let err = view.resolve_into(&mut target).unwrap_err();
        match err {
            ResolveError::MissingDependency { field, key } => {
                assert_eq!(field, "greeting");
                assert_eq!(key, MissingKey::Name("greeting".into()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn optional_missing_is_skipped() {
        let mut view = ProviderStore::new();
        view.put_named(String::from("hello"), "greeting");

        let mut target = Target {
            greeting: String::new(),
            count: 99,
        };
        view.resolve_into(&mut target).unwrap();

        // No u32 registered: the optional by-type field keeps its value.
        assert_eq!(target.count, 99);
    }

    #[test]
    fn named_provider_of_wrong_type_is_a_mismatch() {
        let mut view = ProviderStore::new();
        view.put_named(3.5_f64, "greeting");

        let mut target = Target::default();
        let err = view.resolve_into(&mut target).unwrap_err();
        match err {
            ResolveError::TypeMismatch {
                field,
                stored,
                declared,
            } => {
                assert_eq!(field, "greeting");
                assert_eq!(stored, "f64");
                assert!(declared.contains("String"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn stops_at_first_failure_keeping_earlier_assignments() {
        struct TwoFields {
            first: String,
            second: u32,
        }

        impl Resolvable for TwoFields {
            fn bindings(&mut self) -> Vec<FieldSlot<'_>> {
                vec![
                    FieldSlot::new("first", "", &mut self.first),
                    FieldSlot::new("second", "*", &mut self.second),
                ]
            }
        }

        let mut view = ProviderStore::new();
        view.put(String::from("assigned"));

        let mut target = TwoFields {
            first: String::new(),
            second: 0,
        };
        let err = view.resolve_into(&mut target).unwrap_err();

        assert!(matches!(
            err,
            ResolveError::MissingDependency { field: "second", .. }
        ));
        // The field processed before the failure keeps its assignment.
        assert_eq!(target.first, "assigned");
    }
}
