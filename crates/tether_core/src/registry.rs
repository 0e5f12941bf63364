//! Synchronized provider registry.

use parking_lot::RwLock;
use variadics_please::all_tuples;

use crate::binding::Resolvable;
use crate::error::ResolveError;
use crate::store::{Provider, ProviderStore};

/// Process-scoped, thread-safe owner of the persistent provider store.
///
/// A `Registry` is created once per application scope, passed explicitly,
/// and lives for the life of the process; it holds only value references and
/// has no teardown. All mutation is serialized behind a write lock.
/// Resolution takes a read lock just long enough to clone the store, then
/// runs lock-free on its private copy, so registrations happening
/// concurrently with a resolution never corrupt it and concurrent
/// resolutions never block each other.
///
/// # Example
///
/// ```
/// use tether_core::prelude::*;
///
/// #[derive(Clone, Default, Resolvable)]
/// struct Wiring {
///     #[resolve("*")]
///     limit: u32,
/// }
///
/// let registry = Registry::new();
/// registry.provide(32_u32);
///
/// let mut wiring = Wiring::default();
/// registry.resolve(&mut wiring)?;
/// assert_eq!(wiring.limit, 32);
/// # Ok::<(), ResolveError>(())
/// ```
#[derive(Default)]
pub struct Registry {
    store: RwLock<ProviderStore>,
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("store", &*self.store.read())
            .finish()
    }
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: RwLock::new(ProviderStore::new()),
        }
    }

    /// Registers `value` under its own concrete type.
    ///
    /// A previous provider of the same type is overwritten silently
    /// (rebinding is allowed).
    pub fn provide<T: Provider>(&self, value: T) {
        tracing::trace!(provider = value.type_name(), "provider registered");
        self.store.write().put(value);
    }

    /// Registers every value of a tuple, each under its own concrete type.
    ///
    /// The empty tuple is a no-op. See [`ProvideSet`].
    pub fn provide_many<S: ProvideSet>(&self, values: S) {
        values.provide_into(&mut self.store.write());
    }

    /// Registers `value` under `name`.
    ///
    /// A trailing `*` in `name` is stripped and ignored; required semantics
    /// live only on the consuming binding.
    pub fn provide_named<T: Provider>(&self, value: T, name: impl AsRef<str>) {
        let name = name.as_ref();
        tracing::trace!(provider = value.type_name(), name, "named provider registered");
        self.store.write().put_named(value, name);
    }

    /// Copies the current store under a shared lock.
    ///
    /// The copy is what merge and resolution operate on, so no lock is held
    /// while fields are being resolved.
    #[must_use]
    pub fn snapshot(&self) -> ProviderStore {
        self.store.read().clone()
    }

    /// Resolves the annotated fields of `destination` against a snapshot of
    /// this registry.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when a required binding has no provider or a
    /// named provider does not fit its field's declared type. Fields already
    /// assigned before the failure keep their values.
    pub fn resolve<R: Resolvable>(&self, destination: &mut R) -> Result<(), ResolveError> {
        self.resolve_with(destination, &[])
    }

    /// Resolves against a snapshot of this registry overlaid with transient
    /// stores.
    ///
    /// Each store in `extras` is merged over the snapshot in argument order:
    /// later stores override earlier ones, and every transient store
    /// overrides same-keyed persistent registrations - for this call only.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve).
    pub fn resolve_with<R: Resolvable>(
        &self,
        destination: &mut R,
        extras: &[&ProviderStore],
    ) -> Result<(), ResolveError> {
        let mut view = self.snapshot();
        for extra in extras {
            view.merge(extra);
        }
        view.resolve_into(destination)
    }

    /// Like [`resolve`](Self::resolve), but panics on failure.
    ///
    /// For call sites that treat missing wiring as a programming error, not
    /// a recoverable condition.
    ///
    /// # Panics
    ///
    /// Panics with the [`ResolveError`] as the message when resolution
    /// fails.
    pub fn must_resolve<R: Resolvable>(&self, destination: &mut R) {
        if let Err(err) = self.resolve(destination) {
            panic!("resolution failed: {err}");
        }
    }

    /// Like [`resolve_with`](Self::resolve_with), but panics on failure.
    ///
    /// # Panics
    ///
    /// Panics with the [`ResolveError`] as the message when resolution
    /// fails.
    pub fn must_resolve_with<R: Resolvable>(&self, destination: &mut R, extras: &[&ProviderStore]) {
        if let Err(err) = self.resolve_with(destination, extras) {
            panic!("resolution failed: {err}");
        }
    }
}

/// A set of providers registered in one call.
///
/// Implemented for tuples of providers up to arity 12; the empty tuple
/// registers nothing. Each element is keyed by its own concrete type.
pub trait ProvideSet {
    /// Registers every value in the set into `store`.
    fn provide_into(self, store: &mut ProviderStore);
}

impl ProvideSet for () {
    fn provide_into(self, _store: &mut ProviderStore) {}
}

macro_rules! impl_provide_set_tuple {
    ($($value:ident),*) => {
        impl<$($value: Provider),*> ProvideSet for ($($value,)*) {
            #[expect(
                non_snake_case,
                reason = "the macro reuses type idents as value bindings"
            )]
            fn provide_into(self, store: &mut ProviderStore) {
                let ($($value,)*) = self;
                $(store.put($value);)*
            }
        }
    };
}

// Generate impls for tuples of size 1 to 12
all_tuples!(impl_provide_set_tuple, 1, 12, V);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::FieldSlot;

    #[derive(Debug, Clone, PartialEq)]
    struct Counter {
        value: i32,
    }

    #[derive(Default)]
    struct Target {
        counter: Counter,
        label: String,
    }

    impl Default for Counter {
        fn default() -> Self {
            Self { value: -1 }
        }
    }

    impl Resolvable for Target {
        fn bindings(&mut self) -> Vec<FieldSlot<'_>> {
            vec![
                FieldSlot::new("counter", "", &mut self.counter),
                FieldSlot::new("label", "label", &mut self.label),
            ]
        }
    }

    #[test]
    fn provide_and_resolve() {
        let registry = Registry::new();
        registry.provide(Counter { value: 3 });
        registry.provide_named(String::from("named"), "label");

        let mut target = Target::default();
        registry.resolve(&mut target).unwrap();

        assert_eq!(target.counter, Counter { value: 3 });
        assert_eq!(target.label, "named");
    }

    #[test]
    fn provide_many_registers_each_element() {
        let registry = Registry::new();
        registry.provide_many((Counter { value: 5 }, String::from("unnamed")));

        let snapshot = registry.snapshot();
        assert!(snapshot.contains::<Counter>());
        assert!(snapshot.contains::<String>());
    }

    #[test]
    fn provide_many_empty_tuple_is_a_noop() {
        let registry = Registry::new();
        registry.provide_many(());
        assert!(registry.snapshot().is_empty());
    }

    #[test]
    fn snapshot_does_not_observe_later_registrations() {
        let registry = Registry::new();
        registry.provide(Counter { value: 1 });

        let snapshot = registry.snapshot();
        registry.provide(Counter { value: 2 });

        assert_eq!(snapshot.len(), 1);
        let mut target = Target::default();
        snapshot.resolve_into(&mut target).unwrap();
        assert_eq!(target.counter.value, 1);
    }

    #[test]
    fn transient_store_overrides_for_one_call_only() {
        let registry = Registry::new();
        registry.provide_named(String::from("persistent"), "label");

        let mut transient = ProviderStore::new();
        transient.put_named(String::from("transient"), "label");

        let mut target = Target::default();
        registry.resolve_with(&mut target, &[&transient]).unwrap();
        assert_eq!(target.label, "transient");

        let mut target = Target::default();
        registry.resolve(&mut target).unwrap();
        assert_eq!(target.label, "persistent");
    }

    #[test]
    fn later_transient_stores_override_earlier_ones() {
        let registry = Registry::new();

        let mut first = ProviderStore::new();
        first.put_named(String::from("first"), "label");
        let mut second = ProviderStore::new();
        second.put_named(String::from("second"), "label");

        let mut target = Target::default();
        registry
            .resolve_with(&mut target, &[&first, &second])
            .unwrap();
        assert_eq!(target.label, "second");
    }

    #[test]
    #[should_panic(expected = "resolution failed")]
    fn must_resolve_panics_on_missing_required() {
        struct Strict {
            counter: Counter,
        }

        impl Resolvable for Strict {
            fn bindings(&mut self) -> Vec<FieldSlot<'_>> {
                vec![FieldSlot::new("counter", "*", &mut self.counter)]
            }
        }

        let registry = Registry::new();
        let mut target = Strict {
            counter: Counter::default(),
        };
        registry.must_resolve(&mut target);
    }
}
