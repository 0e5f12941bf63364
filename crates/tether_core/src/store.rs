//! Provider storage.
//!
//! A [`ProviderStore`] maps a [`ProviderKey`] (the concrete type of a value,
//! or a caller-chosen name) to one pre-built value. The store itself is
//! unsynchronized; the [`Registry`](crate::registry::Registry) serializes
//! mutation, and per-call merged views are private to the resolving thread.
//!
//! Keys are unique within one store. Inserting under an existing key
//! overwrites the previous entry silently (last write wins) - rebinding a
//! provider is an intentional feature, not an error.

use core::any::{Any, TypeId};
use std::sync::Arc;

use hashbrown::HashMap;

use crate::binding::{Resolvable, strip_required_marker};
use crate::engine;
use crate::error::ResolveError;

/// A value that can be registered as a provider.
///
/// Any type that is `Send + Sync + 'static` automatically implements
/// `Provider`. The store hands out clones of an internal shared pointer, so
/// providers themselves never need to be `Clone`; only destination *field*
/// types do (see [`Slot`](crate::binding::Slot)).
pub trait Provider: Send + Sync + 'static {
    /// Returns the type name for diagnostics.
    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

impl<T: Send + Sync + 'static> Provider for T {}

/// Key a provider is registered under.
///
/// Equality is identifier equality: two `Type` keys match only when the
/// concrete types are the same, and two `Name` keys only when the strings
/// are equal. The required marker (`*`) is never part of a name key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProviderKey {
    /// Canonical identifier of the concrete value type.
    Type(TypeId),
    /// Caller-chosen name.
    Name(String),
}

impl ProviderKey {
    /// Returns the type key for `T`.
    #[must_use]
    pub fn of<T: Provider>() -> Self {
        Self::Type(TypeId::of::<T>())
    }

    /// Returns the name key for `name`, with a trailing required marker
    /// stripped.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self::Name(strip_required_marker(name).to_owned())
    }
}

/// One registered provider: a type-erased shared value plus its type name.
#[derive(Clone)]
pub(crate) struct ProviderEntry {
    /// The registered value. Shared, never mutated through the store.
    pub(crate) value: Arc<dyn Any + Send + Sync>,
    /// Type name of the registered value, for diagnostics.
    pub(crate) type_name: &'static str,
}

impl ProviderEntry {
    fn new<T: Provider>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_name: core::any::type_name::<T>(),
        }
    }
}

/// Unsynchronized mapping from [`ProviderKey`] to a registered value.
///
/// Cloning a store is cheap: entries hold their values behind shared
/// pointers, so a clone is a fresh map over the same values. The
/// [`Registry`](crate::registry::Registry) uses this for its snapshots, and
/// [`merge`](Self::merge) uses it to build layered per-call views.
#[derive(Default, Clone)]
pub struct ProviderStore {
    entries: HashMap<ProviderKey, ProviderEntry>,
}

impl core::fmt::Debug for ProviderStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProviderStore")
            .field("providers", &self.key_names())
            .finish()
    }
}

impl ProviderStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registers `value` under its own concrete type.
    ///
    /// A previous provider of the same type is overwritten silently.
    pub fn put<T: Provider>(&mut self, value: T) {
        self.entries
            .insert(ProviderKey::of::<T>(), ProviderEntry::new(value));
    }

    /// Registers `value` under `name`.
    ///
    /// A trailing `*` in `name` is stripped and ignored: required semantics
    /// live only on the consuming binding, never on the registration. A
    /// previous provider under the same name is overwritten silently.
    pub fn put_named<T: Provider>(&mut self, value: T, name: impl AsRef<str>) {
        self.entries
            .insert(ProviderKey::named(name.as_ref()), ProviderEntry::new(value));
    }

    /// Overlays every entry of `source` onto `self`.
    ///
    /// On key collision the `source` entry wins. `source` is unaffected.
    pub fn merge(&mut self, source: &ProviderStore) {
        for (key, entry) in &source.entries {
            self.entries.insert(key.clone(), entry.clone());
        }
    }

    /// Resolves the annotated fields of `destination` against this store.
    ///
    /// This treats the store itself as the merged view; use
    /// [`Registry::resolve`](crate::registry::Registry::resolve) to resolve
    /// against a registry snapshot plus transient stores.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when a required binding has no provider or a
    /// named provider does not fit its field's declared type. Fields already
    /// assigned before the failure keep their values.
    pub fn resolve_into<R: Resolvable>(&self, destination: &mut R) -> Result<(), ResolveError> {
        engine::resolve_fields(self, destination)
    }

    pub(crate) fn get(&self, key: &ProviderKey) -> Option<&ProviderEntry> {
        self.entries.get(key)
    }

    /// Returns `true` if a provider of type `T` is registered.
    #[must_use]
    pub fn contains<T: Provider>(&self) -> bool {
        self.entries.contains_key(&ProviderKey::of::<T>())
    }

    /// Returns `true` if a provider is registered under `name`.
    #[must_use]
    pub fn contains_named(&self, name: &str) -> bool {
        self.entries.contains_key(&ProviderKey::named(name))
    }

    /// Returns the number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no providers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Key descriptions for `Debug` output: names as-is, type keys as the
    /// registered value's type name.
    fn key_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(key, entry)| match key {
                ProviderKey::Type(_) => format!("<{}>", entry.type_name),
                ProviderKey::Name(name) => name.clone(),
            })
            .collect()
    }
}
