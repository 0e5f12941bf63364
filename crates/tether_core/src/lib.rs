//! Provider registry and field-resolution engine.
//!
//! `tether_core` is a pure lookup-and-assign facility over values the caller
//! already owns:
//!
//! - [`store`] - Unsynchronized provider storage, keyed by type or by name
//! - [`registry`] - Synchronized, process-scoped owner of a provider store
//! - [`binding`] - Field bindings and the [`Resolvable`](binding::Resolvable)
//!   destination contract
//! - [`error`] - Resolution error taxonomy
//! - [`macro@Resolvable`] - Derive macro that turns `#[resolve]` field
//!   attributes into a `Resolvable` impl
//!
//! The registry never constructs, destroys, or tracks the lifetime of the
//! values it holds. Registration is serialized behind a write lock;
//! resolution copies the current store under a read lock and then runs
//! lock-free against its private merged view, so a slow resolution never
//! blocks concurrent registrations.
//!
//! # Example
//!
//! ```
//! use tether_core::prelude::*;
//!
//! #[derive(Clone, Default)]
//! struct Database { url: String }
//!
//! #[derive(Default, Resolvable)]
//! struct AppWiring {
//!     // By type, required: resolution fails if no Database is registered.
//!     #[resolve("*")]
//!     db: Database,
//!     // By name, optional: left untouched when "greeting" is absent.
//!     #[resolve("greeting")]
//!     greeting: String,
//! }
//!
//! let registry = Registry::new();
//! registry.provide(Database { url: "postgres://localhost".into() });
//! registry.provide_named(String::from("hello"), "greeting");
//!
//! let mut wiring = AppWiring::default();
//! registry.resolve(&mut wiring)?;
//! assert_eq!(wiring.db.url, "postgres://localhost");
//! assert_eq!(wiring.greeting, "hello");
//! # Ok::<(), ResolveError>(())
//! ```

// Self-reference so that `#[derive(Resolvable)]`-generated code can use
// `tether_core::` paths within this crate.
extern crate self as tether_core;

/// Field bindings and the `Resolvable` destination contract.
pub mod binding;

/// Resolution error taxonomy.
pub mod error;

/// Synchronized provider registry.
pub mod registry;

/// Unsynchronized provider storage and merge semantics.
pub mod store;

mod engine;

/// Re-export the `Resolvable` derive macro.
pub use tether_core_macros::Resolvable;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::Resolvable;
    pub use crate::binding::{Binding, FieldSlot, Resolvable, Slot};
    pub use crate::error::{MissingKey, ResolveError};
    pub use crate::registry::{ProvideSet, Registry};
    pub use crate::store::{Provider, ProviderKey, ProviderStore};
}
