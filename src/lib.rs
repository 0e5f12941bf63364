//! A lightweight value-wiring registry for Rust.
//!
//! `tether` hands out values you have already built: register them by
//! concrete type or by name, then ask the [`Registry`](tether_core::registry::Registry)
//! to populate the annotated fields of a destination struct. There is no
//! object graph, no factories, and no lifecycle management.
//!
//! # Example
//!
//! ```
//! use tether::prelude::*;
//!
//! #[derive(Clone, Default)]
//! struct Database { url: String }
//!
//! #[derive(Default, Resolvable)]
//! struct AppWiring {
//!     // By type, required.
//!     #[resolve("*")]
//!     db: Database,
//!     // By name, optional.
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

pub use tether_core;

pub use tether_core::prelude::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use tether_core::prelude::*;
}
