//! Derive macros for `tether_core`.

mod crate_path;
mod resolvable;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derives `Resolvable` for a struct with named fields.
///
/// Fields opt in to resolution with a `#[resolve]` attribute; fields
/// without one are invisible to the engine:
///
/// - `#[resolve]` - resolve by the field's declared type; optional
/// - `#[resolve("*")]` - resolve by the field's declared type; required
/// - `#[resolve("name")]` - resolve by name; optional
/// - `#[resolve("name*")]` - resolve by name; required
///
/// Every annotated field's type must be `Clone + Send + Sync + 'static`.
///
/// # Example
///
/// ```ignore
/// #[derive(Default, Resolvable)]
/// struct Wiring {
///     #[resolve("*")]
///     db: Database,
///     #[resolve("cache")]
///     cache: Arc<dyn Cache>,
///     not_wired: usize,
/// }
/// ```
#[proc_macro_derive(Resolvable, attributes(resolve))]
pub fn derive_resolvable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    resolvable::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
