//! Auto-detection of crate paths for generated code.
//!
//! The `Resolvable` derive emits fully-qualified paths into generated code.
//!
//! This module determines the correct path for `tether_core` by checking:
//! 1. If the consuming crate is `tether_core`, it uses a direct path.
//! 2. If the consuming crate depends on `tether_core`, it emits `tether_core::` paths.
//! 3. If the consuming crate depends on the `tether` umbrella, it emits `tether::tether_core::` paths.
//!
//! This allows the derive to work regardless of how the user imports tether,
//! including when dependencies are renamed in `Cargo.toml`.

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// Returns the token path for `tether_core` in the consuming crate.
pub(crate) fn tether_core_path() -> TokenStream {
    match crate_name("tether_core") {
        Ok(FoundCrate::Itself) => quote!(tether_core),
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote!(#ident)
        }
        Err(_) => match crate_name("tether") {
            Ok(FoundCrate::Name(name)) => {
                let ident = format_ident!("{}", name);
                quote!(#ident::tether_core)
            }
            _ => quote!(tether_core),
        },
    }
}
