//! Code generation for `#[derive(Resolvable)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, LitStr, Meta};

use crate::crate_path::tether_core_path;

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let core = tether_core_path();

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "`Resolvable` can only be derived for structs",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "`Resolvable` requires a struct with named fields",
        ));
    };

    let mut slots = Vec::new();
    for field in &fields.named {
        let Some(annotation) = binding_annotation(field)? else {
            continue;
        };
        let ident = field.ident.as_ref().expect("named field has an ident");
        let name = ident.to_string();
        slots.push(quote! {
            #core::binding::FieldSlot::new(#name, #annotation, &mut self.#ident)
        });
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics #core::binding::Resolvable for #ident #ty_generics #where_clause {
            fn bindings(&mut self) -> ::std::vec::Vec<#core::binding::FieldSlot<'_>> {
                ::std::vec![
                    #(#slots),*
                ]
            }
        }
    })
}

/// Returns the raw annotation string for a field, or `None` when the field
/// carries no `#[resolve]` attribute.
fn binding_annotation(field: &Field) -> syn::Result<Option<String>> {
    for attr in &field.attrs {
        if !attr.path().is_ident("resolve") {
            continue;
        }
        return match &attr.meta {
            // `#[resolve]` is the empty annotation: by type, optional.
            Meta::Path(_) => Ok(Some(String::new())),
            Meta::List(_) => {
                let lit: LitStr = attr.parse_args()?;
                Ok(Some(lit.value()))
            }
            Meta::NameValue(_) => Err(syn::Error::new_spanned(
                attr,
                "expected `#[resolve]` or `#[resolve(\"name\")]`",
            )),
        };
    }
    Ok(None)
}
