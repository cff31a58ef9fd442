//! Derive macros for `redactif`.
//!
//! This crate generates the traversal code behind `#[derive(Redact)]`. It:
//! - reads `#[redactif = "..."]` and `#[redactif(...)]` field attributes
//! - emits a `Record` impl holding static field metadata
//! - emits a `Redact` impl that hands every field to the runtime `Redactor`
//!
//! It does **not** evaluate tag expressions. That happens at runtime in the
//! main `redactif` crate, against the tags passed to each call.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::{Ident, TokenStream};
use proc_macro_crate::{crate_name, FoundCrate};
use quote::quote;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Path, Result};

mod container;
mod derive_enum;
mod derive_struct;
mod generics;
mod strategy;
mod transform;
use container::{parse_container_options, ContainerOptions};
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::{add_default_predicates, add_redact_bounds};
use transform::DeriveContext;

/// Derives `redactif::Redact` and `redactif::Record` for structs and enums.
///
/// # Container Attributes
///
/// - `#[redactif(crate = "path")]` - Reach the runtime crate through `path`
///   instead of `::redactif`. Use this when `redactif` is re-exported by another
///   crate (e.g., `#[redactif(crate = "my_log::redactif")]`).
///
/// # Field Attributes
///
/// - **No annotation**: The field is never reset, but it is walked, so tagged
///   fields inside it are still found. The field type must implement `Redact`.
///
/// - `#[redactif = "a,!b"]` (or `#[redactif(when = "a,!b")]`): The field is
///   reset to `Default::default()` when any clause matches the active tags,
///   then walked. The field type must implement `Redact + Default`.
///
/// - `#[redactif(when = "...", opaque)]`: Reset on a match, never walked. Only
///   `Default` is required, so this works for foreign types.
///
/// - `#[redactif(skip)]`: The field is invisible to redaction. No bounds.
///
/// Unions are rejected at compile time.
///
/// # Generics
///
/// Type parameters reached by walked fields get a `Redact` bound. Parameters
/// behind a shared reference, inside a map or set, or in `PhantomData<T>` are
/// never walked and get none. A tagged field whose type mentions a parameter
/// adds a `FieldTy: Default` where-predicate, so `Vec<T>` needs nothing of `T`.
#[proc_macro_derive(Redact, attributes(redactif))]
pub fn derive_redact(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the path to the redactif crate root.
///
/// Handles crate renaming (e.g., `my_redact = { package = "redactif", ... }`).
/// Inside `redactif` itself the crate declares `extern crate self as redactif`,
/// so `::redactif` resolves for its own tests and doctests.
fn crate_root() -> Path {
    match crate_name("redactif") {
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, proc_macro2::Span::call_site());
            parse_quote!(::#ident)
        }
        Ok(FoundCrate::Itself) | Err(_) => parse_quote!(::redactif),
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions { crate_path } = parse_container_options(&attrs)?;
    let root = crate_path.unwrap_or_else(crate_root);

    let mut walked_generics = Vec::new();
    let mut tagged_types = Vec::new();
    let mut metas = Vec::new();
    let mut ctx = DeriveContext {
        generics: &generics,
        crate_root: &root,
        walked_generics: &mut walked_generics,
        tagged_types: &mut tagged_types,
        metas: &mut metas,
    };

    let redaction_body = match &data {
        Data::Struct(data) => derive_struct(&mut ctx, data)?,
        Data::Enum(data) => derive_enum(&mut ctx, data)?,
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span,
                "`Redact` cannot be derived for unions",
            ));
        }
    };

    let (record_impl_generics, record_ty_generics, record_where_clause) =
        generics.split_for_impl();
    let redact_generics = add_redact_bounds(generics.clone(), &walked_generics, &root);
    let redact_generics = add_default_predicates(redact_generics, &tagged_types);
    let (impl_generics, ty_generics, where_clause) = redact_generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #record_impl_generics #root::Record for #ident #record_ty_generics #record_where_clause {
            const FIELDS: &'static [#root::FieldMeta] = &[
                #(#metas),*
            ];
        }

        #[automatically_derived]
        impl #impl_generics #root::Redact for #ident #ty_generics #where_clause {
            fn kind(&self) -> #root::Kind {
                #root::Kind::Record
            }

            #[allow(unused_variables)]
            fn redact_with(&mut self, redactor: &mut #root::Redactor<'_>) {
                #redaction_body
            }
        }
    })
}
