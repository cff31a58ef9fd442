//! Generic type parameter handling and trait bound management.
//!
//! Walked fields put a `Redact` bound on the type parameters they reach.
//! Tagged fields instead get a `FieldTy: Default` where-predicate, since a
//! container such as `Vec<T>` is `Default` for every `T`.
//!
//! ## Skipped Positions
//!
//! Some positions never reach a `Redact` bound on their parameters and are
//! skipped when collecting walked generics:
//!
//! ```ignore
//! struct View<'a, T, K, M> {
//!     borrowed: &'a T,           // shared references are never walked
//!     index: HashMap<K, String>, // map contents are never inspected
//!     _marker: PhantomData<M>,   // marker types are scalars
//! }
//! ```

use syn::{parse_quote, Ident, Path};

/// Wrappers whose `Redact` impl places no bound on their type arguments.
const UNBOUNDED_WRAPPERS: &[&str] = &["PhantomData", "HashMap", "BTreeMap", "HashSet", "BTreeSet"];

/// Collects type parameters that a walk through `ty` requires to be `Redact`.
pub(crate) fn collect_walked_generics(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    collect(ty, generics, result, true);
}

/// Returns `true` when `ty` mentions any type parameter of `generics`.
pub(crate) fn mentions_type_params(ty: &syn::Type, generics: &syn::Generics) -> bool {
    let mut found = Vec::new();
    collect(ty, generics, &mut found, false);
    !found.is_empty()
}

fn collect(ty: &syn::Type, generics: &syn::Generics, result: &mut Vec<Ident>, walked: bool) {
    match ty {
        syn::Type::Path(path) => {
            if let Some(segment) = path.path.segments.last() {
                if walked && UNBOUNDED_WRAPPERS.iter().any(|name| segment.ident == name) {
                    return;
                }

                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    for arg in &args.args {
                        if let syn::GenericArgument::Type(inner_ty) = arg {
                            collect(inner_ty, generics, result, walked);
                        }
                    }
                }

                for param in generics.type_params() {
                    if segment.ident == param.ident && !result.iter().any(|g| g == &param.ident) {
                        result.push(param.ident.clone());
                    }
                }
            }
        }
        syn::Type::Reference(reference) => {
            if walked && reference.mutability.is_none() {
                return;
            }
            collect(&reference.elem, generics, result, walked);
        }
        syn::Type::Array(array) => collect(&array.elem, generics, result, walked),
        syn::Type::Slice(slice) => collect(&slice.elem, generics, result, walked),
        syn::Type::Tuple(tuple) => {
            for elem in &tuple.elems {
                collect(elem, generics, result, walked);
            }
        }
        syn::Type::Paren(paren) => collect(&paren.elem, generics, result, walked),
        _ => {}
    }
}

/// Adds `Redact` bounds to generic parameters used in walked fields.
pub(crate) fn add_redact_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
    crate_root: &Path,
) -> syn::Generics {
    let bound: syn::TypeParamBound = parse_quote!(#crate_root::Redact);
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            param.bounds.push(bound.clone());
        }
    }
    generics
}

/// Adds a `FieldTy: Default` where-predicate for each tagged field type.
///
/// Tagged fields are reset with `Default::default()`, so the requirement is on
/// the field type as written, not on the parameters inside it.
pub(crate) fn add_default_predicates(
    mut generics: syn::Generics,
    tagged_types: &[syn::Type],
) -> syn::Generics {
    if tagged_types.is_empty() {
        return generics;
    }
    let where_clause = generics.make_where_clause();
    for ty in tagged_types {
        where_clause
            .predicates
            .push(parse_quote!(#ty: ::core::default::Default));
    }
    generics
}
