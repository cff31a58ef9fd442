//! Shared field logic for struct and enum derivation.
//!
//! Every field produces two things: an entry in the type's static
//! `Record::FIELDS` table, and (unless the engine never touches it) one
//! statement in `redact_with` that reads its tag expression back from that
//! table by index.

use proc_macro2::{Ident, Span, TokenStream};
use quote::{quote, quote_spanned};
use syn::{ext::IdentExt, spanned::Spanned, LitStr, Path, Result};

use crate::{
    generics::{collect_walked_generics, mentions_type_params},
    strategy::{parse_field_strategy, Access, FieldStrategy},
};

/// Accumulated state during field processing.
///
/// Field indices are global to the type: enum variants share one table.
pub(crate) struct DeriveContext<'a> {
    pub(crate) generics: &'a syn::Generics,
    pub(crate) crate_root: &'a Path,
    pub(crate) walked_generics: &'a mut Vec<Ident>,
    /// Tagged field types that mention a type parameter.
    pub(crate) tagged_types: &'a mut Vec<syn::Type>,
    pub(crate) metas: &'a mut Vec<TokenStream>,
}

/// One field as seen by the derive.
pub(crate) struct FieldInput<'a> {
    pub(crate) field: &'a syn::Field,
    /// Name recorded in metadata (`"0"`, `"1"`, ... for positional fields).
    pub(crate) name: String,
    /// Local binding produced by the destructuring pattern.
    pub(crate) binding: &'a Ident,
    pub(crate) variant: Option<&'a Ident>,
}

/// Generates the metadata entry and the redaction statement for one field.
///
/// Returns `None` when the field's binding is never used.
///
/// ## Field Transformation Rules
///
/// | Attribute | Statement | Bounds |
/// |-----------|-----------|--------|
/// | None | `redactor.walk(field)` | `T: Redact` on reached params |
/// | `#[redactif = "..."]` | `redactor.field(field, meta)` | as above, plus `FieldTy: Default` |
/// | `#[redactif(when = "...", opaque)]` | `redactor.zero(field, meta)` | `FieldTy: Default` |
/// | `#[redactif(skip)]` / untagged `opaque` | none | none |
pub(crate) fn generate_field_transform(
    ctx: &mut DeriveContext<'_>,
    input: &FieldInput<'_>,
) -> Result<Option<TokenStream>> {
    let strategy = parse_field_strategy(&input.field.attrs)?;
    let root = ctx.crate_root;
    let ty = &input.field.ty;
    let span = input.field.span();
    let binding = input.binding;

    let index = ctx.metas.len();
    ctx.metas.push(field_meta(root, input, &strategy, span));
    let meta = quote_spanned! { span =>
        &<Self as #root::Record>::FIELDS[#index]
    };

    let statement = match (strategy.access, strategy.is_tagged()) {
        (Access::Skip, _) | (Access::Opaque, false) => None,
        (Access::Opaque, true) => {
            require_default(ctx, ty);
            Some(quote_spanned! { span =>
                redactor.zero(#binding, #meta);
            })
        }
        (Access::Walk, true) => {
            collect_walked_generics(ty, ctx.generics, ctx.walked_generics);
            require_default(ctx, ty);
            Some(quote_spanned! { span =>
                redactor.field(#binding, #meta);
            })
        }
        (Access::Walk, false) => {
            collect_walked_generics(ty, ctx.generics, ctx.walked_generics);
            Some(quote_spanned! { span =>
                redactor.walk(#binding);
            })
        }
    };

    Ok(statement)
}

fn require_default(ctx: &mut DeriveContext<'_>, ty: &syn::Type) {
    if mentions_type_params(ty, ctx.generics) && !ctx.tagged_types.contains(ty) {
        ctx.tagged_types.push(ty.clone());
    }
}

fn field_meta(
    root: &Path,
    input: &FieldInput<'_>,
    strategy: &FieldStrategy,
    span: Span,
) -> TokenStream {
    let ty = &input.field.ty;
    let name = LitStr::new(&input.name, span);
    let mut meta = quote_spanned! { span =>
        #root::FieldMeta::new(#name, ::core::stringify!(#ty))
    };
    if let Some(when) = &strategy.when {
        meta = quote! { #meta.tagged(#when) };
    }
    if let Some(variant) = input.variant {
        let variant = LitStr::new(&variant.unraw().to_string(), variant.span());
        meta = quote! { #meta.in_variant(#variant) };
    }
    match strategy.access {
        Access::Walk => {}
        Access::Opaque => meta = quote! { #meta.with_access(#root::FieldAccess::Opaque) },
        Access::Skip => meta = quote! { #meta.with_access(#root::FieldAccess::Skip) },
    }
    meta
}

/// Metadata name for a field: the unraw'd identifier, or its position.
pub(crate) fn field_name(field: &syn::Field, index: usize) -> String {
    field
        .ident
        .as_ref()
        .map_or_else(|| index.to_string(), |ident| ident.unraw().to_string())
}
