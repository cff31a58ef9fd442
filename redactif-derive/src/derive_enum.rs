//! Enum-specific `Redact` derivation.
//!
//! This module generates one match arm per variant. Field metadata for every
//! variant lands in the same table, in declaration order.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{DataEnum, Fields, Result};

use crate::transform::{field_name, generate_field_transform, DeriveContext, FieldInput};

pub(crate) fn derive_enum(ctx: &mut DeriveContext<'_>, data: &DataEnum) -> Result<TokenStream> {
    if data.variants.is_empty() {
        return Ok(quote! { match *self {} });
    }

    let mut arms = Vec::new();
    for variant in &data.variants {
        let variant_ident = &variant.ident;
        let arm = match &variant.fields {
            Fields::Unit => quote! { Self::#variant_ident => {} },
            Fields::Named(fields) => derive_named_variant(ctx, variant_ident, fields)?,
            Fields::Unnamed(fields) => derive_unnamed_variant(ctx, variant_ident, fields)?,
        };
        arms.push(arm);
    }

    Ok(quote! {
        match self {
            #(#arms)*
        }
    })
}

fn derive_named_variant(
    ctx: &mut DeriveContext<'_>,
    variant_ident: &Ident,
    fields: &syn::FieldsNamed,
) -> Result<TokenStream> {
    let mut patterns = Vec::new();
    let mut statements = Vec::new();

    for (index, field) in fields.named.iter().enumerate() {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let input = FieldInput {
            field,
            name: field_name(field, index),
            binding: ident,
            variant: Some(variant_ident),
        };
        match generate_field_transform(ctx, &input)? {
            Some(statement) => {
                patterns.push(quote! { #ident });
                statements.push(statement);
            }
            None => patterns.push(quote! { #ident: _ }),
        }
    }

    Ok(quote! {
        Self::#variant_ident { #(#patterns),* } => {
            #(#statements)*
        }
    })
}

fn derive_unnamed_variant(
    ctx: &mut DeriveContext<'_>,
    variant_ident: &Ident,
    fields: &syn::FieldsUnnamed,
) -> Result<TokenStream> {
    let mut patterns = Vec::new();
    let mut statements = Vec::new();

    for (index, field) in fields.unnamed.iter().enumerate() {
        let binding = format_ident!("field_{index}");
        let input = FieldInput {
            field,
            name: field_name(field, index),
            binding: &binding,
            variant: Some(variant_ident),
        };
        match generate_field_transform(ctx, &input)? {
            Some(statement) => {
                statements.push(statement);
                patterns.push(quote! { #binding });
            }
            None => patterns.push(quote! { _ }),
        }
    }

    Ok(quote! {
        Self::#variant_ident ( #(#patterns),* ) => {
            #(#statements)*
        }
    })
}
