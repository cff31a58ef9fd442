//! Struct-specific `Redact` derivation.
//!
//! This module destructures `self` once and emits one statement per field
//! that the engine touches. Unit structs produce an empty body.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{DataStruct, Fields, Result};

use crate::transform::{field_name, generate_field_transform, DeriveContext, FieldInput};

pub(crate) fn derive_struct(ctx: &mut DeriveContext<'_>, data: &DataStruct) -> Result<TokenStream> {
    match &data.fields {
        Fields::Named(fields) => derive_named_struct(ctx, fields),
        Fields::Unnamed(fields) => derive_unnamed_struct(ctx, fields),
        Fields::Unit => Ok(TokenStream::new()),
    }
}

fn derive_named_struct(
    ctx: &mut DeriveContext<'_>,
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
            variant: None,
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
        let Self { #(#patterns),* } = self;
        #(#statements)*
    })
}

fn derive_unnamed_struct(
    ctx: &mut DeriveContext<'_>,
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
            variant: None,
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
        let Self ( #(#patterns),* ) = self;
        #(#statements)*
    })
}
