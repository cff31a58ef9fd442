//! Parsing of `#[redactif(...)]` field attributes.
//!
//! This module maps attribute syntax to traversal decisions and produces
//! structured errors for invalid forms.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, Expr, ExprLit, Lit, LitStr, Meta, Result};

/// How the engine treats a field.
///
/// | Attribute | Access | Behavior |
/// |-----------|--------|----------|
/// | None / `#[redactif = "..."]` | `Walk` | Zero on match, then walk |
/// | `#[redactif(opaque)]` | `Opaque` | Zero on match, never walk |
/// | `#[redactif(skip)]` | `Skip` | Invisible to the engine |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Access {
    #[default]
    Walk,
    Opaque,
    Skip,
}

/// Everything the derive needs to know about one field.
#[derive(Clone, Debug, Default)]
pub(crate) struct FieldStrategy {
    /// The tag expression, kept as the original literal for spans.
    pub(crate) when: Option<LitStr>,
    pub(crate) access: Access,
}

impl FieldStrategy {
    pub(crate) fn is_tagged(&self) -> bool {
        self.when.is_some() && self.access != Access::Skip
    }
}

fn expect_str(expr: &Expr) -> Result<LitStr> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(lit), ..
        }) => Ok(lit.clone()),
        other => Err(syn::Error::new(
            other.span(),
            "expected a tag expression string (e.g., #[redactif = \"admin,!owner\"])",
        )),
    }
}

fn set_when(target: &mut Option<LitStr>, next: LitStr, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "a field can only have one tag expression",
        ));
    }
    *target = Some(next);
    Ok(())
}

fn set_access(target: &mut Access, next: Access, span: Span) -> Result<()> {
    if *target != Access::Walk {
        return Err(syn::Error::new(
            span,
            "`opaque` and `skip` may each appear once and cannot be combined",
        ));
    }
    *target = next;
    Ok(())
}

pub(crate) fn parse_field_strategy(attrs: &[Attribute]) -> Result<FieldStrategy> {
    let mut strategy = FieldStrategy::default();
    let mut seen: Option<Span> = None;
    for attr in attrs {
        if !attr.path().is_ident("redactif") {
            continue;
        }
        if seen.is_some() {
            return Err(syn::Error::new(
                attr.span(),
                "multiple #[redactif] attributes specified on the same field",
            ));
        }
        seen = Some(attr.span());

        match &attr.meta {
            Meta::Path(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "bare #[redactif] has no meaning; use #[redactif = \"tag\"], \
                    #[redactif(opaque)] or #[redactif(skip)]",
                ));
            }
            Meta::NameValue(nv) => {
                set_when(&mut strategy.when, expect_str(&nv.value)?, attr.span())?;
            }
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("when") {
                        let value: LitStr = meta.value()?.parse()?;
                        set_when(&mut strategy.when, value, meta.path.span())
                    } else if meta.path.is_ident("opaque") {
                        set_access(&mut strategy.access, Access::Opaque, meta.path.span())
                    } else if meta.path.is_ident("skip") {
                        set_access(&mut strategy.access, Access::Skip, meta.path.span())
                    } else {
                        Err(meta.error(format!(
                            "unknown field option `{}`; expected `when`, `opaque` or `skip`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
        }
    }

    if strategy.access == Access::Skip && strategy.when.is_some() {
        return Err(syn::Error::new(
            seen.unwrap_or_else(Span::call_site),
            "`skip` fields are invisible to redaction and cannot carry a tag expression",
        ));
    }

    Ok(strategy)
}
