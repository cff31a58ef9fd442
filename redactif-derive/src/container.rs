//! Container-level attribute parsing for `#[derive(Redact)]`.
//!
//! This module handles attributes on the struct/enum itself, not on fields.

use syn::{Attribute, Meta, Path, Result};

/// Options parsed from container-level `#[redactif(...)]` attributes.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// Overrides the path used to reach the `redactif` runtime crate.
    pub(crate) crate_path: Option<Path>,
}

/// Parses container-level `#[redactif(...)]` attributes.
pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("redactif") {
            continue;
        }

        match &attr.meta {
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("crate") {
                        let value: syn::LitStr = meta.value()?.parse()?;
                        options.crate_path = Some(value.parse()?);
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown container option `{}`; expected `crate`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::Path(_) | Meta::NameValue(_) => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "tag expressions belong on fields; containers only accept #[redactif(crate = \"...\")]",
                ));
            }
        }
    }

    Ok(options)
}
