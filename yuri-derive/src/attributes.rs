use proc_macro2::Span;
use syn::{Attribute, Ident, LitStr};

use crate::REFLECT_ATTRIBUTE_NAME;

/// `#[reflect(...)]` on the type itself
#[derive(Default)]
pub(crate) struct ContainerAttrs {
    /// `#[reflect(default)]`: construct through `Default`, adding a `Self: Default` bound
    pub default: bool,
    /// `#[reflect(auto_register)]`: submit the shape for startup registration
    pub auto_register: Option<Span>,
}

impl ContainerAttrs {
    pub(crate) fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("default") {
                    out.default = true;
                    Ok(())
                } else if meta.path.is_ident("auto_register") {
                    let span = meta.path.get_ident().map_or_else(Span::call_site, Ident::span);
                    out.auto_register = Some(span);
                    Ok(())
                } else {
                    Err(meta.error(
                        "unknown container attribute, expected `default` or `auto_register`",
                    ))
                }
            })?;
        }
        Ok(out)
    }
}

/// `#[reflect(...)]` on a field
#[derive(Default)]
pub(crate) struct FieldAttrs {
    /// `#[reflect(base)]`: merge this field's own fields into the parent
    pub base: bool,
    /// `#[reflect(skip)]`: leave the field out of the field table
    pub skip: bool,
    /// `#[reflect(rename = "...")]`
    pub rename: Option<LitStr>,
}

impl FieldAttrs {
    pub(crate) fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("base") {
                    out.base = true;
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    out.skip = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    out.rename = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unknown field attribute, expected `base`, `skip` or `rename`"))
                }
            })?;
        }
        if out.base && (out.skip || out.rename.is_some()) {
            return Err(syn::Error::new(
                Span::call_site(),
                "a base field cannot also be skipped or renamed",
            ));
        }
        Ok(out)
    }
}

/// Idents listed in every `#[repr(...)]`
pub(crate) fn reprs(attrs: &[Attribute]) -> syn::Result<Vec<Ident>> {
    let mut out = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("repr") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if let Some(ident) = meta.path.get_ident() {
                out.push(ident.clone());
            }
            // `align(8)` and friends carry a parenthesized argument
            if meta.input.peek(syn::token::Paren) {
                let _content;
                syn::parenthesized!(_content in meta.input);
            }
            Ok(())
        })?;
    }
    Ok(out)
}
