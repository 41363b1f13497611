//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts configuration attributes from the struct and its
//! fields during macro expansion.

use syn::{Attribute, Field, Lit};

/// Parsed struct-level `#[env(...)]` attributes.
#[derive(Debug, Default)]
pub struct StructAttrs {
    /// Prefix prepended to every environment variable name.
    pub prefix: String,
}

impl StructAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("prefix") {
                    let lit: Lit = meta.value()?.parse()?;
                    match lit {
                        Lit::Str(s) => parsed.prefix = s.value(),
                        lit => return Err(syn::Error::new_spanned(lit, "prefix must be a string")),
                    }
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level env attribute"))
            })?;
        }

        Ok(parsed)
    }
}

/// Parsed `#[env(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Custom environment variable name override.
    ///
    /// If `None`, the field name is converted to UPPER_SNAKE_CASE.
    pub name: Option<String>,

    /// Explicit default value expression.
    ///
    /// If `None`, `Default::default()` is used.
    pub default: Option<proc_macro2::TokenStream>,

    /// Custom converter function path (e.g., `"hotenv::convert::json"`).
    ///
    /// When specified, bypasses `FromEnv` and uses this function instead.
    pub converter: Option<syn::Path>,
}

impl FieldAttrs {
    /// Extract and parse `#[env(...)]` attributes from a struct field.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // name = "..."
                if meta.path.is_ident("name") {
                    let lit: Lit = meta.value()?.parse()?;
                    match lit {
                        Lit::Str(s) => attrs.name = Some(s.value()),
                        lit => return Err(syn::Error::new_spanned(lit, "name must be a string")),
                    }
                    return Ok(());
                }

                // default or default = value
                if meta.path.is_ident("default") {
                    if meta.input.peek(syn::Token![=]) {
                        let value = meta.value()?;
                        let expr: syn::Expr = value.parse()?;
                        attrs.default = Some(quote::quote!(#expr));
                    } else {
                        attrs.default = None;
                    }
                    return Ok(());
                }

                // converter = "function::path"
                if meta.path.is_ident("converter") {
                    let lit: Lit = meta.value()?.parse()?;
                    match lit {
                        Lit::Str(s) => attrs.converter = Some(s.parse::<syn::Path>()?),
                        lit => {
                            return Err(syn::Error::new_spanned(
                                lit,
                                "converter must be a string containing a function path",
                            ))
                        }
                    }
                    return Ok(());
                }

                Err(meta.error("unsupported env attribute"))
            })?;
        }

        Ok(attrs)
    }
}
