//! Attribute parsing for `#[codable(...)]`.

use syn::{parse_quote, Attribute, Expr, ExprLit, Lit, Path, Result};

/// Parsed field attributes from `#[codable(...)]`.
#[derive(Debug, Default, Clone)]
pub struct FieldAttrs {
    /// The field is transient: never encoded, defaulted when decoding.
    pub skip: bool,
}

impl FieldAttrs {
    /// Parse attributes from a field.
    pub fn from_attrs(attrs: &[Attribute]) -> Result<Self> {
        let mut result = FieldAttrs::default();

        for attr in attrs {
            if attr.path().is_ident("codable") {
                result.parse_codable_attr(attr)?;
            }
        }

        Ok(result)
    }

    fn parse_codable_attr(&mut self, attr: &Attribute) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                self.skip = true;
            } else {
                return Err(syn::Error::new_spanned(
                    meta.path,
                    "unknown codable field attribute",
                ));
            }
            Ok(())
        })
    }
}

/// Parsed struct-level attributes.
#[derive(Debug, Clone)]
pub struct ContainerAttrs {
    /// Diagnose fields whose type has no supported shape instead of skipping them.
    pub strict: bool,
    /// Path of the runtime crate the generated code refers to.
    pub crate_path: Path,
}

impl Default for ContainerAttrs {
    fn default() -> Self {
        ContainerAttrs {
            strict: false,
            crate_path: parse_quote!(::codable),
        }
    }
}

impl ContainerAttrs {
    /// Parse attributes from a struct.
    pub fn from_attrs(attrs: &[Attribute]) -> Result<Self> {
        let mut result = ContainerAttrs::default();

        for attr in attrs {
            if attr.path().is_ident("codable") {
                result.parse_codable_attr(attr)?;
            }
        }

        Ok(result)
    }

    fn parse_codable_attr(&mut self, attr: &Attribute) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("strict") {
                self.strict = true;
            } else if meta.path.is_ident("crate") {
                let value: Expr = meta.value()?.parse()?;
                if let Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) = value
                {
                    self.crate_path = lit.parse()?;
                } else {
                    return Err(syn::Error::new_spanned(value, "expected string literal"));
                }
            } else if meta.path.is_ident("skip") {
                return Err(syn::Error::new_spanned(
                    meta.path,
                    "`skip` is a field attribute",
                ));
            } else {
                return Err(syn::Error::new_spanned(
                    meta.path,
                    "unknown codable attribute",
                ));
            }
            Ok(())
        })
    }
}
