//! Source-file code generation, for build scripts and the CLI.
//!
//! Reads a Rust file, picks the type declarations to synthesize for, and
//! returns the generated items as formatted source text. A diagnostic on one
//! declaration does not stop the others.
//!
//! Only top-level declarations get members. Records inside an inline
//! `mod name { .. }` are found and reported with a
//! [`DiagnosticKind::NestedDeclaration`](crate::DiagnosticKind) warning,
//! because the generated file is included at the top level where their
//! field types may not resolve.

use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Attribute, Ident, Item, Path, Token};

use crate::diagnostic::Diagnostic;
use crate::model::Declaration;
use crate::synthesize;

/// Header written on top of generated files.
pub const GENERATED_HEADER: &str = "// @generated by codable-codegen. Do not edit by hand.\n";

#[derive(Debug, Clone, Default)]
pub struct CodegenOptions {
    /// Synthesize exactly these types. When empty, every declaration with
    /// `#[derive(Codable)]` is selected.
    pub types: Vec<String>,
    /// Treat every selected record as `#[codable(strict)]`.
    pub strict: bool,
    /// Override the runtime crate path, e.g. `"::my_runtime::codable"`.
    pub crate_path: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    #[error("failed to parse source at {line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("type '{0}' not found in source")]
    TypeNotFound(String),

    #[error("invalid crate path '{0}'")]
    InvalidCratePath(String),

    #[error("generated members for '{record}' do not parse: {message}")]
    Unparsable { record: String, message: String },
}

/// Result of expanding one source file.
#[derive(Debug, Default)]
pub struct Expansion {
    /// Names of the records that got members, in source order.
    pub generated: Vec<String>,
    /// Errors and warnings, in source order.
    pub diagnostics: Vec<Diagnostic>,
    items: Vec<Item>,
}

impl Expansion {
    /// Whether any diagnostic is an error. Warnings do not count.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Generated items as formatted source text.
    pub fn to_source(&self) -> String {
        let file = syn::File {
            shebang: None,
            attrs: Vec::new(),
            items: self.items.clone(),
        };
        let mut out = String::from(GENERATED_HEADER);
        if !self.items.is_empty() {
            out.push('\n');
            out.push_str(&prettyplease::unparse(&file));
        }
        out
    }

    pub fn to_token_stream(&self) -> TokenStream {
        self.items.iter().map(ToTokens::to_token_stream).collect()
    }
}

/// A type declaration found while walking the file.
struct Candidate<'a> {
    item: &'a Item,
    ident: &'a Ident,
    derive: Option<&'a Attribute>,
    /// `a::b` for a declaration inside `mod a { mod b { .. } }`.
    module: Option<String>,
}

/// Expand every selected declaration of `source`.
pub fn expand_file(source: &str, options: &CodegenOptions) -> Result<Expansion, CodegenError> {
    let file = syn::parse_file(source).map_err(|err| {
        let start = err.span().start();
        CodegenError::Parse {
            line: start.line,
            column: start.column + 1,
            message: err.to_string(),
        }
    })?;

    let crate_path = options
        .crate_path
        .as_deref()
        .map(|path| {
            syn::parse_str::<Path>(path).map_err(|_| CodegenError::InvalidCratePath(path.to_string()))
        })
        .transpose()?;

    let mut candidates = Vec::new();
    collect_candidates(&file.items, &mut Vec::new(), &mut candidates);

    let mut expansion = Expansion::default();
    let mut found = Vec::new();

    for candidate in candidates {
        let Candidate {
            item,
            ident,
            derive,
            module,
        } = candidate;
        let selected = if options.types.is_empty() {
            derive.is_some()
        } else {
            options.types.iter().any(|name| ident == name)
        };
        if !selected {
            continue;
        }
        found.push(ident.to_string());

        if let Some(module) = module {
            tracing::warn!(record = %ident, module = %module, "skipping record in inline module");
            expansion
                .diagnostics
                .push(Diagnostic::nested_declaration(ident, &module));
            continue;
        }

        let Some(parsed) = Declaration::from_item(item) else {
            continue;
        };
        let result = parsed.and_then(|mut declaration| {
            if let Some(attr) = derive {
                declaration.span = attr.span();
            }
            declaration.attrs.strict |= options.strict;
            if let Some(path) = &crate_path {
                declaration.attrs.crate_path = path.clone();
            }
            synthesize(&declaration)
        });

        match result {
            Ok(members) => {
                tracing::debug!(record = %ident, "generated members");
                // Reaching here means strict mode was off for this record.
                expansion.diagnostics.extend(
                    members
                        .fields
                        .iter()
                        .filter(|field| field.is_stored_property && !field.shape.is_recognized())
                        .map(|field| Diagnostic::skipped_field(&field.name)),
                );

                let generated: syn::File =
                    syn::parse2(members.into_token_stream()).map_err(|err| {
                        CodegenError::Unparsable {
                            record: ident.to_string(),
                            message: err.to_string(),
                        }
                    })?;
                expansion.generated.push(ident.to_string());
                expansion.items.extend(generated.items);
            }
            Err(diagnostic) => {
                tracing::debug!(record = %ident, error = %diagnostic, "synthesis failed");
                expansion.diagnostics.push(diagnostic);
            }
        }
    }

    if let Some(missing) = options.types.iter().find(|name| !found.contains(name)) {
        return Err(CodegenError::TypeNotFound(missing.clone()));
    }

    Ok(expansion)
}

/// Walk `items` and inline modules below them, in source order.
fn collect_candidates<'a>(
    items: &'a [Item],
    modules: &mut Vec<String>,
    out: &mut Vec<Candidate<'a>>,
) {
    for item in items {
        if let Item::Mod(module) = item {
            if let Some((_, content)) = &module.content {
                modules.push(module.ident.to_string());
                collect_candidates(content, modules, out);
                modules.pop();
            }
            continue;
        }
        let Some((ident, attrs)) = type_item(item) else {
            continue;
        };
        out.push(Candidate {
            item,
            ident,
            derive: codable_derive(attrs),
            module: (!modules.is_empty()).then(|| modules.join("::")),
        });
    }
}

fn type_item(item: &Item) -> Option<(&Ident, &[Attribute])> {
    match item {
        Item::Struct(item) => Some((&item.ident, &item.attrs)),
        Item::Enum(item) => Some((&item.ident, &item.attrs)),
        Item::Union(item) => Some((&item.ident, &item.attrs)),
        Item::Trait(item) => Some((&item.ident, &item.attrs)),
        _ => None,
    }
}

/// The `#[derive(..)]` attribute that lists `Codable`, if any.
fn codable_derive(attrs: &[Attribute]) -> Option<&Attribute> {
    attrs.iter().find(|attr| {
        attr.path().is_ident("derive")
            && attr
                .parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)
                .map(|paths| {
                    paths
                        .iter()
                        .any(|path| path.segments.last().is_some_and(|s| s.ident == "Codable"))
                })
                .unwrap_or(false)
    })
}
