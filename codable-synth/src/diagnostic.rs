//! Validation of the input declaration and the diagnostics the engine emits.

use std::fmt;

use proc_macro2::{Span, TokenStream};
use syn::ext::IdentExt;
use syn::Ident;

use crate::model::{Declaration, DeclarationKind, FieldDeclaration};

/// Message attached to [`DiagnosticKind::UnsupportedDeclarationKind`].
pub const UNSUPPORTED_DECLARATION_MESSAGE: &str =
    "`Codable` can only be applied to a struct with named fields";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// The declaration is not a struct with named fields.
    UnsupportedDeclarationKind,
    /// Strict mode only: a stored field's type has no supported shape.
    UnrecognizedFieldShape,
    /// A `#[codable(...)]` attribute could not be parsed.
    InvalidAttribute,
    /// File codegen only: a selected record inside an inline module.
    NestedDeclaration,
}

impl DiagnosticKind {
    /// Stable identifier, e.g. for tooling that filters diagnostics.
    pub fn id(self) -> &'static str {
        match self {
            DiagnosticKind::UnsupportedDeclarationKind => "codable::unsupported_declaration_kind",
            DiagnosticKind::UnrecognizedFieldShape => "codable::unrecognized_field_shape",
            DiagnosticKind::InvalidAttribute => "codable::invalid_attribute",
            DiagnosticKind::NestedDeclaration => "codable::nested_declaration",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A synthesis-time diagnostic.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn unsupported_declaration(span: Span) -> Self {
        Diagnostic {
            kind: DiagnosticKind::UnsupportedDeclarationKind,
            severity: Severity::Error,
            message: UNSUPPORTED_DECLARATION_MESSAGE.to_string(),
            span,
        }
    }

    pub fn unrecognized_field_shape(field: &Ident) -> Self {
        Diagnostic {
            kind: DiagnosticKind::UnrecognizedFieldShape,
            severity: Severity::Error,
            message: format!(
                "field `{}` must be `T`, `Option<T>`, `Vec<T>` or `Option<Vec<T>>` \
                 for a plain type `T`, or be marked `#[codable(skip)]`",
                field.unraw()
            ),
            span: field.span(),
        }
    }

    /// Non-strict counterpart of [`Diagnostic::unrecognized_field_shape`]:
    /// the field was left out of the generated members.
    pub fn skipped_field(field: &Ident) -> Self {
        Diagnostic {
            kind: DiagnosticKind::UnrecognizedFieldShape,
            severity: Severity::Warning,
            message: format!(
                "field `{}` has no supported shape and is left out of encoding; \
                 it is set to `Default::default()` when decoding",
                field.unraw()
            ),
            span: field.span(),
        }
    }

    /// A record declared inside `mod module { .. }`, which file codegen
    /// does not descend into.
    pub fn nested_declaration(record: &Ident, module: &str) -> Self {
        Diagnostic {
            kind: DiagnosticKind::NestedDeclaration,
            severity: Severity::Warning,
            message: format!(
                "`{}` is declared inside inline module `{}`; nothing was generated for it, \
                 use `#[derive(Codable)]` or move it to its own file",
                record.unraw(),
                module
            ),
            span: record.span(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// 1-based line and column of the diagnostic, when spans carry locations.
    pub fn location(&self) -> (usize, usize) {
        let start = self.span.start();
        (start.line, start.column + 1)
    }

    pub fn to_syn_error(&self) -> syn::Error {
        syn::Error::new(self.span, &self.message)
    }

    /// Render as a `compile_error!` invocation.
    pub fn to_compile_error(&self) -> TokenStream {
        self.to_syn_error().to_compile_error()
    }
}

impl From<syn::Error> for Diagnostic {
    fn from(err: syn::Error) -> Self {
        Diagnostic {
            kind: DiagnosticKind::InvalidAttribute,
            severity: Severity::Error,
            message: err.to_string(),
            span: err.span(),
        }
    }
}

/// Gate in front of synthesis: only records get through.
pub fn validate(declaration: &Declaration) -> Result<&[FieldDeclaration], Diagnostic> {
    match declaration.kind {
        DeclarationKind::Record => Ok(&declaration.fields),
        kind => {
            tracing::debug!(
                record = %declaration.name,
                kind = kind.describe(),
                "rejecting unsupported declaration"
            );
            Err(Diagnostic::unsupported_declaration(declaration.span))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::{parse_quote, DeriveInput};

    fn declaration(input: DeriveInput) -> Declaration {
        Declaration::from_derive_input(&input).unwrap()
    }

    #[test]
    fn test_record_passes() {
        let decl = declaration(parse_quote!(struct A { x: u32, y: String }));
        let fields = validate(&decl).unwrap();
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_empty_record_passes() {
        let decl = declaration(parse_quote!(struct A {}));
        assert!(validate(&decl).unwrap().is_empty());
    }

    #[test]
    fn test_enum_rejected() {
        let decl = declaration(parse_quote!(enum States { Old, Young }));
        let diag = validate(&decl).unwrap_err();
        assert_eq!(diag.kind, DiagnosticKind::UnsupportedDeclarationKind);
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.to_string(), UNSUPPORTED_DECLARATION_MESSAGE);
    }

    #[test]
    fn test_tuple_struct_rejected() {
        let decl = declaration(parse_quote!(struct Meters(f64);));
        let diag = validate(&decl).unwrap_err();
        assert_eq!(diag.kind, DiagnosticKind::UnsupportedDeclarationKind);
    }

    #[test]
    fn test_compile_error_carries_message() {
        let diag = Diagnostic::unsupported_declaration(Span::call_site());
        let rendered = diag.to_compile_error().to_string();
        assert!(rendered.contains("compile_error"));
        assert!(rendered.contains("can only be applied to a struct with named fields"));
    }

    #[test]
    fn test_unrecognized_field_message_unraws() {
        let field: Ident = parse_quote!(r#type);
        let diag = Diagnostic::unrecognized_field_shape(&field);
        assert!(diag.message.starts_with("field `type` must be"));
        assert_eq!(diag.kind.id(), "codable::unrecognized_field_shape");
    }

    #[test]
    fn test_warnings_are_not_errors() {
        let field: Ident = parse_quote!(lookup);
        let diag = Diagnostic::skipped_field(&field);
        assert_eq!(diag.kind, DiagnosticKind::UnrecognizedFieldShape);
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.severity.to_string(), "warning");
        assert!(!diag.is_error());
        assert!(Diagnostic::unrecognized_field_shape(&field).is_error());

        let record: Ident = parse_quote!(Inner);
        let diag = Diagnostic::nested_declaration(&record, "models::v1");
        assert_eq!(diag.kind.id(), "codable::nested_declaration");
        assert!(diag.message.contains("inline module `models::v1`"));
        assert!(!diag.is_error());
    }

    #[test]
    fn test_attribute_errors_convert() {
        let err = syn::Error::new(Span::call_site(), "unknown codable attribute");
        let diag = Diagnostic::from(err);
        assert_eq!(diag.kind, DiagnosticKind::InvalidAttribute);
        assert_eq!(diag.message, "unknown codable attribute");
    }
}
