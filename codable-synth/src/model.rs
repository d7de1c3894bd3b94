//! The declaration model the synthesizers work on, and the parse phase that
//! builds it from `syn` trees.

use proc_macro2::Span;
use syn::{
    Data, DeriveInput, Fields, FieldsNamed, GenericArgument, Generics, Ident, Item, Path,
    PathArguments, Type, Visibility,
};

use crate::attr::{ContainerAttrs, FieldAttrs};
use crate::diagnostic::Diagnostic;

/// What sort of type declaration was handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// `struct Foo { .. }`, the only supported kind.
    Record,
    TupleStruct,
    UnitStruct,
    Enum,
    Union,
    Trait,
}

impl DeclarationKind {
    pub fn describe(self) -> &'static str {
        match self {
            DeclarationKind::Record => "struct with named fields",
            DeclarationKind::TupleStruct => "tuple struct",
            DeclarationKind::UnitStruct => "unit struct",
            DeclarationKind::Enum => "enum",
            DeclarationKind::Union => "union",
            DeclarationKind::Trait => "trait",
        }
    }
}

/// A type declaration, already parsed.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub name: Ident,
    pub kind: DeclarationKind,
    pub vis: Visibility,
    pub generics: Generics,
    pub attrs: ContainerAttrs,
    /// Fields in declaration order. Empty for every kind but `Record`.
    pub fields: Vec<FieldDeclaration>,
    /// Where diagnostics about the declaration point to.
    pub span: Span,
}

/// One named field of a record.
#[derive(Debug, Clone)]
pub struct FieldDeclaration {
    pub name: Ident,
    pub declared_type: TypeExpression,
    /// `false` for fields marked `#[codable(skip)]`.
    pub is_stored_property: bool,
}

/// The part of a field's type the classifier looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpression {
    /// A plain path without generic arguments: `String`, `u32`, `my::Id`, `T`.
    Named(Path),
    /// `Option<_>`
    Optional(Box<TypeExpression>),
    /// `Vec<_>`
    Sequence(Box<TypeExpression>),
    /// Anything else: maps, references, tuples, arrays, `Box<T>`, ...
    Other(Type),
}

const OPTION_MODULES: &[&[&str]] = &[&["std", "option"], &["core", "option"]];
const VEC_MODULES: &[&[&str]] = &[&["std", "vec"], &["alloc", "vec"]];

impl TypeExpression {
    /// Build the expression tree for a `syn` type.
    pub fn from_type(ty: &Type) -> Self {
        match ty {
            Type::Paren(inner) => Self::from_type(&inner.elem),
            Type::Group(inner) => Self::from_type(&inner.elem),
            Type::Path(type_path) if type_path.qself.is_none() => {
                let path = &type_path.path;
                if let Some(inner) = wrapped_type(path, "Option", OPTION_MODULES) {
                    TypeExpression::Optional(Box::new(Self::from_type(inner)))
                } else if let Some(inner) = wrapped_type(path, "Vec", VEC_MODULES) {
                    TypeExpression::Sequence(Box::new(Self::from_type(inner)))
                } else if path.segments.iter().all(|s| s.arguments.is_none()) {
                    TypeExpression::Named(path.clone())
                } else {
                    TypeExpression::Other(ty.clone())
                }
            }
            _ => TypeExpression::Other(ty.clone()),
        }
    }
}

/// If `path` is `Name<T>` (optionally spelled through one of `modules`),
/// return `T`.
fn wrapped_type<'a>(path: &'a Path, name: &str, modules: &[&[&str]]) -> Option<&'a Type> {
    let segments: Vec<_> = path.segments.iter().collect();
    let (last, prefix) = segments.split_last()?;
    if last.ident != name {
        return None;
    }

    let bare = prefix.is_empty() && path.leading_colon.is_none();
    let qualified = modules.iter().any(|module| {
        module.len() == prefix.len()
            && prefix
                .iter()
                .zip(module.iter())
                .all(|(segment, expected)| segment.ident == *expected && segment.arguments.is_none())
    });
    if !bare && !qualified {
        return None;
    }

    let PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    match args.args.iter().collect::<Vec<_>>().as_slice() {
        [GenericArgument::Type(inner)] => Some(inner),
        _ => None,
    }
}

impl Declaration {
    /// Parse phase for derive input.
    ///
    /// Attributes are only read for records; other kinds are reported by
    /// validation with a single diagnostic.
    pub fn from_derive_input(input: &DeriveInput) -> Result<Self, Diagnostic> {
        let kind = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(_) => DeclarationKind::Record,
                Fields::Unnamed(_) => DeclarationKind::TupleStruct,
                Fields::Unit => DeclarationKind::UnitStruct,
            },
            Data::Enum(_) => DeclarationKind::Enum,
            Data::Union(_) => DeclarationKind::Union,
        };

        let mut declaration = Declaration {
            name: input.ident.clone(),
            kind,
            vis: input.vis.clone(),
            generics: input.generics.clone(),
            attrs: ContainerAttrs::default(),
            fields: Vec::new(),
            span: input.ident.span(),
        };

        if let Data::Struct(data) = &input.data {
            if let Fields::Named(named) = &data.fields {
                declaration.attrs = ContainerAttrs::from_attrs(&input.attrs)?;
                declaration.fields = collect_fields(named)?;
            }
        }

        Ok(declaration)
    }

    /// Parse phase for a source-file item. Returns `None` for items that are
    /// not type declarations at all (functions, impls, uses, ...).
    pub fn from_item(item: &Item) -> Option<Result<Self, Diagnostic>> {
        match item {
            Item::Struct(item) => Some(Self::from_derive_input(&DeriveInput::from(item.clone()))),
            Item::Enum(item) => Some(Self::from_derive_input(&DeriveInput::from(item.clone()))),
            Item::Union(item) => Some(Self::from_derive_input(&DeriveInput::from(item.clone()))),
            Item::Trait(item) => Some(Ok(Declaration {
                name: item.ident.clone(),
                kind: DeclarationKind::Trait,
                vis: item.vis.clone(),
                generics: item.generics.clone(),
                attrs: ContainerAttrs::default(),
                fields: Vec::new(),
                span: item.ident.span(),
            })),
            _ => None,
        }
    }
}

fn collect_fields(fields: &FieldsNamed) -> Result<Vec<FieldDeclaration>, Diagnostic> {
    let mut result = Vec::with_capacity(fields.named.len());
    for field in &fields.named {
        let name = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
        let attrs = FieldAttrs::from_attrs(&field.attrs)?;

        result.push(FieldDeclaration {
            name,
            declared_type: TypeExpression::from_type(&field.ty),
            is_stored_property: !attrs.skip,
        });
    }
    Ok(result)
}
