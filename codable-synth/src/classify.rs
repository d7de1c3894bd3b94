//! Field shape classification.

use syn::{Ident, Path};

use crate::diagnostic::Diagnostic;
use crate::model::{FieldDeclaration, TypeExpression};

/// How a field is decoded. `T` is always a plain path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldShape {
    /// `T`
    Scalar(Path),
    /// `Option<T>`
    OptionalScalar(Path),
    /// `Vec<T>`
    Sequence(Path),
    /// `Option<Vec<T>>`
    OptionalSequence(Path),
    /// Everything else. Left out of the generated members.
    Unrecognized,
}

impl FieldShape {
    pub fn is_recognized(&self) -> bool {
        !matches!(self, FieldShape::Unrecognized)
    }

    pub fn is_optional(&self) -> bool {
        matches!(
            self,
            FieldShape::OptionalScalar(_) | FieldShape::OptionalSequence(_)
        )
    }

    pub fn element_type(&self) -> Option<&Path> {
        match self {
            FieldShape::Scalar(t)
            | FieldShape::OptionalScalar(t)
            | FieldShape::Sequence(t)
            | FieldShape::OptionalSequence(t) => Some(t),
            FieldShape::Unrecognized => None,
        }
    }
}

/// Map a type expression to its shape. Total: every input lands on exactly
/// one shape.
pub fn classify(expr: &TypeExpression) -> FieldShape {
    match expr {
        TypeExpression::Named(t) => FieldShape::Scalar(t.clone()),
        TypeExpression::Optional(inner) => match inner.as_ref() {
            TypeExpression::Named(t) => FieldShape::OptionalScalar(t.clone()),
            TypeExpression::Sequence(element) => match element.as_ref() {
                TypeExpression::Named(t) => FieldShape::OptionalSequence(t.clone()),
                _ => FieldShape::Unrecognized,
            },
            _ => FieldShape::Unrecognized,
        },
        TypeExpression::Sequence(inner) => match inner.as_ref() {
            TypeExpression::Named(t) => FieldShape::Sequence(t.clone()),
            _ => FieldShape::Unrecognized,
        },
        TypeExpression::Other(_) => FieldShape::Unrecognized,
    }
}

/// A field together with its computed shape.
#[derive(Debug, Clone)]
pub struct ClassifiedField {
    pub name: Ident,
    pub shape: FieldShape,
    pub is_stored_property: bool,
}

impl ClassifiedField {
    /// Whether the field gets a key and a statement in both procedures.
    pub fn is_keyed(&self) -> bool {
        self.is_stored_property && self.shape.is_recognized()
    }
}

/// Classify every field in declaration order.
///
/// With `strict` set, the first stored field without a recognized shape is
/// reported instead of being skipped.
pub fn classify_fields(
    fields: &[FieldDeclaration],
    strict: bool,
) -> Result<Vec<ClassifiedField>, Diagnostic> {
    let mut classified = Vec::with_capacity(fields.len());

    for field in fields {
        let shape = classify(&field.declared_type);
        tracing::debug!(field = %field.name, shape = ?shape, "classified field");

        if field.is_stored_property && !shape.is_recognized() {
            if strict {
                return Err(Diagnostic::unrecognized_field_shape(&field.name));
            }
            tracing::warn!(
                field = %field.name,
                "field type has no supported shape, leaving it out of encoding"
            );
        }

        classified.push(ClassifiedField {
            name: field.name.clone(),
            shape,
            is_stored_property: field.is_stored_property,
        });
    }

    Ok(classified)
}
