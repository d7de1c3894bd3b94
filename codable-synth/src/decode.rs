//! Code generation for the `Decodable` impl.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Ident;

use crate::classify::{ClassifiedField, FieldShape};
use crate::keys::KeyRegistry;
use crate::model::Declaration;

/// Which container operation a field is read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeRule {
    /// `decode`: a missing key or a malformed value is an error.
    Required,
    /// `decode_if_present`: a missing key yields `None`.
    IfPresent,
}

/// The rule and the decoded type for a shape. `None` for unrecognized
/// fields, which get no statement.
///
/// A required sequence has no fallback to an empty `Vec`: a missing key
/// fails like any other required value.
pub fn decode_rule(shape: &FieldShape) -> Option<(DecodeRule, TokenStream)> {
    match shape {
        FieldShape::Scalar(t) => Some((DecodeRule::Required, quote!(#t))),
        FieldShape::OptionalScalar(t) => Some((DecodeRule::IfPresent, quote!(#t))),
        FieldShape::Sequence(t) => Some((DecodeRule::Required, quote!(::std::vec::Vec<#t>))),
        FieldShape::OptionalSequence(t) => {
            Some((DecodeRule::IfPresent, quote!(::std::vec::Vec<#t>)))
        }
        FieldShape::Unrecognized => None,
    }
}

/// Local holding the decoded value of the field at `index`. Never the
/// field's own name, which may shadow `__container` or name a constant.
pub fn field_binding(index: usize) -> Ident {
    format_ident!("__field{}", index)
}

/// `let binding = container.decode::<T>(Keys::field)?;` or the
/// `decode_if_present` form.
pub fn decode_statement(
    field: &ClassifiedField,
    binding: &Ident,
    keys: &KeyRegistry,
    container: &Ident,
) -> Option<TokenStream> {
    if !field.is_keyed() {
        return None;
    }
    let (rule, ty) = decode_rule(&field.shape)?;
    let key = keys.key_path(&field.name);

    Some(match rule {
        DecodeRule::Required => quote! {
            let #binding = #container.decode::<#ty>(#key)?;
        },
        DecodeRule::IfPresent => quote! {
            let #binding = #container.decode_if_present::<#ty>(#key)?;
        },
    })
}

/// Generate the `Decodable` implementation for a record.
pub fn derive_decode(
    declaration: &Declaration,
    fields: &[ClassifiedField],
    keys: &KeyRegistry,
) -> TokenStream {
    let name = &declaration.name;
    let runtime = &declaration.attrs.crate_path;
    let key_enum = keys.ident();
    let decoder = format_ident!("__decoder");
    let container = format_ident!("__container");

    let statements = fields.iter().enumerate().filter_map(|(index, field)| {
        decode_statement(field, &field_binding(index), keys, &container)
    });

    // Fields left out of the registry still need a value.
    let initializers = fields.iter().enumerate().map(|(index, field)| {
        let ident = &field.name;
        if field.is_keyed() {
            let binding = field_binding(index);
            quote!(#ident: #binding)
        } else {
            quote!(#ident: ::core::default::Default::default())
        }
    });

    let generics = crate::bounded_generics(&declaration.generics, quote!(#runtime::Decodable));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics #runtime::Decodable for #name #ty_generics #where_clause {
            fn decode(#decoder: &#runtime::Decoder<'_>) -> ::core::result::Result<Self, #runtime::DecodeError> {
                let #container = #decoder.container::<#key_enum>()?;
                #(#statements)*
                ::core::result::Result::Ok(Self {
                    #(#initializers),*
                })
            }
        }
    }
}
