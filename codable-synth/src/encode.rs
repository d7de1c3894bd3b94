//! Code generation for the `Encodable` impl.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::classify::ClassifiedField;
use crate::keys::KeyRegistry;
use crate::model::Declaration;

/// `container.encode(&self.field, Keys::field)?;`
///
/// The shape does not matter here: `Option` and `Vec` encode themselves,
/// `None` as an explicit null.
pub fn encode_statement(
    field: &ClassifiedField,
    keys: &KeyRegistry,
    container: &syn::Ident,
) -> Option<TokenStream> {
    if !field.is_keyed() {
        return None;
    }
    let name = &field.name;
    let key = keys.key_path(name);

    Some(quote! {
        #container.encode(&self.#name, #key)?;
    })
}

/// Generate the `Encodable` implementation for a record.
pub fn derive_encode(
    declaration: &Declaration,
    fields: &[ClassifiedField],
    keys: &KeyRegistry,
) -> TokenStream {
    let name = &declaration.name;
    let runtime = &declaration.attrs.crate_path;
    let key_enum = keys.ident();
    let encoder = format_ident!("__encoder");
    let container = format_ident!("__container");

    let statements: Vec<_> = fields
        .iter()
        .filter_map(|field| encode_statement(field, keys, &container))
        .collect();
    let mutability = if statements.is_empty() {
        None
    } else {
        Some(quote!(mut))
    };

    let generics = crate::bounded_generics(&declaration.generics, quote!(#runtime::Encodable));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics #runtime::Encodable for #name #ty_generics #where_clause {
            fn encode(&self, #encoder: &mut #runtime::Encoder) -> ::core::result::Result<(), #runtime::EncodeError> {
                let #mutability #container = #encoder.container::<#key_enum>();
                #(#statements)*
                ::core::result::Result::Ok(())
            }
        }
    }
}
