//! Declaration analysis and code synthesis for `#[derive(Codable)]`.
//!
//! Synthesis runs in two phases. The parse phase turns a `syn` tree into a
//! [`Declaration`]; [`synthesize`] then classifies every field and emits
//! three members for the record:
//!
//! - a `<Type>CodingKeys` enum implementing `codable::CodingKey`,
//! - a `codable::Decodable` impl,
//! - a `codable::Encodable` impl.
//!
//! Each field's type decides how it is decoded:
//!
//! | Field type        | Decoded with                        |
//! |-------------------|-------------------------------------|
//! | `T`               | `decode::<T>`                       |
//! | `Option<T>`       | `decode_if_present::<T>`            |
//! | `Vec<T>`          | `decode::<Vec<T>>`                  |
//! | `Option<Vec<T>>`  | `decode_if_present::<Vec<T>>`       |
//!
//! Any other type is left out of all three members and filled with
//! `Default::default()` on decode, unless the record is marked
//! `#[codable(strict)]`, in which case it is reported.
//!
//! # Example
//!
//! ```rust
//! use codable_synth::{synthesize, Declaration};
//! use syn::parse_quote;
//!
//! let input: syn::DeriveInput = parse_quote! {
//!     struct Person {
//!         name: String,
//!         nickname: Option<String>,
//!     }
//! };
//! let declaration = Declaration::from_derive_input(&input).unwrap();
//! let members = synthesize(&declaration).unwrap();
//! assert_eq!(members.key_registry.names(), ["name", "nickname"]);
//! ```

mod attr;
pub mod classify;
pub mod codegen;
pub mod decode;
pub mod diagnostic;
pub mod encode;
pub mod keys;
pub mod model;

use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::{parse_quote, DeriveInput, Generics};

pub use attr::{ContainerAttrs, FieldAttrs};
pub use classify::{classify, ClassifiedField, FieldShape};
pub use diagnostic::{validate, Diagnostic, DiagnosticKind, Severity};
pub use keys::KeyRegistry;
pub use model::{Declaration, DeclarationKind, FieldDeclaration, TypeExpression};

/// The three members generated for one record.
#[derive(Debug, Clone)]
pub struct GeneratedMembers {
    /// Every field of the record with its shape, in declaration order.
    pub fields: Vec<ClassifiedField>,
    pub key_registry: KeyRegistry,
    /// The coding key enum and its `CodingKey` impl.
    pub coding_keys: TokenStream,
    /// The `Decodable` impl.
    pub decode: TokenStream,
    /// The `Encodable` impl.
    pub encode: TokenStream,
}

impl ToTokens for GeneratedMembers {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(self.coding_keys.clone());
        tokens.extend(self.decode.clone());
        tokens.extend(self.encode.clone());
    }
}

/// Run validation, classification and both synthesizers over a declaration.
///
/// Fails with one diagnostic and generates nothing when the declaration is
/// not a struct with named fields.
pub fn synthesize(declaration: &Declaration) -> Result<GeneratedMembers, Diagnostic> {
    let fields = validate(declaration)?;
    let classified = classify::classify_fields(fields, declaration.attrs.strict)?;
    let key_registry = KeyRegistry::build(&declaration.name, &classified);

    let coding_keys = key_registry.declaration(&declaration.vis, &declaration.attrs.crate_path);
    let decode = decode::derive_decode(declaration, &classified, &key_registry);
    let encode = encode::derive_encode(declaration, &classified, &key_registry);

    tracing::debug!(
        record = %declaration.name,
        fields = classified.len(),
        keys = key_registry.len(),
        "synthesized codable members"
    );

    Ok(GeneratedMembers {
        fields: classified,
        key_registry,
        coding_keys,
        decode,
        encode,
    })
}

/// Entry point for the derive macro: members on success, a
/// `compile_error!` otherwise.
pub fn expand_derive(input: &DeriveInput) -> TokenStream {
    Declaration::from_derive_input(input)
        .and_then(|declaration| synthesize(&declaration))
        .map(|members| members.into_token_stream())
        .unwrap_or_else(|diagnostic| diagnostic.to_compile_error())
}

/// Copy of `generics` where every type parameter also carries `bound`.
pub(crate) fn bounded_generics(generics: &Generics, bound: TokenStream) -> Generics {
    let mut generics = generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(#bound));
    }
    generics
}
