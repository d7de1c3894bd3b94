//! The key registry: one coding key per keyed field.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Ident, Path, Visibility};

use crate::classify::ClassifiedField;

/// Ordered, duplicate-free field keys, and the enum they are emitted as.
#[derive(Debug, Clone)]
pub struct KeyRegistry {
    record: String,
    ident: Ident,
    keys: Vec<Ident>,
}

impl KeyRegistry {
    /// Collect the keyed fields of `type_name` in declaration order.
    ///
    /// Field names are unique already (the compiler rejects duplicates), so
    /// nothing is re-checked here.
    pub fn build(type_name: &Ident, fields: &[ClassifiedField]) -> Self {
        KeyRegistry {
            record: type_name.unraw().to_string(),
            ident: format_ident!("{}CodingKeys", type_name),
            keys: fields
                .iter()
                .filter(|f| f.is_keyed())
                .map(|f| f.name.clone())
                .collect(),
        }
    }

    /// Name of the generated enum, `<Type>CodingKeys`.
    pub fn ident(&self) -> &Ident {
        &self.ident
    }

    pub fn keys(&self) -> &[Ident] {
        &self.keys
    }

    /// String value of every key, in order.
    pub fn names(&self) -> Vec<String> {
        self.keys.iter().map(|k| k.unraw().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// `<Type>CodingKeys::field`
    pub fn key_path(&self, field: &Ident) -> TokenStream {
        let ident = &self.ident;
        quote!(#ident::#field)
    }

    /// The enum declaration and its `CodingKey` impl.
    pub fn declaration(&self, vis: &Visibility, runtime: &Path) -> TokenStream {
        let ident = &self.ident;
        let keys = &self.keys;
        let names = self.names();
        let doc = format!(" Coding keys generated for `{}`.", self.record);

        quote! {
            #[doc = #doc]
            #[allow(non_camel_case_types)]
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
            #vis enum #ident {
                #(#keys),*
            }

            impl #runtime::CodingKey for #ident {
                const ALL: &'static [Self] = &[#(Self::#keys),*];

                fn string_value(self) -> &'static str {
                    match self {
                        #(Self::#keys => #names,)*
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::FieldShape;
    use proc_macro2::Span;
    use syn::parse_quote;

    fn field(name: &str, shape: FieldShape) -> ClassifiedField {
        ClassifiedField {
            name: Ident::new(name, Span::call_site()),
            shape,
            is_stored_property: true,
        }
    }

    #[test]
    fn test_registry_follows_declaration_order() {
        let fields = vec![
            field("name", FieldShape::Scalar(parse_quote!(String))),
            field("nickname", FieldShape::OptionalScalar(parse_quote!(String))),
            field("lookup", FieldShape::Unrecognized),
            field("tags", FieldShape::Sequence(parse_quote!(String))),
            field("id", FieldShape::OptionalSequence(parse_quote!(String))),
        ];
        let registry = KeyRegistry::build(&parse_quote!(Person), &fields);

        assert_eq!(registry.ident(), "PersonCodingKeys");
        assert_eq!(registry.names(), ["name", "nickname", "tags", "id"]);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_raw_identifiers_keep_plain_names() {
        let fields = vec![ClassifiedField {
            name: Ident::new_raw("type", Span::call_site()),
            shape: FieldShape::Scalar(parse_quote!(u8)),
            is_stored_property: true,
        }];
        let registry = KeyRegistry::build(&parse_quote!(Token), &fields);
        assert_eq!(registry.names(), ["type"]);
        assert_eq!(registry.keys()[0].to_string(), "r#type");
    }

    #[test]
    fn test_declaration_tokens() {
        let fields = vec![
            field("name", FieldShape::Scalar(parse_quote!(String))),
            field("age", FieldShape::Scalar(parse_quote!(u32))),
        ];
        let registry = KeyRegistry::build(&parse_quote!(Person), &fields);
        let vis: Visibility = parse_quote!(pub);
        let runtime: Path = parse_quote!(::codable);

        let expected = quote! {
            #[doc = " Coding keys generated for `Person`."]
            #[allow(non_camel_case_types)]
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
            pub enum PersonCodingKeys {
                name,
                age
            }

            impl ::codable::CodingKey for PersonCodingKeys {
                const ALL: &'static [Self] = &[Self::name, Self::age];

                fn string_value(self) -> &'static str {
                    match self {
                        Self::name => "name",
                        Self::age => "age",
                    }
                }
            }
        };
        assert_eq!(
            registry.declaration(&vis, &runtime).to_string(),
            expected.to_string()
        );
    }

    #[test]
    fn test_empty_registry() {
        let registry = KeyRegistry::build(&parse_quote!(Empty), &[]);
        assert!(registry.is_empty());
        let tokens = registry.declaration(&Visibility::Inherited, &parse_quote!(::codable));
        let file: syn::File = syn::parse2(tokens).unwrap();
        match &file.items[0] {
            syn::Item::Enum(item) => {
                assert_eq!(item.ident, "EmptyCodingKeys");
                assert!(item.variants.is_empty());
            }
            other => panic!("expected enum, got {:?}", other),
        }
    }
}
