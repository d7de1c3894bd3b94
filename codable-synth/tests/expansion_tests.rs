//! Full expansion checks for `synthesize`.

use codable_synth::{
    synthesize, Declaration, DeclarationKind, DiagnosticKind, FieldShape, Severity,
};
use pretty_assertions::assert_eq;
use quote::{quote, ToTokens};
use syn::{parse_quote, DeriveInput, Item};

fn expand(input: DeriveInput) -> String {
    let declaration = Declaration::from_derive_input(&input).unwrap();
    synthesize(&declaration)
        .unwrap()
        .into_token_stream()
        .to_string()
}

#[test]
fn test_expand_all_shapes() {
    let expanded = expand(parse_quote! {
        pub struct Profile {
            name: String,
            nickname: Option<String>,
            tags: Vec<String>,
            id: Option<Vec<String>>,
            lookup: HashMap<String, u32>,
        }
    });

    // `> >` is spelled apart so both closing brackets tokenize alone, the
    // way interpolation produces them.
    let expected = quote! {
        #[doc = " Coding keys generated for `Profile`."]
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum ProfileCodingKeys {
            name,
            nickname,
            tags,
            id
        }

        impl ::codable::CodingKey for ProfileCodingKeys {
            const ALL: &'static [Self] = &[Self::name, Self::nickname, Self::tags, Self::id];

            fn string_value(self) -> &'static str {
                match self {
                    Self::name => "name",
                    Self::nickname => "nickname",
                    Self::tags => "tags",
                    Self::id => "id",
                }
            }
        }

        impl ::codable::Decodable for Profile {
            fn decode(__decoder: &::codable::Decoder<'_>) -> ::core::result::Result<Self, ::codable::DecodeError> {
                let __container = __decoder.container::<ProfileCodingKeys>()?;
                let __field0 = __container.decode::<String>(ProfileCodingKeys::name)?;
                let __field1 = __container.decode_if_present::<String>(ProfileCodingKeys::nickname)?;
                let __field2 = __container.decode::<::std::vec::Vec<String> >(ProfileCodingKeys::tags)?;
                let __field3 = __container.decode_if_present::<::std::vec::Vec<String> >(ProfileCodingKeys::id)?;
                ::core::result::Result::Ok(Self {
                    name: __field0,
                    nickname: __field1,
                    tags: __field2,
                    id: __field3,
                    lookup: ::core::default::Default::default()
                })
            }
        }

        impl ::codable::Encodable for Profile {
            fn encode(&self, __encoder: &mut ::codable::Encoder) -> ::core::result::Result<(), ::codable::EncodeError> {
                let mut __container = __encoder.container::<ProfileCodingKeys>();
                __container.encode(&self.name, ProfileCodingKeys::name)?;
                __container.encode(&self.nickname, ProfileCodingKeys::nickname)?;
                __container.encode(&self.tags, ProfileCodingKeys::tags)?;
                __container.encode(&self.id, ProfileCodingKeys::id)?;
                ::core::result::Result::Ok(())
            }
        }
    };

    assert_eq!(expanded, expected.to_string());
}

#[test]
fn test_expand_empty_record() {
    let expanded = expand(parse_quote! {
        struct Marker {}
    });

    let expected = quote! {
        #[doc = " Coding keys generated for `Marker`."]
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        enum MarkerCodingKeys {}

        impl ::codable::CodingKey for MarkerCodingKeys {
            const ALL: &'static [Self] = &[];

            fn string_value(self) -> &'static str {
                match self {}
            }
        }

        impl ::codable::Decodable for Marker {
            fn decode(__decoder: &::codable::Decoder<'_>) -> ::core::result::Result<Self, ::codable::DecodeError> {
                let __container = __decoder.container::<MarkerCodingKeys>()?;
                ::core::result::Result::Ok(Self {})
            }
        }

        impl ::codable::Encodable for Marker {
            fn encode(&self, __encoder: &mut ::codable::Encoder) -> ::core::result::Result<(), ::codable::EncodeError> {
                let __container = __encoder.container::<MarkerCodingKeys>();
                ::core::result::Result::Ok(())
            }
        }
    };

    assert_eq!(expanded, expected.to_string());
}

#[test]
fn test_skipped_field_is_defaulted() {
    let input: DeriveInput = parse_quote! {
        struct Session {
            user: String,
            #[codable(skip)]
            cache: Vec<u8>,
        }
    };
    let declaration = Declaration::from_derive_input(&input).unwrap();
    let members = synthesize(&declaration).unwrap();

    assert_eq!(members.key_registry.names(), ["user"]);
    assert_eq!(
        members.fields[1].shape,
        FieldShape::Sequence(parse_quote!(u8))
    );
    assert!(!members.fields[1].is_keyed());

    let decode = members.decode.to_string();
    assert!(decode.contains(&quote!(cache: ::core::default::Default::default()).to_string()));
    assert!(!members.encode.to_string().contains("cache"));
}

#[test]
fn test_trait_declaration_rejected() {
    let item: Item = parse_quote! {
        pub trait Shape {
            fn area(&self) -> f64;
        }
    };
    let declaration = Declaration::from_item(&item).unwrap().unwrap();
    assert_eq!(declaration.kind, DeclarationKind::Trait);

    let diagnostic = synthesize(&declaration).unwrap_err();
    assert_eq!(diagnostic.kind, DiagnosticKind::UnsupportedDeclarationKind);
    assert_eq!(diagnostic.severity, Severity::Error);
}

#[test]
fn test_value_type_declarations_rejected() {
    let inputs: Vec<DeriveInput> = vec![
        parse_quote!(struct Meters(f64);),
        parse_quote!(struct Unit;),
        parse_quote!(enum States { Old, Young }),
    ];
    for input in inputs {
        let declaration = Declaration::from_derive_input(&input).unwrap();
        let diagnostic = synthesize(&declaration).unwrap_err();
        assert_eq!(diagnostic.kind, DiagnosticKind::UnsupportedDeclarationKind);
    }
}

#[test]
fn test_field_named_like_generated_locals() {
    let expanded = expand(parse_quote! {
        struct Internal {
            __container: String,
            __decoder: Option<u8>,
        }
    });

    let expected_decode = quote! {
        impl ::codable::Decodable for Internal {
            fn decode(__decoder: &::codable::Decoder<'_>) -> ::core::result::Result<Self, ::codable::DecodeError> {
                let __container = __decoder.container::<InternalCodingKeys>()?;
                let __field0 = __container.decode::<String>(InternalCodingKeys::__container)?;
                let __field1 = __container.decode_if_present::<u8>(InternalCodingKeys::__decoder)?;
                ::core::result::Result::Ok(Self {
                    __container: __field0,
                    __decoder: __field1
                })
            }
        }
    };
    assert!(expanded.contains(&expected_decode.to_string()));
}

#[test]
fn test_strict_record() {
    let input: DeriveInput = parse_quote! {
        #[codable(strict)]
        struct Index {
            name: String,
            lookup: HashMap<String, u32>,
        }
    };
    let declaration = Declaration::from_derive_input(&input).unwrap();
    let diagnostic = synthesize(&declaration).unwrap_err();
    assert_eq!(diagnostic.kind, DiagnosticKind::UnrecognizedFieldShape);
}
