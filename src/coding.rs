//! Traits the derive macro implements and the containers call into.
//!
//! `#[derive(Codable)]` on a struct with named fields generates a
//! `<Type>CodingKeys` enum implementing [`CodingKey`], plus impls of
//! [`Decodable`] and [`Encodable`] that go through keyed containers.

use std::fmt;

use crate::codec::{Decoder, Encoder};
use crate::error::{DecodeError, EncodeError};

/// A closed set of keys, one per field of a record.
///
/// Generated key enums list their variants in field declaration order, and
/// [`CodingKey::ALL`] follows that order.
///
/// # Example
///
/// ```rust
/// use codable::CodingKey;
///
/// #[derive(Clone, Copy, Debug)]
/// enum Keys {
///     Name,
///     Tags,
/// }
///
/// impl CodingKey for Keys {
///     const ALL: &'static [Self] = &[Keys::Name, Keys::Tags];
///
///     fn string_value(self) -> &'static str {
///         match self {
///             Keys::Name => "name",
///             Keys::Tags => "tags",
///         }
///     }
/// }
///
/// assert!(matches!(Keys::from_string_value("tags"), Some(Keys::Tags)));
/// assert!(Keys::from_string_value("age").is_none());
/// ```
pub trait CodingKey: Copy + fmt::Debug + 'static {
    /// Every key, in declaration order.
    const ALL: &'static [Self];

    /// The name written into keyed containers.
    fn string_value(self) -> &'static str;

    /// Look a key up by its written name.
    fn from_string_value(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.string_value() == value)
    }
}

/// Trait for types that can write themselves into an [`Encoder`].
///
/// This trait is typically derived using `#[derive(Codable)]`.
///
/// # Example
///
/// ```rust,ignore
/// use codable::Codable;
///
/// #[derive(Codable)]
/// struct Person {
///     name: String,
///     nickname: Option<String>,
/// }
///
/// let person = Person { name: "Alice".into(), nickname: None };
/// let value = codable::to_value(&person).unwrap();
/// ```
pub trait Encodable {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError>;
}

/// Trait for types that can be rebuilt from a [`Decoder`].
///
/// This trait is typically derived using `#[derive(Codable)]`.
///
/// # Example
///
/// ```rust,ignore
/// use codable::Codable;
///
/// #[derive(Codable)]
/// struct Person {
///     name: String,
///     nickname: Option<String>,
/// }
///
/// let value = /* ... */;
/// let person: Person = codable::from_value(&value).unwrap();
/// ```
pub trait Decodable: Sized {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError>;
}

/// Both directions at once.
pub trait Codable: Encodable + Decodable {}

impl<T: Encodable + Decodable> Codable for T {}
