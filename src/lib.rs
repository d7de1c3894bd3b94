//! Codable: keyed-container encoding for Rust records.
//!
//! `#[derive(Codable)]` on a struct with named fields generates a coding key
//! enum and impls of [`Encodable`] and [`Decodable`]. The generated code
//! writes each field into a keyed container under its own name, and reads
//! it back according to the field's shape: `T` and `Vec<T>` are required,
//! `Option<T>` and `Option<Vec<T>>` may be missing or null.
//!
//! # Quick Start
//!
//! ```rust
//! use codable::{Codable, Value};
//!
//! #[derive(Codable, Debug, PartialEq)]
//! struct Person {
//!     name: String,
//!     nickname: Option<String>,
//!     tags: Vec<String>,
//! }
//!
//! let person = Person {
//!     name: "Alice".into(),
//!     nickname: None,
//!     tags: vec!["admin".into()],
//! };
//!
//! let value = codable::to_value(&person).unwrap();
//! assert_eq!(value.keys(), ["name", "nickname", "tags"]);
//! assert_eq!(value.get("nickname"), Some(&Value::Null));
//!
//! let decoded: Person = codable::from_value(&value).unwrap();
//! assert_eq!(person, decoded);
//! ```

pub mod codec;
pub mod coding;
pub mod error;
pub mod value;

#[cfg(feature = "serde")]
pub mod serde;

pub use codec::{
    from_value, to_value, CodingPath, Decoder, Encoder, KeyedDecodingContainer,
    KeyedEncodingContainer, PathSegment,
};
pub use coding::{Codable, CodingKey, Decodable, Encodable};
pub use error::{CodableError, DecodeError, EncodeError};
pub use value::Value;

// Re-export the derive macro when the feature is enabled
#[cfg(feature = "derive")]
pub use codable_derive::Codable;
