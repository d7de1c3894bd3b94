//! Derive macro for keyed-container encoding.
//!
//! `#[derive(Codable)]` generates, for a struct with named fields:
//!
//! - `<Type>CodingKeys`, an enum with one variant per field implementing
//!   `codable::CodingKey`,
//! - `impl codable::Decodable`,
//! - `impl codable::Encodable`.
//!
//! The work is done by the `codable-synth` crate; this crate only adapts it
//! to the proc-macro interface.
//!
//! # Example
//!
//! ```rust,ignore
//! use codable::Codable;
//!
//! #[derive(Codable)]
//! struct Person {
//!     name: String,
//!     nickname: Option<String>,
//!     tags: Vec<String>,
//! }
//!
//! let person = Person { name: "Alice".into(), nickname: None, tags: vec![] };
//! let value = codable::to_value(&person).unwrap();
//! let decoded: Person = codable::from_value(&value).unwrap();
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derive macro generating coding keys plus `Encodable` and `Decodable`
/// implementations.
///
/// # Attributes
///
/// - `#[codable(strict)]` - On the struct. Reject fields whose type is not
///   `T`, `Option<T>`, `Vec<T>` or `Option<Vec<T>>` instead of skipping them.
/// - `#[codable(crate = "path")]` - On the struct. Path of the runtime crate,
///   `::codable` by default.
/// - `#[codable(skip)]` - On a field. Never encoded; `Default::default()`
///   when decoding.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Codable)]
/// struct Session {
///     user: String,
///     #[codable(skip)]
///     cache: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Codable, attributes(codable))]
pub fn derive_codable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    codable_synth::expand_derive(&input).into()
}
