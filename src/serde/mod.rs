//! Serde integration.
//!
//! [`Value`](crate::Value) implements `Serialize` and `Deserialize`, so a tree
//! can go through any serde data format. [`Compat`] lifts that to every
//! [`Encodable`]/[`Decodable`] type.
//!
//! # Example
//!
//! ```rust,ignore
//! use codable::serde::Compat;
//! use codable::Codable;
//!
//! #[derive(Codable, Debug, PartialEq)]
//! struct Person {
//!     name: String,
//!     nickname: Option<String>,
//! }
//!
//! let person = Person { name: "Alice".into(), nickname: None };
//! let json = serde_json::to_string(&Compat(&person)).unwrap();
//! assert_eq!(json, r#"{"name":"Alice","nickname":null}"#);
//!
//! let Compat(decoded) = serde_json::from_str::<Compat<Person>>(&json).unwrap();
//! assert_eq!(person, decoded);
//! ```

mod de;
mod ser;

use ::serde::{de::Error as _, ser::Error as _, Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{from_value, to_value};
use crate::coding::{Decodable, Encodable};
use crate::value::Value;

/// Adapter that serializes through [`Encodable`] and deserializes through
/// [`Decodable`], with a [`Value`] tree in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Compat<T>(pub T);

impl<T> Compat<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Encodable> Serialize for Compat<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        to_value(&self.0)
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de, T: Decodable> Deserialize<'de> for Compat<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        from_value(&value).map(Compat).map_err(D::Error::custom)
    }
}
