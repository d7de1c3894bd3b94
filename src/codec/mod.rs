//! Keyed containers over [`Value`] trees.
//!
//! [`Encoder`] and [`Decoder`] are the runtime half of `#[derive(Codable)]`:
//! generated code opens a keyed container on them and reads or writes one
//! entry per field.

pub mod decoder;
pub mod encoder;
mod impls;

use std::fmt;

pub use decoder::{Decoder, KeyedDecodingContainer};
pub use encoder::{Encoder, KeyedEncodingContainer};

use crate::coding::{Decodable, Encodable};
use crate::error::{DecodeError, EncodeError};
use crate::value::Value;

/// One step from the root of a value tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    Key(&'static str),
    Index(usize),
}

/// Location of a value inside the tree, carried by every error.
///
/// Displays as `$` for the root, `$.tags[1]` further down.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodingPath(Vec<PathSegment>);

impl CodingPath {
    pub fn root() -> Self {
        CodingPath(Vec::new())
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn appending_key(&self, key: &'static str) -> Self {
        self.appending(PathSegment::Key(key))
    }

    pub fn appending_index(&self, index: usize) -> Self {
        self.appending(PathSegment::Index(index))
    }

    fn appending(&self, segment: PathSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        CodingPath(segments)
    }
}

impl fmt::Display for CodingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// Encode a value into a [`Value`] tree.
pub fn to_value<T: Encodable + ?Sized>(value: &T) -> Result<Value, EncodeError> {
    let mut encoder = Encoder::new();
    value.encode(&mut encoder)?;
    Ok(encoder.into_value())
}

/// Decode a value from a [`Value`] tree.
pub fn from_value<T: Decodable>(value: &Value) -> Result<T, DecodeError> {
    T::decode(&Decoder::new(value))
}
