use std::marker::PhantomData;

use crate::coding::{CodingKey, Decodable};
use crate::error::DecodeError;
use crate::value::Value;

use super::CodingPath;

/// Reads a [`Decodable`] out of a borrowed [`Value`].
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    value: &'a Value,
    path: CodingPath,
}

impl<'a> Decoder<'a> {
    pub fn new(value: &'a Value) -> Self {
        Decoder {
            value,
            path: CodingPath::root(),
        }
    }

    fn at(value: &'a Value, path: CodingPath) -> Self {
        Decoder { value, path }
    }

    /// The value under this decoder.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.path
    }

    /// Open the value as a keyed container.
    pub fn container<K: CodingKey>(&self) -> Result<KeyedDecodingContainer<'a, K>, DecodeError> {
        match self.value {
            Value::Object(entries) => Ok(KeyedDecodingContainer {
                entries,
                path: self.path.clone(),
                _keys: PhantomData,
            }),
            _ => Err(self.mismatch("object")),
        }
    }

    /// Decode every element of an array value.
    pub fn decode_elements<T: Decodable>(&self) -> Result<Vec<T>, DecodeError> {
        let items = self.value.as_array().ok_or_else(|| self.mismatch("array"))?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| T::decode(&Decoder::at(item, self.path.appending_index(index))))
            .collect()
    }

    /// `ValueNotFound` when the value is null, `TypeMismatch` otherwise.
    pub fn mismatch(&self, expected: &'static str) -> DecodeError {
        match self.value {
            Value::Null => DecodeError::ValueNotFound {
                path: self.path.clone(),
                expected,
            },
            actual => DecodeError::TypeMismatch {
                path: self.path.clone(),
                expected,
                actual: actual.type_name(),
            },
        }
    }

    pub fn out_of_range(&self, target: &'static str) -> DecodeError {
        DecodeError::OutOfRange {
            path: self.path.clone(),
            value: self.value.to_string(),
            target,
        }
    }

    /// An error located at this decoder's path.
    pub fn custom(&self, message: impl Into<String>) -> DecodeError {
        DecodeError::Custom {
            path: self.path.clone(),
            message: message.into(),
        }
    }
}

/// Keyed view of an object value.
#[derive(Debug, Clone)]
pub struct KeyedDecodingContainer<'a, K> {
    entries: &'a [(String, Value)],
    path: CodingPath,
    _keys: PhantomData<K>,
}

impl<'a, K: CodingKey> KeyedDecodingContainer<'a, K> {
    fn entry(&self, key: K) -> Option<&'a Value> {
        let name = key.string_value();
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, value)| value)
    }

    fn nested(&self, value: &'a Value, key: K) -> Decoder<'a> {
        Decoder::at(value, self.path.appending_key(key.string_value()))
    }

    pub fn contains(&self, key: K) -> bool {
        self.entry(key).is_some()
    }

    /// Keys of `K` present in the object, in the object's order.
    pub fn all_keys(&self) -> Vec<K> {
        self.entries
            .iter()
            .filter_map(|(k, _)| K::from_string_value(k))
            .collect()
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.path
    }

    /// Decode the value under `key`. A missing key is `KeyNotFound`.
    pub fn decode<T: Decodable>(&self, key: K) -> Result<T, DecodeError> {
        let value = self.entry(key).ok_or_else(|| DecodeError::KeyNotFound {
            key: key.string_value().to_string(),
            path: self.path.clone(),
        })?;
        T::decode(&self.nested(value, key))
    }

    /// Decode the value under `key`, `None` when the key is missing or null.
    pub fn decode_if_present<T: Decodable>(&self, key: K) -> Result<Option<T>, DecodeError> {
        match self.entry(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::decode(&self.nested(value, key)).map(Some),
        }
    }
}
