use std::marker::PhantomData;

use crate::coding::{CodingKey, Encodable};
use crate::error::EncodeError;
use crate::value::Value;

use super::CodingPath;

/// Builds a [`Value`] from an [`Encodable`].
///
/// An encoder holds either a single value or a keyed container. Opening a
/// container discards a single value written before it, and the other way
/// round.
#[derive(Debug, Default)]
pub struct Encoder {
    path: CodingPath,
    single: Option<Value>,
    entries: Option<Vec<(String, Value)>>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    fn at(path: CodingPath) -> Self {
        Encoder {
            path,
            single: None,
            entries: None,
        }
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.path
    }

    /// Open a keyed container. Reopening keeps the entries written so far.
    pub fn container<K: CodingKey>(&mut self) -> KeyedEncodingContainer<'_, K> {
        self.single = None;
        KeyedEncodingContainer {
            entries: self.entries.get_or_insert_with(Vec::new),
            path: &self.path,
            _keys: PhantomData,
        }
    }

    /// Write a single value.
    pub fn encode_value(&mut self, value: Value) {
        self.entries = None;
        self.single = Some(value);
    }

    /// Write an array, one element per item.
    pub fn encode_elements<T: Encodable>(&mut self, items: &[T]) -> Result<(), EncodeError> {
        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let mut element = Encoder::at(self.path.appending_index(index));
            item.encode(&mut element)?;
            values.push(element.into_value());
        }
        self.encode_value(Value::Array(values));
        Ok(())
    }

    /// An error located at this encoder's path.
    pub fn custom(&self, message: impl Into<String>) -> EncodeError {
        EncodeError::Custom {
            path: self.path.clone(),
            message: message.into(),
        }
    }

    /// The encoded tree. An encoder nothing was written to yields `Null`.
    pub fn into_value(self) -> Value {
        match (self.entries, self.single) {
            (Some(entries), _) => Value::Object(entries),
            (None, Some(value)) => value,
            (None, None) => Value::Null,
        }
    }
}

/// Append-only keyed view of an [`Encoder`].
#[derive(Debug)]
pub struct KeyedEncodingContainer<'a, K> {
    entries: &'a mut Vec<(String, Value)>,
    path: &'a CodingPath,
    _keys: PhantomData<K>,
}

impl<K: CodingKey> KeyedEncodingContainer<'_, K> {
    /// Write `value` under `key`. `None` is written as an explicit `Null`.
    pub fn encode<T: Encodable + ?Sized>(&mut self, value: &T, key: K) -> Result<(), EncodeError> {
        let name = key.string_value();
        if self.entries.iter().any(|(k, _)| k == name) {
            return Err(EncodeError::DuplicateKey {
                key: name.to_string(),
                path: self.path.clone(),
            });
        }

        let mut encoder = Encoder::at(self.path.appending_key(name));
        value.encode(&mut encoder)?;
        self.entries.push((name.to_string(), encoder.into_value()));
        Ok(())
    }

    /// Write `value` under `key`, or leave the key out when it is `None`.
    pub fn encode_if_present<T: Encodable + ?Sized>(
        &mut self,
        value: Option<&T>,
        key: K,
    ) -> Result<(), EncodeError> {
        match value {
            Some(value) => self.encode(value, key),
            None => Ok(()),
        }
    }

    pub fn coding_path(&self) -> &CodingPath {
        self.path
    }

    /// Number of entries written so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::PathSegment;

    #[derive(Clone, Copy, Debug)]
    enum Keys {
        Name,
        Nickname,
    }

    impl CodingKey for Keys {
        const ALL: &'static [Self] = &[Keys::Name, Keys::Nickname];

        fn string_value(self) -> &'static str {
            match self {
                Keys::Name => "name",
                Keys::Nickname => "nickname",
            }
        }
    }

    #[test]
    fn test_entries_in_write_order() {
        let mut encoder = Encoder::new();
        let mut container = encoder.container::<Keys>();
        container.encode("Bob", Keys::Nickname).unwrap();
        container.encode("Robert", Keys::Name).unwrap();
        assert_eq!(container.len(), 2);

        let value = encoder.into_value();
        assert_eq!(value.keys(), ["nickname", "name"]);
    }

    #[test]
    fn test_duplicate_key() {
        let mut encoder = Encoder::new();
        let mut container = encoder.container::<Keys>();
        container.encode("a", Keys::Name).unwrap();
        let err = container.encode("b", Keys::Name).unwrap_err();
        assert!(matches!(err, EncodeError::DuplicateKey { ref key, .. } if key == "name"));
        assert_eq!(encoder.into_value().get("name"), Some(&Value::from("a")));
    }

    #[test]
    fn test_none_is_explicit_null() {
        let mut encoder = Encoder::new();
        let mut container = encoder.container::<Keys>();
        container.encode(&None::<String>, Keys::Nickname).unwrap();
        assert_eq!(encoder.into_value().get("nickname"), Some(&Value::Null));
    }

    #[test]
    fn test_encode_if_present_skips_none() {
        let mut encoder = Encoder::new();
        let mut container = encoder.container::<Keys>();
        container.encode_if_present(None::<&str>, Keys::Nickname).unwrap();
        container.encode_if_present(Some("Al"), Keys::Name).unwrap();
        assert_eq!(encoder.into_value().keys(), ["name"]);
    }

    #[test]
    fn test_empty_container_is_empty_object() {
        let mut encoder = Encoder::new();
        assert!(encoder.container::<Keys>().is_empty());
        assert_eq!(encoder.into_value(), Value::new_object());
        assert_eq!(Encoder::new().into_value(), Value::Null);
    }

    #[test]
    fn test_nested_path() {
        let mut encoder = Encoder::new();
        let mut container = encoder.container::<Keys>();
        let err = container.encode(&vec![1u64, u64::MAX], Keys::Name).unwrap_err();
        match err {
            EncodeError::OutOfRange { path, .. } => {
                assert_eq!(
                    path.segments(),
                    [PathSegment::Key("name"), PathSegment::Index(1)]
                );
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
