//! `Encodable` and `Decodable` for std types.

use crate::coding::{Decodable, Encodable};
use crate::error::{DecodeError, EncodeError};
use crate::value::Value;

use super::{Decoder, Encoder};

impl Encodable for bool {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        encoder.encode_value(Value::Bool(*self));
        Ok(())
    }
}

impl Decodable for bool {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        decoder
            .value()
            .as_bool()
            .ok_or_else(|| decoder.mismatch("boolean"))
    }
}

// Integers are stored as i64; anything that does not fit is out of range in
// either direction.
macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Encodable for $ty {
                fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
                    let value = i64::try_from(*self).map_err(|_| EncodeError::OutOfRange {
                        path: encoder.coding_path().clone(),
                        value: self.to_string(),
                        target: "i64",
                    })?;
                    encoder.encode_value(Value::Integer(value));
                    Ok(())
                }
            }

            impl Decodable for $ty {
                fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
                    let value = decoder
                        .value()
                        .as_integer()
                        .ok_or_else(|| decoder.mismatch("integer"))?;
                    <$ty>::try_from(value).map_err(|_| decoder.out_of_range(stringify!($ty)))
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Encodable for f64 {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        encoder.encode_value(Value::Double(*self));
        Ok(())
    }
}

impl Decodable for f64 {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        match decoder.value() {
            Value::Double(v) => Ok(*v),
            Value::Integer(v) => Ok(*v as f64),
            _ => Err(decoder.mismatch("double")),
        }
    }
}

impl Encodable for f32 {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        encoder.encode_value(Value::Double(f64::from(*self)));
        Ok(())
    }
}

impl Decodable for f32 {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        f64::decode(decoder).map(|v| v as f32)
    }
}

impl Encodable for str {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        encoder.encode_value(Value::Str(self.to_string()));
        Ok(())
    }
}

impl Encodable for String {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        self.as_str().encode(encoder)
    }
}

impl Decodable for String {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        decoder
            .value()
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| decoder.mismatch("string"))
    }
}

impl Encodable for char {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        encoder.encode_value(Value::Str(self.to_string()));
        Ok(())
    }
}

impl Decodable for char {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        let s = decoder
            .value()
            .as_str()
            .ok_or_else(|| decoder.mismatch("string"))?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(decoder.custom(format!("expected a single character, got {:?}", s))),
        }
    }
}

impl<T: Encodable> Encodable for Option<T> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        match self {
            Some(value) => value.encode(encoder),
            None => {
                encoder.encode_value(Value::Null);
                Ok(())
            }
        }
    }
}

impl<T: Decodable> Decodable for Option<T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        if decoder.value().is_null() {
            return Ok(None);
        }
        T::decode(decoder).map(Some)
    }
}

impl<T: Encodable> Encodable for [T] {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        encoder.encode_elements(self)
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        encoder.encode_elements(self)
    }
}

impl<T: Decodable> Decodable for Vec<T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        decoder.decode_elements()
    }
}

impl<T: Encodable + ?Sized> Encodable for Box<T> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        (**self).encode(encoder)
    }
}

impl<T: Decodable> Decodable for Box<T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        T::decode(decoder).map(Box::new)
    }
}

impl<T: Encodable + ?Sized> Encodable for &T {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        (**self).encode(encoder)
    }
}

impl Encodable for Value {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        encoder.encode_value(self.clone());
        Ok(())
    }
}

impl Decodable for Value {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(decoder.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::codec::{from_value, to_value};
    use crate::error::{DecodeError, EncodeError};
    use crate::value::Value;

    #[test]
    fn test_integer_range() {
        assert_eq!(to_value(&200u8).unwrap(), Value::Integer(200));
        assert_eq!(from_value::<u8>(&Value::Integer(255)).unwrap(), 255);

        let err = from_value::<u8>(&Value::Integer(256)).unwrap_err();
        assert!(matches!(err, DecodeError::OutOfRange { target: "u8", .. }));
        let err = from_value::<u32>(&Value::Integer(-1)).unwrap_err();
        assert!(matches!(err, DecodeError::OutOfRange { target: "u32", .. }));

        let err = to_value(&u64::MAX).unwrap_err();
        assert!(matches!(err, EncodeError::OutOfRange { .. }));
    }

    #[test]
    fn test_doubles_accept_integers() {
        assert_eq!(from_value::<f64>(&Value::Integer(3)).unwrap(), 3.0);
        assert_eq!(from_value::<f32>(&Value::Double(0.5)).unwrap(), 0.5);
        assert_eq!(to_value(&1.5f32).unwrap(), Value::Double(1.5));
        assert!(from_value::<i64>(&Value::Double(1.0)).is_err());
    }

    #[test]
    fn test_char() {
        assert_eq!(to_value(&'x').unwrap(), Value::from("x"));
        assert_eq!(from_value::<char>(&Value::from("é")).unwrap(), 'é');
        let err = from_value::<char>(&Value::from("ab")).unwrap_err();
        assert!(matches!(err, DecodeError::Custom { .. }));
    }

    #[test]
    fn test_option_and_null() {
        assert_eq!(to_value(&None::<i32>).unwrap(), Value::Null);
        assert_eq!(to_value(&Some(4i32)).unwrap(), Value::Integer(4));
        assert_eq!(from_value::<Option<i32>>(&Value::Null).unwrap(), None);

        let err = from_value::<i32>(&Value::Null).unwrap_err();
        assert!(matches!(err, DecodeError::ValueNotFound { expected: "integer", .. }));
    }

    #[test]
    fn test_sequences() {
        let value = to_value(&vec!["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(value, Value::Array(vec!["a".into(), "b".into()]));
        let back: Vec<String> = from_value(&value).unwrap();
        assert_eq!(back, ["a", "b"]);

        let slice: &[i64] = &[1, 2];
        assert_eq!(to_value(slice).unwrap(), Value::Array(vec![1i64.into(), 2i64.into()]));
        assert_eq!(from_value::<Vec<i64>>(&Value::Array(vec![])).unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn test_box_and_value_passthrough() {
        let boxed: Box<str> = "boxed".into();
        assert_eq!(to_value(&boxed).unwrap(), Value::from("boxed"));
        assert_eq!(from_value::<Box<bool>>(&Value::Bool(true)).unwrap(), Box::new(true));

        let tree = Value::from_fields(vec![("k", Value::Null)]);
        assert_eq!(to_value(&tree).unwrap(), tree);
        assert_eq!(from_value::<Value>(&tree).unwrap(), tree);
    }
}
