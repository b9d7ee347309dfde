//! Conversions from returned values into field types
//!
//! No lossy coercion: integers must fit the target width, NULL only
//! converts into `Option`. Text and bytes convert into each other
//! because drivers commonly hand strings back as raw bytes.

use chrono::{DateTime, Utc};

use crate::errors::{OrmError, OrmResult};

use super::{FieldType, Value};

/// A Rust type that a record field may have
pub trait FromValue: Sized + 'static {
    /// Semantic type recorded in the model
    fn field_type() -> FieldType;

    /// Convert a returned value into this type
    fn from_value(value: Value) -> OrmResult<Self>;
}

fn mismatch<T: FromValue>(value: &Value) -> OrmError {
    OrmError::type_mismatch(T::field_type(), format!("{} value {}", value.kind(), value))
}

macro_rules! from_value_int {
    ($($ty:ty => $ft:ident),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn field_type() -> FieldType {
                    FieldType::$ft
                }

                fn from_value(value: Value) -> OrmResult<Self> {
                    match value {
                        Value::Int(i) => <$ty>::try_from(i).map_err(|_| mismatch::<$ty>(&value)),
                        other => Err(mismatch::<$ty>(&other)),
                    }
                }
            }
        )*
    };
}

from_value_int!(
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
);

impl FromValue for bool {
    fn field_type() -> FieldType {
        FieldType::Bool
    }

    fn from_value(value: Value) -> OrmResult<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            // TINYINT(1) booleans
            Value::Int(0) => Ok(false),
            Value::Int(1) => Ok(true),
            other => Err(mismatch::<bool>(&other)),
        }
    }
}

impl FromValue for f64 {
    fn field_type() -> FieldType {
        FieldType::Float64
    }

    fn from_value(value: Value) -> OrmResult<Self> {
        match value {
            Value::Float(x) => Ok(x),
            Value::Int(i) => Ok(i as f64),
            other => Err(mismatch::<f64>(&other)),
        }
    }
}

impl FromValue for f32 {
    fn field_type() -> FieldType {
        FieldType::Float32
    }

    fn from_value(value: Value) -> OrmResult<Self> {
        match value {
            Value::Float(x) => Ok(x as f32),
            Value::Int(i) => Ok(i as f32),
            other => Err(mismatch::<f32>(&other)),
        }
    }
}

impl FromValue for String {
    fn field_type() -> FieldType {
        FieldType::Text
    }

    fn from_value(value: Value) -> OrmResult<Self> {
        match value {
            Value::Text(s) => Ok(s),
            Value::Bytes(b) => {
                String::from_utf8(b).map_err(|e| OrmError::type_mismatch(FieldType::Text, e))
            }
            other => Err(mismatch::<String>(&other)),
        }
    }
}

impl FromValue for Vec<u8> {
    fn field_type() -> FieldType {
        FieldType::Bytes
    }

    fn from_value(value: Value) -> OrmResult<Self> {
        match value {
            Value::Bytes(b) => Ok(b),
            Value::Text(s) => Ok(s.into_bytes()),
            other => Err(mismatch::<Vec<u8>>(&other)),
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn field_type() -> FieldType {
        FieldType::Timestamp
    }

    fn from_value(value: Value) -> OrmResult<Self> {
        match value {
            Value::Timestamp(t) => Ok(t),
            other => Err(mismatch::<DateTime<Utc>>(&other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn field_type() -> FieldType {
        FieldType::Nullable(Box::new(T::field_type()))
    }

    fn from_value(value: Value) -> OrmResult<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}
