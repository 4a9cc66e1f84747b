//! Stored column values
//!
//! This module provides:
//! - [`Value`], one SQL value as held by a result source
//! - [`FieldType`], the storage class reported by `Cursor::get_type`
//!
//! Reads through a getter of another storage class are converted by the
//! SQLite engine, not here.

use bytes::Bytes;

/// Storage class of a column value, numbered as on the platform cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum FieldType {
    /// NULL
    Null = 0,
    /// 64-bit signed integer
    Integer = 1,
    /// 64-bit IEEE float
    Float = 2,
    /// UTF-8 text
    String = 3,
    /// Raw bytes
    Blob = 4,
}

/// A single value stored in a result row.
///
/// # Example
///
/// ```rust
/// use shadow_cursor::Value;
///
/// let v = Value::from("Chuck");
/// assert_eq!(v.as_str(), Some("Chuck"));
/// assert!(Value::Null.is_null());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// NULL value
    Null,
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Text value
    Text(String),
    /// Byte array
    Blob(Bytes),
}

impl Value {
    /// Check if this value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Storage class of this value
    pub fn field_type(&self) -> FieldType {
        match self {
            Value::Null => FieldType::Null,
            Value::Integer(_) => FieldType::Integer,
            Value::Float(_) => FieldType::Float,
            Value::Text(_) => FieldType::String,
            Value::Blob(_) => FieldType::Blob,
        }
    }

    /// Try to get as a string reference
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as an integer without coercion
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as a float without coercion
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get as bytes without coercion
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Blob(b) => Some(b),
            _ => None,
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Blob(Bytes::copy_from_slice(v))
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(Bytes::from(v))
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Value::Blob(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Text(s) => write!(f, "{}", s),
            Value::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_null() {
        let v = Value::Null;
        assert!(v.is_null());
        assert_eq!(v.field_type(), FieldType::Null);
        assert_eq!(v.as_i64(), None);
        assert_eq!(v.as_str(), None);
    }

    #[test]
    fn test_field_type_codes() {
        assert_eq!(FieldType::Null as i32, 0);
        assert_eq!(FieldType::Integer as i32, 1);
        assert_eq!(FieldType::Float as i32, 2);
        assert_eq!(FieldType::String as i32, 3);
        assert_eq!(FieldType::Blob as i32, 4);
    }

    #[test]
    fn test_accessors_do_not_convert() {
        let v = Value::Integer(3463);
        assert_eq!(v.as_i64(), Some(3463));
        assert_eq!(v.as_f64(), None);
        assert_eq!(v.as_str(), None);
        assert_eq!(Value::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::Float(1.5).field_type(), FieldType::Float);
    }

    #[test]
    fn test_blob_value() {
        let v = Value::from(vec![0u8, 159, 146, 150]);
        assert_eq!(v.field_type(), FieldType::Blob);
        assert_eq!(v.as_bytes(), Some(&[0u8, 159, 146, 150][..]));
        assert_eq!(Value::from("hi").as_bytes(), None);
    }

    #[test]
    fn test_from_option() {
        assert!(Value::from(None::<i64>).is_null());
        assert_eq!(Value::from(Some(5i32)), Value::Integer(5));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(format!("{}", Value::Null), "NULL");
        assert_eq!(format!("{}", Value::Integer(42)), "42");
        assert_eq!(format!("{}", Value::Float(3.14)), "3.14");
        assert_eq!(format!("{}", Value::from("test")), "test");
        assert_eq!(format!("{}", Value::from(vec![1u8, 2, 3])), "<3 bytes>");
    }
}
