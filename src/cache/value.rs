//! Stored Value Module
//!
//! The value types a record can hold and their wire encoding.

use crate::instrument::{CallArgs, Repr};

// == Value ==
/// A value accepted by [`Cache::store`](super::Cache::store).
///
/// Values are written as bytes: strings verbatim, integers as decimal text
/// and floats in shortest round-trip form (`3.14`, `1.0`, `1e+16`). Reading back
/// requires the matching typed accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Bytes(Vec<u8>),
    Int(i64),
    Float(f64),
}

impl Value {
    /// Encodes the value as stored in the backend.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Value::Str(text) => text.as_bytes().to_vec(),
            Value::Bytes(bytes) => bytes.clone(),
            Value::Int(n) => n.to_string().into_bytes(),
            Value::Float(x) => x.repr().into_bytes(),
        }
    }
}

impl Repr for Value {
    fn repr(&self) -> String {
        match self {
            Value::Str(text) => text.repr(),
            Value::Bytes(bytes) => bytes.repr(),
            Value::Int(n) => n.repr(),
            Value::Float(x) => x.repr(),
        }
    }
}

impl CallArgs for Value {
    fn args_repr(&self) -> String {
        format!("({},)", self.repr())
    }
}

// == Conversions ==
impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(value: &[u8; N]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding() {
        assert_eq!(Value::from("foo").to_bytes(), b"foo");
        assert_eq!(Value::from(b"bar").to_bytes(), b"bar");
        assert_eq!(Value::from(123).to_bytes(), b"123");
        assert_eq!(Value::from(-7i64).to_bytes(), b"-7");
        assert_eq!(Value::from(3.14).to_bytes(), b"3.14");
        assert_eq!(Value::from(1.0).to_bytes(), b"1.0");
        assert_eq!(Value::from(1e16).to_bytes(), b"1e+16");
        assert_eq!(Value::from(1e-5).to_bytes(), b"1e-05");
        assert_eq!(
            Value::from(1.2345678901234568e17).to_bytes(),
            b"1.2345678901234568e+17"
        );
    }

    #[test]
    fn test_args_repr() {
        assert_eq!(Value::from("foo").args_repr(), "('foo',)");
        assert_eq!(Value::from(b"bar").args_repr(), "(b'bar',)");
        assert_eq!(Value::from(123).args_repr(), "(123,)");
        assert_eq!(Value::from(3.14).args_repr(), "(3.14,)");
        assert_eq!(Value::from(1e16).args_repr(), "(1e+16,)");
    }
}
