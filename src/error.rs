//! Error types for the store exercises
//!
//! Provides unified error handling using thiserror. Failures from the store
//! client, the HTTP client and value conversion are wrapped, never handled.

use thiserror::Error;

// == Store Error Enum ==
/// Unified error type for store, fetch and conversion failures.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failure reported by the Redis client
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Failure reported by the HTTP client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stored bytes are not valid UTF-8
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Stored value is not an integer
    #[error("Invalid integer: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    /// Stored value is not a float
    #[error("Invalid float: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    /// Command used against a key holding the wrong kind of value
    #[error("WRONGTYPE Operation against a key holding the wrong kind of value: {0}")]
    WrongType(String),

    /// INCR on a value that does not hold an integer
    #[error("Value is not an integer or out of range: {0}")]
    NotInteger(String),

    /// Expiration that Redis would refuse
    #[error("Invalid expire time: {0}")]
    InvalidExpire(String),
}

// == Result Type Alias ==
/// Convenience Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_errors_convert() {
        let err: StoreError = "abc".parse::<i64>().unwrap_err().into();
        assert!(matches!(err, StoreError::ParseInt(_)));

        let err: StoreError = String::from_utf8(vec![0xff]).unwrap_err().into();
        assert!(matches!(err, StoreError::Utf8(_)));
    }

    #[test]
    fn test_wrong_type_message() {
        let err = StoreError::WrongType("Cache.store".to_string());
        assert!(err.to_string().starts_with("WRONGTYPE"));
    }
}
