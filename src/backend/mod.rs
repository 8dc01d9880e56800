//! Backend Module
//!
//! The key-value store seam. Every component talks to the store through
//! [`KeyValueBackend`], which exposes the handful of commands the exercises
//! rely on. Two implementations are provided:
//! - [`RedisBackend`] for a real Redis server
//! - [`MemoryBackend`] for in-process use with the same command semantics

mod entry;
mod memory;
mod redis_backend;


use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use redis_backend::RedisBackend;
pub use entry::{EntryData, StoreEntry};
pub use memory::MemoryBackend;

// == Key Value Backend ==
/// Commands required from the external store.
///
/// Each command is expected to execute atomically on the store side. No
/// multi-command sequence built on top of this trait is transactional.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    /// SET: stores `value` under `key`, clearing any expiration.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// GET: returns the value under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// INCR: increments the integer under `key` by one and returns it.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// RPUSH: appends `value` to the list under `key`, returning its length.
    async fn rpush(&self, key: &str, value: &[u8]) -> Result<usize>;

    /// LRANGE: reads list elements between `start` and `stop` inclusive.
    ///
    /// Negative indices count from the end of the list.
    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>>;

    /// SETEX: stores `value` under `key`, expiring after `ttl`.
    async fn set_ex(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()>;

    /// FLUSHDB: removes every key in the current database.
    async fn flush(&self) -> Result<()>;
}
