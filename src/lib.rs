//! Redis Basic - key-value store exercises
//!
//! Typed storage under random keys, call counting and history with replay,
//! and an expiring web cache with access tracking, all kept in a Redis-style
//! store.

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod instrument;
pub mod tasks;
pub mod web;

pub use backend::{KeyValueBackend, MemoryBackend, RedisBackend};
pub use cache::{Cache, Value};
pub use config::Config;
pub use error::{Result, StoreError};
pub use tasks::spawn_cleanup_task;
pub use web::{HttpFetcher, WebCache};
