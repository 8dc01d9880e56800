//! Cache Module
//!
//! Store wrapper and typed accessors. Every `store` call runs through the
//! call instrumentation, so the store also records how often it was called
//! and with what.

mod value;

#[cfg(test)]
mod property_tests;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use crate::backend::KeyValueBackend;
use crate::error::Result;
use crate::instrument::{replay, CallHistory, CountCalls, Operation, ReplayReport};

// Re-export public types
pub use value::Value;

// == Public Constants ==
/// Qualified name of the store operation.
pub const STORE_OPERATION: &str = "Cache.store";

// == Store Record ==
/// The raw store operation: writes a value under a fresh UUID-v4 key.
pub struct StoreRecord<B: ?Sized> {
    backend: Arc<B>,
}

impl<B: ?Sized> StoreRecord<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl<B: KeyValueBackend + ?Sized> Operation for StoreRecord<B> {
    type Input = Value;
    type Output = String;

    fn name(&self) -> &str {
        STORE_OPERATION
    }

    async fn call(&self, value: Value) -> Result<String> {
        let key = Uuid::new_v4().to_string();
        self.backend.set(&key, &value.to_bytes()).await?;
        Ok(key)
    }
}

/// Store operation with counting outermost and history innermost: a call
/// increments the counter, records the input, stores, records the output.
pub type InstrumentedStore<B> = CountCalls<CallHistory<StoreRecord<B>, B>, B>;

// == Cache ==
/// Store wrapper bound to one backend handle.
pub struct Cache<B: ?Sized> {
    backend: Arc<B>,
    store: InstrumentedStore<B>,
}

impl<B: KeyValueBackend + ?Sized> Cache<B> {
    // == Constructor ==
    /// Opens the cache on `backend`, flushing every key it holds.
    pub async fn open(backend: Arc<B>) -> Result<Self> {
        backend.flush().await?;
        info!("Cache opened on a flushed store");

        let store = CountCalls::new(
            CallHistory::new(StoreRecord::new(backend.clone()), backend.clone()),
            backend.clone(),
        );

        Ok(Self { backend, store })
    }

    /// Returns the shared backend handle.
    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Returns the instrumented store operation.
    pub fn store_operation(&self) -> &InstrumentedStore<B> {
        &self.store
    }

    // == Store ==
    /// Stores `value` under a new random key and returns the key.
    pub async fn store<V: Into<Value>>(&self, value: V) -> Result<String> {
        let key = self.store.call(value.into()).await?;
        debug!(key = %key, "Stored record");
        Ok(key)
    }

    // == Get ==
    /// Returns the raw bytes stored under `key`, or `None` if absent.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.backend.get(key).await
    }

    /// Returns the value under `key` passed through `converter`.
    ///
    /// The converter is only invoked when the key exists.
    pub async fn get_with<T, F>(&self, key: &str, converter: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> Result<T>,
    {
        self.get(key).await?.map(converter).transpose()
    }

    /// Returns the value under `key` decoded as UTF-8.
    pub async fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get_with(key, |raw| Ok(String::from_utf8(raw)?)).await
    }

    /// Returns the value under `key` parsed as an integer.
    pub async fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get_with(key, |raw| Ok(String::from_utf8(raw)?.parse::<i64>()?))
            .await
    }

    /// Returns the value under `key` parsed as a float.
    pub async fn get_float(&self, key: &str) -> Result<Option<f64>> {
        self.get_with(key, |raw| Ok(String::from_utf8(raw)?.parse::<f64>()?))
            .await
    }

    // == Replay ==
    /// Prints the call count and history of the store operation.
    pub async fn replay(&self) -> Result<ReplayReport> {
        replay(self.backend.as_ref(), &self.store).await
    }
}
