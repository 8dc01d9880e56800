//! Page Decorators
//!
//! Access counting and time-boxed caching around a URL fetch.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::backend::KeyValueBackend;
use crate::error::Result;
use crate::instrument::Operation;
use crate::web::{count_key, page_key};

// == Count Access ==
/// Increments `count:<url>` on every call, hit or miss.
pub struct CountAccess<O, B: ?Sized> {
    inner: O,
    backend: Arc<B>,
}

impl<O, B: ?Sized> CountAccess<O, B> {
    pub fn new(inner: O, backend: Arc<B>) -> Self {
        Self { inner, backend }
    }

    /// Returns the wrapped operation.
    pub fn inner(&self) -> &O {
        &self.inner
    }
}

#[async_trait]
impl<O, B> Operation for CountAccess<O, B>
where
    O: Operation<Input = String, Output = String>,
    B: KeyValueBackend + ?Sized,
{
    type Input = String;
    type Output = String;

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn call(&self, url: String) -> Result<String> {
        let count = self.backend.incr(&count_key(&url)).await?;
        debug!(url = %url, count, "Counted page access");
        self.inner.call(url).await
    }
}

// == Cache Result ==
/// Serves `url:<url>` while it is live; otherwise fetches and caches the body
/// for `ttl`.
pub struct CacheResult<O, B: ?Sized> {
    inner: O,
    backend: Arc<B>,
    ttl: Duration,
}

impl<O, B: ?Sized> CacheResult<O, B> {
    pub fn new(inner: O, backend: Arc<B>, ttl: Duration) -> Self {
        Self {
            inner,
            backend,
            ttl,
        }
    }

    /// Returns the wrapped operation.
    pub fn inner(&self) -> &O {
        &self.inner
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[async_trait]
impl<O, B> Operation for CacheResult<O, B>
where
    O: Operation<Input = String, Output = String>,
    B: KeyValueBackend + ?Sized,
{
    type Input = String;
    type Output = String;

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn call(&self, url: String) -> Result<String> {
        let key = page_key(&url);

        if let Some(cached) = self.backend.get(&key).await? {
            debug!(url = %url, "Page cache hit");
            return Ok(String::from_utf8(cached)?);
        }

        debug!(url = %url, "Page cache miss");
        let body = self.inner.call(url).await?;
        self.backend.set_ex(&key, body.as_bytes(), self.ttl).await?;
        Ok(body)
    }
}
