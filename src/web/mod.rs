//! Web Module
//!
//! Expiring web cache with access tracking.
//!
//! `get_page(url)` counts every access under `count:<url>` and serves the
//! body from `url:<url>` while that entry is live. A miss fetches the page
//! and caches it for [`PAGE_TTL`]. Counting wraps caching, so hits are
//! counted too.

mod decorators;
mod fetch;

use std::sync::Arc;
use std::time::Duration;

use crate::backend::KeyValueBackend;
use crate::error::Result;
use crate::instrument::Operation;

// Re-export public types
pub use decorators::{CacheResult, CountAccess};
pub use fetch::HttpFetcher;

// == Public Constants ==
/// Time a fetched page stays cached.
pub const PAGE_TTL: Duration = Duration::from_secs(10);

/// Key of the cached body for `url`.
pub fn page_key(url: &str) -> String {
    format!("url:{}", url)
}

/// Key of the access counter for `url`.
pub fn count_key(url: &str) -> String {
    format!("count:{}", url)
}

// == Web Cache ==
/// A page source wrapped with access counting and expiring caching.
pub struct WebCache<O, B: ?Sized> {
    backend: Arc<B>,
    page: CountAccess<CacheResult<O, B>, B>,
}

impl<O, B> WebCache<O, B>
where
    O: Operation<Input = String, Output = String>,
    B: KeyValueBackend + ?Sized,
{
    /// Wraps `source` with the default [`PAGE_TTL`].
    pub fn new(backend: Arc<B>, source: O) -> Self {
        Self::with_ttl(backend, source, PAGE_TTL)
    }

    /// Wraps `source`, caching fetched pages for `ttl`.
    pub fn with_ttl(backend: Arc<B>, source: O, ttl: Duration) -> Self {
        let page = CountAccess::new(
            CacheResult::new(source, backend.clone(), ttl),
            backend.clone(),
        );
        Self { backend, page }
    }

    /// Returns the page source being wrapped.
    pub fn source(&self) -> &O {
        self.page.inner().inner()
    }

    // == Get Page ==
    /// Returns the body of `url`, from cache when live.
    pub async fn get_page(&self, url: &str) -> Result<String> {
        self.page.call(url.to_string()).await
    }

    // == Access Count ==
    /// Returns how many times `url` was requested through this cache.
    pub async fn access_count(&self, url: &str) -> Result<i64> {
        match self.backend.get(&count_key(url)).await? {
            Some(raw) => Ok(String::from_utf8(raw)?.parse::<i64>()?),
            None => Ok(0),
        }
    }
}
