//! Invocation Counting

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::backend::KeyValueBackend;
use crate::error::Result;
use crate::instrument::Operation;

// == Count Calls ==
/// Wraps an operation and increments `<name>` in the store on every call.
///
/// The increment happens before delegating, so failed calls are counted too.
pub struct CountCalls<O, B: ?Sized> {
    inner: O,
    backend: Arc<B>,
}

impl<O, B: ?Sized> CountCalls<O, B> {
    pub fn new(inner: O, backend: Arc<B>) -> Self {
        Self { inner, backend }
    }

    /// Returns the wrapped operation.
    pub fn inner(&self) -> &O {
        &self.inner
    }
}

#[async_trait]
impl<O, B> Operation for CountCalls<O, B>
where
    O: Operation,
    B: KeyValueBackend + ?Sized,
{
    type Input = O::Input;
    type Output = O::Output;

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn call(&self, input: Self::Input) -> Result<Self::Output> {
        let count = self.backend.incr(self.name()).await?;
        debug!(operation = %self.name(), count, "Counted call");
        self.inner.call(input).await
    }
}
