//! Call History Recording

use std::fmt::Display;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::backend::KeyValueBackend;
use crate::error::Result;
use crate::instrument::{inputs_key, outputs_key, CallArgs, Operation};

// == Call History ==
/// Wraps an operation and records its inputs and outputs in the store.
///
/// Before delegating, the rendered argument tuple is appended to
/// `<name>:inputs`. Afterwards the rendered result is appended to
/// `<name>:outputs`. A failed call appends `Error: <message>` instead of a
/// result, so both lists always grow together and stay paired.
pub struct CallHistory<O, B: ?Sized> {
    inner: O,
    backend: Arc<B>,
}

impl<O, B: ?Sized> CallHistory<O, B> {
    pub fn new(inner: O, backend: Arc<B>) -> Self {
        Self { inner, backend }
    }

    /// Returns the wrapped operation.
    pub fn inner(&self) -> &O {
        &self.inner
    }
}

#[async_trait]
impl<O, B> Operation for CallHistory<O, B>
where
    O: Operation,
    O::Input: CallArgs,
    O::Output: Display,
    B: KeyValueBackend + ?Sized,
{
    type Input = O::Input;
    type Output = O::Output;

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn call(&self, input: Self::Input) -> Result<Self::Output> {
        let name = self.name();
        let args = input.args_repr();
        self.backend
            .rpush(&inputs_key(name), args.as_bytes())
            .await?;

        match self.inner.call(input).await {
            Ok(output) => {
                self.backend
                    .rpush(&outputs_key(name), output.to_string().as_bytes())
                    .await?;
                debug!(operation = %name, args = %args, "Recorded call");
                Ok(output)
            }
            Err(err) => {
                warn!(operation = %name, args = %args, error = %err, "Recorded failed call");
                self.backend
                    .rpush(&outputs_key(name), format!("Error: {}", err).as_bytes())
                    .await?;
                Err(err)
            }
        }
    }
}
