//! Instrument Module
//!
//! Call instrumentation for store-backed operations.
//!
//! An [`Operation`] is an async callable with a stable qualified name. The
//! wrappers in this module implement `Operation` themselves, so they compose
//! by nesting:
//! - [`CountCalls`] increments `<name>` on every call
//! - [`CallHistory`] appends to `<name>:inputs` and `<name>:outputs`
//!
//! [`replay`] reads that bookkeeping back and renders it.

mod args;
mod count;
mod history;
mod replay;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use args::{CallArgs, Repr};
pub use count::CountCalls;
pub use history::CallHistory;
pub use replay::{replay, CallRecord, ReplayReport};

// == Operation ==
/// A named async operation that instrumentation can wrap.
#[async_trait]
pub trait Operation: Send + Sync {
    type Input: Send + 'static;
    type Output: Send + 'static;

    /// Qualified name used as the key prefix for counters and history.
    fn name(&self) -> &str;

    /// Runs the operation.
    async fn call(&self, input: Self::Input) -> Result<Self::Output>;
}

// == Key Helpers ==
/// Key of the list recording inputs of `name`.
pub fn inputs_key(name: &str) -> String {
    format!("{}:inputs", name)
}

/// Key of the list recording outputs of `name`.
pub fn outputs_key(name: &str) -> String {
    format!("{}:outputs", name)
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Operations used by the instrumentation tests.

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::Operation;
    use crate::error::{Result, StoreError};

    /// Echoes its input as `k<input>`, failing on inputs starting with `!`.
    #[derive(Default)]
    pub struct Echo {
        pub calls: AtomicUsize,
    }

    #[async_trait]
    impl Operation for Echo {
        type Input = String;
        type Output = String;

        fn name(&self) -> &str {
            "Echo.call"
        }

        async fn call(&self, input: String) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if input.starts_with('!') {
                return Err(StoreError::WrongType(input));
            }
            Ok(format!("k{}", input))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_keys() {
        assert_eq!(inputs_key("Cache.store"), "Cache.store:inputs");
        assert_eq!(outputs_key("Cache.store"), "Cache.store:outputs");
    }
}
