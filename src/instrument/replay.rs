//! Replay
//!
//! Reads the bookkeeping written by [`CountCalls`](super::CountCalls) and
//! [`CallHistory`](super::CallHistory) and renders it:
//!
//! ```text
//! Cache.store was called 2 times:
//! Cache.store(*('a',)) -> k1
//! Cache.store(*('b',)) -> k2
//! ```

use std::fmt;

use serde::Serialize;

use crate::backend::KeyValueBackend;
use crate::error::Result;
use crate::instrument::{inputs_key, outputs_key, Operation};

// == Call Record ==
/// One recorded call: rendered arguments and rendered result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallRecord {
    pub inputs: String,
    pub output: String,
}

// == Replay Report ==
/// Recorded call count and history of one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub name: String,
    pub calls: i64,
    pub history: Vec<CallRecord>,
}

impl ReplayReport {
    /// Loads the counter and history recorded under `name`.
    ///
    /// A missing counter reads as zero. Inputs and outputs are paired in
    /// recorded order; extra entries on the longer list are ignored.
    pub async fn load<B>(backend: &B, name: &str) -> Result<Self>
    where
        B: KeyValueBackend + ?Sized,
    {
        let calls: i64 = match backend.get(name).await? {
            Some(raw) => String::from_utf8(raw)?.parse::<i64>()?,
            None => 0,
        };

        let inputs = backend.lrange(&inputs_key(name), 0, -1).await?;
        let outputs = backend.lrange(&outputs_key(name), 0, -1).await?;

        let history = inputs
            .into_iter()
            .zip(outputs)
            .map(|(input, output)| CallRecord {
                inputs: String::from_utf8_lossy(&input).into_owned(),
                output: String::from_utf8_lossy(&output).into_owned(),
            })
            .collect();

        Ok(Self {
            name: name.to_string(),
            calls,
            history,
        })
    }

    /// Renders the report as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} was called {} times:", self.name, self.calls)?;
        for record in &self.history {
            writeln!(f, "{}(*{}) -> {}", self.name, record.inputs, record.output)?;
        }
        Ok(())
    }
}

// == Replay ==
/// Prints the call count and history of `operation` to stdout.
///
/// Returns the loaded report so callers can inspect or re-render it.
pub async fn replay<O, B>(backend: &B, operation: &O) -> Result<ReplayReport>
where
    O: Operation + ?Sized,
    B: KeyValueBackend + ?Sized,
{
    let report = ReplayReport::load(backend, operation.name()).await?;
    print!("{}", report);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::backend::MemoryBackend;
    use crate::instrument::test_support::Echo;
    use crate::instrument::{CallHistory, CountCalls};

    #[tokio::test]
    async fn test_replay_renders_count_and_pairs() {
        let backend = Arc::new(MemoryBackend::new());
        let op = CountCalls::new(CallHistory::new(Echo::default(), backend.clone()), backend.clone());

        op.call("1".to_string()).await.unwrap();
        op.call("2".to_string()).await.unwrap();

        let report = replay(backend.as_ref(), &op).await.unwrap();

        assert_eq!(report.calls, 2);
        assert_eq!(
            report.to_string(),
            "Echo.call was called 2 times:\n\
             Echo.call(*('1',)) -> k1\n\
             Echo.call(*('2',)) -> k2\n"
        );
    }

    #[tokio::test]
    async fn test_replay_never_called() {
        let backend = MemoryBackend::new();

        let report = ReplayReport::load(&backend, "Never.called").await.unwrap();

        assert_eq!(report.calls, 0);
        assert!(report.history.is_empty());
        assert_eq!(report.to_string(), "Never.called was called 0 times:\n");
    }

    #[tokio::test]
    async fn test_replay_truncates_to_shorter_list() {
        let backend = MemoryBackend::new();
        backend.set("Op", b"3").await.unwrap();
        for input in ["('a',)", "('b',)", "('c',)"] {
            backend.rpush("Op:inputs", input.as_bytes()).await.unwrap();
        }
        backend.rpush("Op:outputs", b"x").await.unwrap();

        let report = ReplayReport::load(&backend, "Op").await.unwrap();

        assert_eq!(report.calls, 3);
        assert_eq!(
            report.history,
            vec![CallRecord {
                inputs: "('a',)".to_string(),
                output: "x".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_replay_bad_counter_propagates() {
        let backend = MemoryBackend::new();
        backend.set("Op", b"many").await.unwrap();

        assert!(ReplayReport::load(&backend, "Op").await.is_err());
    }

    #[test]
    fn test_report_json() {
        let report = ReplayReport {
            name: "Op".to_string(),
            calls: 1,
            history: vec![CallRecord {
                inputs: "(1,)".to_string(),
                output: "k".to_string(),
            }],
        };

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["calls"], 1);
        assert_eq!(json["history"][0]["inputs"], "(1,)");
    }
}
