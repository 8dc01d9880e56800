//! Property-Based Tests for the Cache Module
//!
//! Uses proptest to verify the round-trip and instrumentation laws of the
//! store wrapper.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use tokio_test::block_on;

use crate::backend::{KeyValueBackend, MemoryBackend};
use crate::cache::{Cache, STORE_OPERATION};
use crate::instrument::{inputs_key, outputs_key, CallArgs, ReplayReport};

fn open_cache() -> Cache<MemoryBackend> {
    block_on(Cache::open(Arc::new(MemoryBackend::new()))).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // *For any* string, storing then reading it back with get_str returns it.
    #[test]
    fn prop_string_round_trip(value in ".{0,64}") {
        let cache = open_cache();

        let key = block_on(cache.store(value.as_str())).unwrap();

        prop_assert_eq!(block_on(cache.get_str(&key)).unwrap(), Some(value));
    }

    // *For any* integer, storing then reading it back with get_int returns it.
    #[test]
    fn prop_int_round_trip(value in any::<i64>()) {
        let cache = open_cache();

        let key = block_on(cache.store(value)).unwrap();

        prop_assert_eq!(block_on(cache.get_int(&key)).unwrap(), Some(value));
    }

    // *For any* finite float, storing then reading it back with get_float
    // returns it.
    #[test]
    fn prop_float_round_trip(value in any::<f64>().prop_filter("finite", |x| x.is_finite())) {
        let cache = open_cache();

        let key = block_on(cache.store(value)).unwrap();

        prop_assert_eq!(block_on(cache.get_float(&key)).unwrap(), Some(value));
    }

    // *For any* N calls to store, the counter reads N, both history lists
    // hold N entries, and pair i reflects call i.
    #[test]
    fn prop_instrumentation_counts_and_pairs(values in prop::collection::vec("[a-z0-9]{0,12}", 0..25)) {
        let cache = open_cache();
        let backend = cache.backend().clone();

        let mut keys = Vec::new();
        for value in &values {
            keys.push(block_on(cache.store(value.as_str())).unwrap());
        }

        let report = block_on(ReplayReport::load(backend.as_ref(), STORE_OPERATION)).unwrap();
        prop_assert_eq!(report.calls, values.len() as i64);
        prop_assert_eq!(report.history.len(), values.len());
        for ((record, value), key) in report.history.iter().zip(&values).zip(&keys) {
            prop_assert_eq!(&record.inputs, &value.clone().args_repr());
            prop_assert_eq!(&record.output, key);
        }

        let inputs = block_on(backend.lrange(&inputs_key(STORE_OPERATION), 0, -1)).unwrap();
        let outputs = block_on(backend.lrange(&outputs_key(STORE_OPERATION), 0, -1)).unwrap();
        prop_assert_eq!(inputs.len(), outputs.len());

        let unique: HashSet<_> = keys.iter().collect();
        prop_assert_eq!(unique.len(), keys.len());
    }
}
