//! Memory Backend Module
//!
//! In-process store following Redis command semantics, with lazy TTL
//! expiration and an explicit cleanup pass for expired entries.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::backend::{EntryData, KeyValueBackend, StoreEntry};
use crate::error::{Result, StoreError};

// == Memory Backend ==
/// HashMap-backed store guarded by an async RwLock.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    /// Key-value storage
    entries: RwLock<HashMap<String, StoreEntry>>,
}

impl MemoryBackend {
    // == Constructor ==
    /// Creates an empty MemoryBackend.
    pub fn new() -> Self {
        Self::default()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    // == Length ==
    /// Returns the number of entries held, including expired ones not yet
    /// cleaned up.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    // == TTL ==
    /// Returns the remaining time to live of a live key.
    ///
    /// `None` when the key is absent or has no expiration.
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .and_then(StoreEntry::ttl_remaining)
    }
}

/// Returns the live entry for `key`, dropping it first if it has expired.
fn live_entry<'a>(
    entries: &'a mut HashMap<String, StoreEntry>,
    key: &str,
) -> Option<&'a mut StoreEntry> {
    if entries.get(key).is_some_and(StoreEntry::is_expired) {
        entries.remove(key);
        debug!(key = %key, "Dropped expired entry");
    }
    entries.get_mut(key)
}

/// Resolves an LRANGE window against a list of `len` elements.
fn range_bounds(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    let len = len as isize;
    let start = if start < 0 { (start + len).max(0) } else { start };
    let stop = if stop < 0 { stop + len } else { stop.min(len - 1) };

    if start >= len || stop < 0 || start > stop {
        None
    } else {
        Some((start as usize, stop as usize))
    }
}

#[async_trait]
impl KeyValueBackend for MemoryBackend {
    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            StoreEntry::new(EntryData::Bytes(value.to_vec()), None),
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut entries = self.entries.write().await;
        match live_entry(&mut entries, key) {
            Some(StoreEntry {
                data: EntryData::Bytes(value),
                ..
            }) => Ok(Some(value.clone())),
            Some(_) => Err(StoreError::WrongType(key.to_string())),
            None => Ok(None),
        }
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut entries = self.entries.write().await;
        match live_entry(&mut entries, key) {
            Some(entry) => {
                let EntryData::Bytes(value) = &mut entry.data else {
                    return Err(StoreError::WrongType(key.to_string()));
                };
                let current: i64 = std::str::from_utf8(value)
                    .ok()
                    .and_then(|text| text.parse().ok())
                    .ok_or_else(|| StoreError::NotInteger(key.to_string()))?;
                let next = current
                    .checked_add(1)
                    .ok_or_else(|| StoreError::NotInteger(key.to_string()))?;
                // INCR keeps any expiration already set on the key
                *value = next.to_string().into_bytes();
                Ok(next)
            }
            None => {
                entries.insert(
                    key.to_string(),
                    StoreEntry::new(EntryData::Bytes(b"1".to_vec()), None),
                );
                Ok(1)
            }
        }
    }

    async fn rpush(&self, key: &str, value: &[u8]) -> Result<usize> {
        let mut entries = self.entries.write().await;
        match live_entry(&mut entries, key) {
            Some(entry) => match &mut entry.data {
                EntryData::List(items) => {
                    items.push(value.to_vec());
                    Ok(items.len())
                }
                EntryData::Bytes(_) => Err(StoreError::WrongType(key.to_string())),
            },
            None => {
                entries.insert(
                    key.to_string(),
                    StoreEntry::new(EntryData::List(vec![value.to_vec()]), None),
                );
                Ok(1)
            }
        }
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        let mut entries = self.entries.write().await;
        match live_entry(&mut entries, key) {
            Some(StoreEntry {
                data: EntryData::List(items),
                ..
            }) => Ok(range_bounds(items.len(), start, stop)
                .map(|(from, to)| items[from..=to].to_vec())
                .unwrap_or_default()),
            Some(_) => Err(StoreError::WrongType(key.to_string())),
            None => Ok(Vec::new()),
        }
    }

    async fn set_ex(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        if ttl.is_zero() {
            return Err(StoreError::InvalidExpire(key.to_string()));
        }

        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            StoreEntry::new(EntryData::Bytes(value.to_vec()), Some(ttl)),
        );
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        let mut entries = self.entries.write().await;
        let removed = entries.len();
        entries.clear();
        debug!(removed, "Flushed memory backend");
        Ok(())
    }
}
