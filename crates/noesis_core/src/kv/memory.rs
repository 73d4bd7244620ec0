//! In-process key-value backend.

use super::{KeyValueStore, KvError, KvResult};
use std::collections::BTreeMap;

/// Map-backed key-value store for tests and ephemeral sessions.
///
/// An optional byte quota models the browser storage limit: a write whose
/// key plus value length, added to the other stored pairs, exceeds the quota
/// is rejected and leaves the previous value in place.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKvStore {
    values: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes beyond `quota_bytes` in total.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            values: BTreeMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn used_bytes_excluding(&self, key: &str) -> usize {
        self.values
            .iter()
            .filter(|(stored_key, _)| stored_key.as_str() != key)
            .map(|(stored_key, value)| stored_key.len() + value.len())
            .sum()
    }
}

impl KeyValueStore for InMemoryKvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
        if let Some(quota_bytes) = self.quota_bytes {
            let requested_bytes = self.used_bytes_excluding(key) + key.len() + value.len();
            if requested_bytes > quota_bytes {
                return Err(KvError::QuotaExceeded {
                    key: key.to_string(),
                    requested_bytes,
                    quota_bytes,
                });
            }
        }

        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> KvResult<()> {
        self.values.remove(key);
        Ok(())
    }
}
