//! In-memory key-value backend.
//!
//! # Invariants
//! - When a quota is set, the sum of key and value byte lengths never exceeds
//!   it; a write that would exceed it is rejected with a quota signal and
//!   leaves the previous value in place.

use super::kv::{KeyValueStore, KvError, KvResult};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes beyond `quota_bytes` in total.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            items: RefCell::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Total bytes currently held, keys included.
    pub fn used_bytes(&self) -> usize {
        self.items
            .borrow()
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> KvResult<()> {
        if let Some(quota) = self.quota_bytes {
            let previous = self
                .items
                .borrow()
                .get(key)
                .map_or(0, |existing| key.len() + existing.len());
            let projected = self.used_bytes() - previous + key.len() + value.len();
            if projected > quota {
                return Err(KvError::quota_exceeded(format!(
                    "write of {} bytes exceeds quota of {quota} bytes",
                    value.len()
                )));
            }
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> KvResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
