use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use crate::error::StoreError;

// ── Backend trait ──────────────────────────────────────────────────────────

/// A flat string key → string value store holding serialized records.
///
/// Every record store goes through this trait, so the same code runs over
/// SQLite in production and an in-memory map in tests.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the raw value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Insert or overwrite the value under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Returns `true` if something was removed.
    async fn remove(&self, key: &str) -> Result<bool, StoreError>;
}

// ── In-memory backend ──────────────────────────────────────────────────────

/// Thread-safe in-memory backend.
///
/// Backed by a DashMap so reads are concurrent and lock-free for most cases.
/// Contents live only as long as the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.inner.get(key).map(|v| v.clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.inner.remove(key).is_some())
    }
}
