//! Storage backends that fail on demand.
#![allow(dead_code)]

use async_trait::async_trait;
use fuel_swift::storage::{KvStore, MemoryStore, StorageError};
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory store whose writes can be switched off, and whose reads fail for one key prefix.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
    unreadable_prefix: Option<&'static str>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unreadable(prefix: &'static str) -> Self {
        Self {
            unreadable_prefix: Some(prefix),
            ..Self::default()
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KvStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.unreadable_prefix.is_some_and(|prefix| key.starts_with(prefix)) {
            return Err(StorageError::Backend(format!("{key}: read failed")));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend(format!("{key}: disk full")));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key).await
    }
}
