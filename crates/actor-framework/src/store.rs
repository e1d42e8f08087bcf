//! # Collection Persistence
//!
//! A `ResourceActor` can be attached to a [`CollectionStore`], which loads and saves the
//! actor's whole list under a scope key (typically the owning user). The actor stays the
//! single writer: it saves after every successful mutation and rolls the in-memory list
//! back when the save fails, so memory and storage never disagree.

use async_trait::async_trait;

/// Boxed error returned by store implementations.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Loads and saves an ordered list of entities per scope.
#[async_trait]
pub trait CollectionStore<T>: Send + Sync {
    /// Returns the list stored under `scope`. An absent scope is an empty list.
    async fn load(&self, scope: &str) -> Result<Vec<T>, StoreError>;

    /// Replaces the list stored under `scope`.
    async fn save(&self, scope: &str, items: &[T]) -> Result<(), StoreError>;
}
