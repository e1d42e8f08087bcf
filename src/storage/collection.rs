//! Adapts [`StorageService`] to the framework's [`CollectionStore`], so a `ResourceActor`
//! persists its list as one JSON array per key.

use super::StorageService;
use actor_framework::{CollectionStore, StoreError};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;

/// The scope handed to `bind` is used verbatim as the storage key.
pub struct JsonCollection<T> {
    storage: StorageService,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonCollection<T> {
    pub fn new(storage: StorageService) -> Self {
        Self {
            storage,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T> CollectionStore<T> for JsonCollection<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn load(&self, scope: &str) -> Result<Vec<T>, StoreError> {
        Ok(self.storage.retrieve(scope).await?.unwrap_or_default())
    }

    async fn save(&self, scope: &str, items: &[T]) -> Result<(), StoreError> {
        Ok(self.storage.store(scope, items).await?)
    }
}
