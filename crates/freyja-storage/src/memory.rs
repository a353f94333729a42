use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use freyja_core::keys;
use freyja_core::models::item::ContentItem;

use crate::error::StorageError;
use crate::store::{ItemStore, VersionedItem};

/// Process-local store. Versions are a per-item write counter.
#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<Uuid, (ContentItem, u64)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn load(&self, id: Uuid) -> Result<Option<VersionedItem>, StorageError> {
        let items = self.items.read().await;
        Ok(items.get(&id).map(|(item, version)| VersionedItem {
            item: item.clone(),
            etag: version.to_string(),
        }))
    }

    async fn insert(&self, item: &ContentItem) -> Result<String, StorageError> {
        let mut items = self.items.write().await;
        if items.contains_key(&item.id) {
            return Err(StorageError::AlreadyExists {
                key: keys::item(item.id),
            });
        }
        items.insert(item.id, (item.clone(), 1));
        Ok("1".to_string())
    }

    async fn save(&self, item: &ContentItem, expected_etag: &str) -> Result<String, StorageError> {
        let mut items = self.items.write().await;
        let Some((stored, version)) = items.get_mut(&item.id) else {
            return Err(StorageError::NotFound {
                key: keys::item(item.id),
            });
        };
        if version.to_string() != expected_etag {
            return Err(StorageError::PreconditionFailed {
                key: keys::item(item.id),
            });
        }
        *stored = item.clone();
        *version += 1;
        Ok(version.to_string())
    }

    async fn list(&self) -> Result<Vec<ContentItem>, StorageError> {
        let items = self.items.read().await;
        Ok(items.values().map(|(item, _)| item.clone()).collect())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
