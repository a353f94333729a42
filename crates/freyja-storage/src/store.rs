use async_trait::async_trait;
use uuid::Uuid;

use freyja_core::models::item::ContentItem;
use freyja_core::models::status::ContentStatus;

use crate::error::StorageError;

/// An item together with the version it was read at.
#[derive(Debug, Clone)]
pub struct VersionedItem {
    pub item: ContentItem,
    pub etag: String,
}

/// Durable home of content items.
///
/// Writes are whole-item and conditional: `save` only succeeds when the
/// stored version still equals `expected_etag`, so one write commits a
/// status change together with its metadata.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Short name for logs and the health endpoint.
    fn backend(&self) -> &'static str;

    async fn load(&self, id: Uuid) -> Result<Option<VersionedItem>, StorageError>;

    /// Store a new item. Fails with `AlreadyExists` if the id is taken.
    async fn insert(&self, item: &ContentItem) -> Result<String, StorageError>;

    /// Overwrite an item read at `expected_etag`. Returns the new ETag.
    async fn save(&self, item: &ContentItem, expected_etag: &str) -> Result<String, StorageError>;

    async fn list(&self) -> Result<Vec<ContentItem>, StorageError>;

    /// Items currently in one of `statuses`. Backends with an index
    /// override this to avoid reading every item.
    async fn list_by_status(
        &self,
        statuses: &[ContentStatus],
    ) -> Result<Vec<ContentItem>, StorageError> {
        let mut items = self.list().await?;
        items.retain(|item| statuses.contains(&item.status()));
        Ok(items)
    }

    /// Cheap reachability check for the health endpoint.
    async fn ping(&self) -> Result<(), StorageError>;
}
