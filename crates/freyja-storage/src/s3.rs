use async_trait::async_trait;
use aws_sdk_s3::Client;
use tracing::warn;
use uuid::Uuid;

use freyja_core::keys;
use freyja_core::models::item::ContentItem;
use freyja_core::models::status::ContentStatus;

use crate::error::StorageError;
use crate::objects;
use crate::store::{ItemStore, VersionedItem};

/// Items as JSON objects under `items/` in one bucket, with S3 ETags as
/// versions.
///
/// Non-terminal items also get an empty marker under `index/{status}/`,
/// written before the item itself. A marker whose item has since moved on
/// is stale; `list_by_status` skips it and deletes it once the item is
/// terminal.
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    async fn mark_status(&self, item: &ContentItem) -> Result<(), StorageError> {
        let status = item.status();
        if status.is_terminal() {
            return Ok(());
        }
        objects::put_object(
            &self.client,
            &self.bucket,
            &keys::status_marker(status, item.id),
            Vec::new(),
        )
        .await
    }

    async fn drop_stale_marker(&self, key: &str) {
        if let Err(e) = objects::delete_object(&self.client, &self.bucket, key).await {
            warn!(key = %key, error = %e, "failed to delete stale status marker");
        }
    }
}

#[async_trait]
impl ItemStore for S3Store {
    fn backend(&self) -> &'static str {
        "s3"
    }

    async fn load(&self, id: Uuid) -> Result<Option<VersionedItem>, StorageError> {
        let key = keys::item(id);
        let output = match objects::get_object(&self.client, &self.bucket, &key).await {
            Ok(output) => output,
            Err(StorageError::NotFound { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };
        let item: ContentItem = serde_json::from_slice(&output.body)?;
        Ok(Some(VersionedItem {
            item,
            etag: output.etag.unwrap_or_default(),
        }))
    }

    async fn insert(&self, item: &ContentItem) -> Result<String, StorageError> {
        let body = serde_json::to_vec_pretty(item)?;
        self.mark_status(item).await?;
        objects::put_object_if_absent(&self.client, &self.bucket, &keys::item(item.id), body).await
    }

    async fn save(&self, item: &ContentItem, expected_etag: &str) -> Result<String, StorageError> {
        let body = serde_json::to_vec_pretty(item)?;
        self.mark_status(item).await?;
        objects::put_object_if_match(
            &self.client,
            &self.bucket,
            &keys::item(item.id),
            body,
            expected_etag,
        )
        .await
    }

    async fn list(&self) -> Result<Vec<ContentItem>, StorageError> {
        let object_keys = objects::list_objects(&self.client, &self.bucket, keys::ITEMS_PREFIX).await?;

        let mut items = Vec::with_capacity(object_keys.len());
        for key in &object_keys {
            if keys::item_id_from_key(key).is_none() {
                warn!(key = %key, "skipping foreign object under items prefix");
                continue;
            }
            match objects::get_object(&self.client, &self.bucket, key).await {
                Ok(output) => items.push(serde_json::from_slice(&output.body)?),
                // Deleted between list and get.
                Err(StorageError::NotFound { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(items)
    }

    async fn list_by_status(
        &self,
        statuses: &[ContentStatus],
    ) -> Result<Vec<ContentItem>, StorageError> {
        if statuses.iter().any(|status| status.is_terminal()) {
            let mut items = self.list().await?;
            items.retain(|item| statuses.contains(&item.status()));
            return Ok(items);
        }

        let mut items = Vec::new();
        for &status in statuses {
            let markers =
                objects::list_objects(&self.client, &self.bucket, &keys::status_index(status)).await?;
            for marker in &markers {
                let Some(id) = keys::item_id_from_marker(marker) else {
                    warn!(key = %marker, "skipping foreign object under status index");
                    continue;
                };
                match self.load(id).await? {
                    Some(VersionedItem { item, .. }) if item.status() == status => items.push(item),
                    // Terminal items never come back, so their markers can go.
                    Some(VersionedItem { item, .. }) if item.status().is_terminal() => {
                        self.drop_stale_marker(marker).await
                    }
                    // Moved to another live status, or not written yet.
                    _ => {}
                }
            }
        }
        Ok(items)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        objects::head_bucket(&self.client, &self.bucket).await
    }
}
