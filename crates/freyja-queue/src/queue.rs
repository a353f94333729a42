use std::cmp::Reverse;
use std::sync::Arc;

use dashmap::DashMap;
use jiff::Timestamp;
use serde_json::json;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{error, info, warn};
use uuid::Uuid;

use freyja_core::error::LifecycleError;
use freyja_core::lifecycle::Action;
use freyja_core::models::analytics::StatusCounts;
use freyja_core::models::annotations::Annotations;
use freyja_core::models::item::ContentItem;
use freyja_core::models::metadata::ItemMetadata;
use freyja_core::models::status::{ContentSource, ContentStatus, ContentType, StatusFilter};
use freyja_publish::error::PublishError;
use freyja_publish::Publisher;
use freyja_storage::store::{ItemStore, VersionedItem};

use crate::audit::{Actor, AuditEvent};
use crate::error::QueueError;

/// Content item lifecycle manager.
///
/// All mutations of one item run under that item's lock, so a reviewer
/// clicking "publish" and the background sweep can never both post the
/// same item. The store's ETag check covers writers in other processes.
pub struct ApprovalQueue {
    inner: Arc<Inner>,
}

struct Inner {
    store: Arc<dyn ItemStore>,
    publisher: Arc<dyn Publisher>,
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

/// Held for the duration of one transition. Dropping it, on any path,
/// unlocks the item and forgets the lock once nobody else wants it.
struct ItemGuard<'a> {
    locks: &'a DashMap<Uuid, Arc<Mutex<()>>>,
    id: Uuid,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for ItemGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.locks
            .remove_if(&self.id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl ApprovalQueue {
    pub fn new(store: Arc<dyn ItemStore>, publisher: Arc<dyn Publisher>) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                publisher,
                locks: DashMap::new(),
            }),
        }
    }

    pub fn store(&self) -> &Arc<dyn ItemStore> {
        &self.inner.store
    }

    pub fn publisher(&self) -> &Arc<dyn Publisher> {
        &self.inner.publisher
    }

    /// Items with a transition running or waiting for one.
    pub fn locked_items(&self) -> usize {
        self.inner.locks.len()
    }

    // ── Lifecycle operations ────────────────────────────────────────────

    pub async fn submit(
        &self,
        content: &str,
        content_type: ContentType,
        source: ContentSource,
        metadata: ItemMetadata,
    ) -> Result<ContentItem, QueueError> {
        let item = ContentItem::new(content, content_type, source, metadata, Timestamp::now())?;
        self.inner.store.insert(&item).await?;

        AuditEvent::new("submit", item.id, Actor::Reviewer, item.status())
            .with_details(json!({
                "content_type": content_type.as_str(),
                "source": source.as_str(),
            }))
            .emit();
        info!(item_id = %item.id, content_type = %content_type, source = %source, "content submitted");
        Ok(item)
    }

    pub async fn approve(&self, id: Uuid, feedback: Option<&str>) -> Result<ContentItem, QueueError> {
        self.transition(id, Action::Approve, |item, now| item.approve(feedback, now))
            .await
    }

    pub async fn reject(&self, id: Uuid, reason: &str) -> Result<ContentItem, QueueError> {
        self.transition(id, Action::Reject, |item, now| item.reject(reason, now))
            .await
    }

    pub async fn edit(
        &self,
        id: Uuid,
        new_content: &str,
        notes: Option<&str>,
    ) -> Result<ContentItem, QueueError> {
        self.transition(id, Action::Edit, |item, now| item.edit(new_content, notes, now))
            .await
    }

    pub async fn schedule(&self, id: Uuid, publish_at: Timestamp) -> Result<ContentItem, QueueError> {
        self.transition(id, Action::Schedule, |item, now| item.schedule(publish_at, now))
            .await
    }

    pub async fn unschedule(&self, id: Uuid) -> Result<ContentItem, QueueError> {
        self.transition(id, Action::Unschedule, |item, now| item.unschedule(now))
            .await
    }

    /// Replace an item's quality and brand annotations. Allowed in any status.
    pub async fn annotate(&self, id: Uuid, annotations: Annotations) -> Result<ContentItem, QueueError> {
        let _guard = self.inner.lock_item(id).await;
        let VersionedItem { mut item, etag } = self.inner.load(id).await?;
        item.annotate(annotations);
        self.inner.store.save(&item, &etag).await?;
        Ok(item)
    }

    /// Post an approved or scheduled item now.
    ///
    /// The publisher is called first; only on success are status, URL and
    /// post id committed, together, in one store write. On failure the item
    /// is left as it was, apart from recording thread parts already live.
    pub async fn publish(&self, id: Uuid) -> Result<ContentItem, QueueError> {
        let published = self.publish_detached(id, Actor::Reviewer, None).await?;
        // `None` only comes from the due check, which is off here.
        published.ok_or(QueueError::NotFound(id))
    }

    /// Publish `id` if it is still eligible at `now`, re-checked under the
    /// item lock. `Ok(None)` means the item was no longer due.
    pub async fn publish_if_due(
        &self,
        id: Uuid,
        now: Timestamp,
        include_approved: bool,
    ) -> Result<Option<ContentItem>, QueueError> {
        self.publish_detached(id, Actor::AutoPublisher, Some((now, include_approved)))
            .await
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub async fn get(&self, id: Uuid) -> Result<ContentItem, QueueError> {
        Ok(self.inner.load(id).await?.item)
    }

    /// Items matching `filter`, newest first.
    pub async fn list(
        &self,
        filter: StatusFilter,
        limit: Option<usize>,
    ) -> Result<Vec<ContentItem>, QueueError> {
        let mut items = match filter {
            StatusFilter::All => self.inner.store.list().await?,
            StatusFilter::Only(status) => self.inner.store.list_by_status(&[status]).await?,
        };
        items.sort_by_key(|item| Reverse(item.created_at));
        if let Some(limit) = limit {
            items.truncate(limit);
        }
        Ok(items)
    }

    /// Most recently changed items.
    pub async fn recent(&self, limit: usize) -> Result<Vec<ContentItem>, QueueError> {
        let mut items = self.inner.store.list().await?;
        items.sort_by_key(|item| Reverse(item.updated_at()));
        items.truncate(limit);
        Ok(items)
    }

    pub async fn counts(&self) -> Result<StatusCounts, QueueError> {
        let items = self.inner.store.list().await?;
        Ok(items.iter().map(ContentItem::status).collect())
    }

    /// Ids the sweep should try at `now`, oldest due first. Reads only
    /// approved and scheduled items.
    pub async fn due(&self, now: Timestamp, include_approved: bool) -> Result<Vec<Uuid>, QueueError> {
        let statuses: &[ContentStatus] = if include_approved {
            &[ContentStatus::Approved, ContentStatus::Scheduled]
        } else {
            &[ContentStatus::Scheduled]
        };
        let mut due: Vec<ContentItem> = self
            .inner
            .store
            .list_by_status(statuses)
            .await?
            .into_iter()
            .filter(|item| item.is_due(now, include_approved))
            .collect();
        due.sort_by_key(|item| item.publish_at().unwrap_or(item.updated_at()));
        Ok(due.into_iter().map(|item| item.id).collect())
    }

    // ── Internals ───────────────────────────────────────────────────────

    async fn transition<F>(&self, id: Uuid, action: Action, apply: F) -> Result<ContentItem, QueueError>
    where
        F: FnOnce(&mut ContentItem, Timestamp) -> Result<(), LifecycleError>,
    {
        let _guard = self.inner.lock_item(id).await;
        let VersionedItem { mut item, etag } = self.inner.load(id).await?;
        let from = item.status();
        apply(&mut item, Timestamp::now())?;
        self.inner.store.save(&item, &etag).await?;

        AuditEvent::new(action.as_str(), id, Actor::Reviewer, item.status())
            .from_status(from)
            .emit();
        Ok(item)
    }

    /// Posting and recording the post run on their own task, so a caller
    /// that goes away mid-publish cannot leave a live post unrecorded.
    async fn publish_detached(
        &self,
        id: Uuid,
        actor: Actor,
        due_check: Option<(Timestamp, bool)>,
    ) -> Result<Option<ContentItem>, QueueError> {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let _guard = inner.lock_item(id).await;
            inner.publish_item(id, actor, due_check).await
        })
        .await
        .map_err(|e| QueueError::Task(e.to_string()))?
    }
}

impl Inner {
    async fn load(&self, id: Uuid) -> Result<VersionedItem, QueueError> {
        self.store.load(id).await?.ok_or(QueueError::NotFound(id))
    }

    async fn lock_item(&self, id: Uuid) -> ItemGuard<'_> {
        let lock = self.locks.entry(id).or_default().clone();
        let guard = lock.lock_owned().await;
        ItemGuard {
            locks: &self.locks,
            id,
            guard: Some(guard),
        }
    }

    async fn publish_item(
        &self,
        id: Uuid,
        actor: Actor,
        due_check: Option<(Timestamp, bool)>,
    ) -> Result<Option<ContentItem>, QueueError> {
        let VersionedItem { mut item, etag } = self.load(id).await?;
        if let Some((now, include_approved)) = due_check {
            if !item.is_due(now, include_approved) {
                return Ok(None);
            }
        }
        item.check(Action::Publish)?;
        let from = item.status();

        let receipt = match self.publisher.publish(&item).await {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(item_id = %id, actor = actor.as_str(), error = %e, "publish failed");
                if let PublishError::Partial { posted, .. } = &e {
                    self.record_progress(item, &etag, posted.clone()).await;
                }
                return Err(QueueError::PublisherFailure(e));
            }
        };

        let url = receipt.url.clone();
        item.mark_published(receipt.into(), Timestamp::now())?;
        if let Err(e) = self.store.save(&item, &etag).await {
            // The post is live but the item still shows its old status.
            error!(item_id = %id, url = %url, error = %e, "published but failed to record");
            return Err(e.into());
        }

        AuditEvent::new(Action::Publish.as_str(), id, actor, item.status())
            .from_status(from)
            .with_details(json!({ "url": url }))
            .emit();
        Ok(Some(item))
    }

    /// Keep the ids of thread parts that went live so the next attempt
    /// continues after them instead of posting them again.
    async fn record_progress(&self, mut item: ContentItem, etag: &str, posted: Vec<String>) {
        let id = item.id;
        let parts = posted.len();
        if let Err(e) = item.record_partial_post(posted) {
            warn!(item_id = %id, error = %e, "cannot record thread progress");
            return;
        }
        match self.store.save(&item, etag).await {
            Ok(_) => info!(item_id = %id, posted_parts = parts, "recorded partial thread"),
            Err(e) => {
                error!(item_id = %id, posted_parts = parts, error = %e, "failed to record partial thread")
            }
        }
    }
}
