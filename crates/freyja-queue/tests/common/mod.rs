#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use freyja_core::models::item::ContentItem;
use freyja_core::models::metadata::ItemMetadata;
use freyja_core::models::status::{ContentSource, ContentStatus, ContentType};
use freyja_core::text::split_thread;
use freyja_publish::error::PublishError;
use freyja_publish::{PublishReceipt, Publisher, PublisherStatus};
use freyja_queue::ApprovalQueue;
use freyja_storage::error::StorageError;
use freyja_storage::memory::MemoryStore;
use freyja_storage::store::{ItemStore, VersionedItem};
use uuid::Uuid;

/// Publisher double: numbered `https://x.com/{n}` URLs, optional failure
/// for content containing a marker, optional delay per post.
#[derive(Default)]
pub struct StubPublisher {
    calls: AtomicUsize,
    fail_marker: Option<String>,
    delay: Duration,
}

impl StubPublisher {
    pub fn failing_on(marker: &str) -> Self {
        Self {
            fail_marker: Some(marker.to_string()),
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Publisher for StubPublisher {
    async fn publish(&self, item: &ContentItem) -> Result<PublishReceipt, PublishError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some(marker) = &self.fail_marker {
            if item.content().contains(marker.as_str()) {
                return Err(PublishError::Api {
                    status: 503,
                    body: "service unavailable".to_string(),
                });
            }
        }
        Ok(PublishReceipt {
            url: format!("https://x.com/{n}"),
            post_id: n.to_string(),
            username: "stub".to_string(),
            post_ids: vec![n.to_string()],
        })
    }

    async fn status(&self) -> PublisherStatus {
        PublisherStatus {
            platform: "stub".to_string(),
            mode: "simulation".to_string(),
            connected: true,
            username: Some("stub".to_string()),
            message: String::new(),
        }
    }

    async fn connect(&self) -> Result<PublisherStatus, PublishError> {
        Ok(self.status().await)
    }

    async fn disconnect(&self) {}
}

fn stub_status() -> PublisherStatus {
    PublisherStatus {
        platform: "stub".to_string(),
        mode: "simulation".to_string(),
        connected: true,
        username: Some("stub".to_string()),
        message: String::new(),
    }
}

/// Posts threads part by part, resuming after `posted_parts` like the real
/// platform publisher. The first attempt at `fail_once_on` fails.
pub struct ThreadPublisher {
    fail_once_on: String,
    failed: AtomicBool,
    posted: Mutex<Vec<String>>,
}

impl ThreadPublisher {
    pub fn failing_once_on(part: &str) -> Self {
        Self {
            fail_once_on: part.to_string(),
            failed: AtomicBool::new(false),
            posted: Mutex::new(Vec::new()),
        }
    }

    /// Every part text that went live, in posting order.
    pub fn posted(&self) -> Vec<String> {
        self.posted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for ThreadPublisher {
    async fn publish(&self, item: &ContentItem) -> Result<PublishReceipt, PublishError> {
        let mut post_ids = item.metadata().posted_parts.clone();
        for part in split_thread(item.content()).into_iter().skip(post_ids.len()) {
            if part == self.fail_once_on && !self.failed.swap(true, Ordering::SeqCst) {
                let source = PublishError::Api {
                    status: 500,
                    body: "try again".to_string(),
                };
                return Err(PublishError::Partial {
                    posted: post_ids,
                    source: Box::new(source),
                });
            }
            let mut posted = self.posted.lock().unwrap();
            posted.push(part.to_string());
            post_ids.push(posted.len().to_string());
        }
        Ok(PublishReceipt {
            url: format!("https://x.com/{}", post_ids[0]),
            post_id: post_ids[0].clone(),
            username: "stub".to_string(),
            post_ids,
        })
    }

    async fn status(&self) -> PublisherStatus {
        stub_status()
    }

    async fn connect(&self) -> Result<PublisherStatus, PublishError> {
        Ok(stub_status())
    }

    async fn disconnect(&self) {}
}

/// Memory store that counts full listings.
#[derive(Default)]
pub struct ScanCountingStore {
    inner: MemoryStore,
    full_scans: AtomicUsize,
}

impl ScanCountingStore {
    pub fn full_scans(&self) -> usize {
        self.full_scans.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ItemStore for ScanCountingStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn load(&self, id: Uuid) -> Result<Option<VersionedItem>, StorageError> {
        self.inner.load(id).await
    }

    async fn insert(&self, item: &ContentItem) -> Result<String, StorageError> {
        self.inner.insert(item).await
    }

    async fn save(&self, item: &ContentItem, expected_etag: &str) -> Result<String, StorageError> {
        self.inner.save(item, expected_etag).await
    }

    async fn list(&self) -> Result<Vec<ContentItem>, StorageError> {
        self.full_scans.fetch_add(1, Ordering::SeqCst);
        self.inner.list().await
    }

    async fn list_by_status(
        &self,
        statuses: &[ContentStatus],
    ) -> Result<Vec<ContentItem>, StorageError> {
        self.inner.list_by_status(statuses).await
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

pub fn queue_on(store: Arc<dyn ItemStore>, publisher: Arc<dyn Publisher>) -> ApprovalQueue {
    ApprovalQueue::new(store, publisher)
}

pub async fn submit_thread(queue: &ApprovalQueue, text: &str) -> ContentItem {
    queue
        .submit(text, ContentType::Thread, ContentSource::Manual, ItemMetadata::default())
        .await
        .unwrap()
}

pub fn queue_with(publisher: Arc<StubPublisher>) -> ApprovalQueue {
    ApprovalQueue::new(Arc::new(MemoryStore::new()), publisher)
}

pub async fn submit(queue: &ApprovalQueue, text: &str) -> ContentItem {
    queue
        .submit(text, ContentType::Tweet, ContentSource::Manual, ItemMetadata::default())
        .await
        .unwrap()
}
