#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::Router;
use jiff::tz::TimeZone;
use tower::ServiceExt;
use uuid::Uuid;

use freyja_ai::SimulatedGenerator;
use freyja_core::models::item::ContentItem;
use freyja_core::models::metadata::ItemMetadata;
use freyja_core::models::status::{ContentSource, ContentType};
use freyja_dashboard::views::Views;
use freyja_dashboard::{router, AppState};
use freyja_publish::error::PublishError;
use freyja_publish::{PublishReceipt, Publisher, PublisherStatus, SimulatedPublisher};
use freyja_queue::sweep::AutoPublishConfig;
use freyja_queue::ApprovalQueue;
use freyja_review::brand::{BrandGuidelines, BrandVoiceChecker};
use freyja_storage::error::StorageError;
use freyja_storage::memory::MemoryStore;
use freyja_storage::store::{ItemStore, VersionedItem};

pub struct TestApp {
    pub router: Router,
    pub queue: Arc<ApprovalQueue>,
}

pub struct Reply {
    pub status: StatusCode,
    pub location: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl Reply {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

pub fn app() -> TestApp {
    app_with(Arc::new(MemoryStore::new()), Arc::new(SimulatedPublisher::new()))
}

pub fn app_with(store: Arc<dyn ItemStore>, publisher: Arc<dyn Publisher>) -> TestApp {
    let queue = Arc::new(ApprovalQueue::new(store, publisher));
    let state = AppState {
        queue: Arc::clone(&queue),
        generator: Arc::new(SimulatedGenerator::new()),
        checker: Arc::new(BrandVoiceChecker::new(BrandGuidelines::default()).unwrap()),
        views: Arc::new(Views::new(TimeZone::UTC).unwrap()),
        auto_publish: Some(AutoPublishConfig::default()),
    };
    TestApp {
        router: router(state),
        queue,
    }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> Reply {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let header = |name: HeaderName| {
            resp.headers()
                .get(name)
                .map(|v| v.to_str().unwrap().to_string())
        };
        let status = resp.status();
        let location = header(LOCATION);
        let content_type = header(CONTENT_TYPE);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        Reply {
            status,
            location,
            content_type,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn get(&self, uri: &str) -> Reply {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> Reply {
        let req = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(req).await
    }

    pub async fn post_json(&self, uri: &str, value: serde_json::Value) -> Reply {
        let req = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap();
        self.send(req).await
    }

    pub async fn post_empty(&self, uri: &str) -> Reply {
        let req = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(req).await
    }

    /// Submit straight through the queue, skipping the HTTP layer.
    pub async fn submit(&self, text: &str) -> Uuid {
        self.queue
            .submit(
                text,
                ContentType::Tweet,
                ContentSource::Manual,
                ItemMetadata::default(),
            )
            .await
            .unwrap()
            .id
    }

    pub async fn approved(&self, text: &str) -> Uuid {
        let id = self.submit(text).await;
        self.queue.approve(id, None).await.unwrap();
        id
    }

    pub async fn item(&self, id: Uuid) -> ContentItem {
        self.queue.get(id).await.unwrap()
    }
}

/// Store whose reachability check always fails.
#[derive(Default)]
pub struct UnreachableStore {
    inner: MemoryStore,
}

#[async_trait]
impl ItemStore for UnreachableStore {
    fn backend(&self) -> &'static str {
        "s3"
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
        self.inner.list().await
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Err(StorageError::HeadBucket("connection refused".to_string()))
    }
}

/// Publisher that never succeeds.
pub struct DownPublisher;

#[async_trait]
impl Publisher for DownPublisher {
    async fn publish(&self, _item: &ContentItem) -> Result<PublishReceipt, PublishError> {
        Err(PublishError::Api {
            status: 503,
            body: "over capacity".to_string(),
        })
    }

    async fn status(&self) -> PublisherStatus {
        PublisherStatus {
            platform: "twitter".to_string(),
            mode: "live".to_string(),
            connected: false,
            username: None,
            message: "down".to_string(),
        }
    }

    async fn connect(&self) -> Result<PublisherStatus, PublishError> {
        Err(PublishError::NotConnected)
    }

    async fn disconnect(&self) {}
}
