//! freyja-publish
//!
//! Posting approved content to the platform. [`Publisher`] is the seam the
//! queue publishes through; [`TwitterPublisher`] talks to the X API v2
//! with OAuth 1.0a user-context signing and [`SimulatedPublisher`] stands
//! in when no credentials are configured.

pub mod error;
pub mod oauth;
pub mod simulated;
pub mod twitter;

use async_trait::async_trait;
use freyja_core::lifecycle::PublishedPost;
use freyja_core::models::item::ContentItem;
use serde::{Deserialize, Serialize};

pub use simulated::SimulatedPublisher;
pub use twitter::{TwitterConfig, TwitterPublisher};

use crate::error::PublishError;

/// What the platform returned for a successful post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    pub url: String,
    /// Id of the first post; for threads, the head of the thread.
    pub post_id: String,
    pub username: String,
    /// Every post created, in order.
    pub post_ids: Vec<String>,
}

impl From<PublishReceipt> for PublishedPost {
    fn from(receipt: PublishReceipt) -> Self {
        PublishedPost {
            url: receipt.url,
            post_id: Some(receipt.post_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherStatus {
    pub platform: String,
    /// `live` or `simulation`.
    pub mode: String,
    pub connected: bool,
    pub username: Option<String>,
    pub message: String,
}

#[async_trait]
pub trait Publisher: Send + Sync {
    /// Post the item's content. Threads are posted part by part.
    async fn publish(&self, item: &ContentItem) -> Result<PublishReceipt, PublishError>;

    async fn status(&self) -> PublisherStatus;

    /// (Re)establish the account session and verify it.
    async fn connect(&self) -> Result<PublisherStatus, PublishError>;

    /// Drop the account session. Publishing fails until `connect`.
    async fn disconnect(&self);
}
