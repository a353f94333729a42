use async_trait::async_trait;
use freyja_core::models::item::ContentItem;
use tracing::info;

use crate::error::PublishError;
use crate::{PublishReceipt, Publisher, PublisherStatus};

pub const DEMO_ACCOUNT: &str = "demo_account";

/// Pretends to post. Used when no platform credentials are configured.
#[derive(Debug, Default)]
pub struct SimulatedPublisher;

impl SimulatedPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Publisher for SimulatedPublisher {
    async fn publish(&self, item: &ContentItem) -> Result<PublishReceipt, PublishError> {
        let mut post_id = uuid::Uuid::new_v4().simple().to_string();
        post_id.truncate(10);
        info!(item_id = %item.id, post_id = %post_id, "simulated post");
        Ok(PublishReceipt {
            url: format!("https://twitter.com/{DEMO_ACCOUNT}/status/{post_id}"),
            post_ids: vec![post_id.clone()],
            post_id,
            username: DEMO_ACCOUNT.to_string(),
        })
    }

    async fn status(&self) -> PublisherStatus {
        PublisherStatus {
            platform: "twitter".to_string(),
            mode: "simulation".to_string(),
            connected: true,
            username: Some(DEMO_ACCOUNT.to_string()),
            message: "Simulation mode: configure TWITTER_* credentials to post for real"
                .to_string(),
        }
    }

    async fn connect(&self) -> Result<PublisherStatus, PublishError> {
        Ok(self.status().await)
    }

    async fn disconnect(&self) {}
}
