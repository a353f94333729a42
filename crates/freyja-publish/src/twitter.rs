//! X (Twitter) API v2 publisher.

use async_trait::async_trait;
use freyja_core::models::item::ContentItem;
use freyja_core::models::status::ContentType;
use freyja_core::text::split_thread;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::PublishError;
use crate::oauth::{self, Credentials};
use crate::{PublishReceipt, Publisher, PublisherStatus};

pub const DEFAULT_API_BASE: &str = "https://api.twitter.com";

/// App and account credentials plus the API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwitterConfig {
    pub api_base: String,
    pub credentials: Credentials,
}

impl TwitterConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            credentials,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Clone)]
struct Session {
    credentials: Credentials,
    username: Option<String>,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct CreatedTweet {
    id: String,
}

#[derive(Deserialize)]
struct Me {
    username: String,
}

pub struct TwitterPublisher {
    http: reqwest::Client,
    config: TwitterConfig,
    session: RwLock<Option<Session>>,
}

impl TwitterPublisher {
    /// Starts connected with the configured account tokens. The username is
    /// resolved lazily on first publish or on `connect`.
    pub fn new(config: TwitterConfig) -> Self {
        let session = Session {
            credentials: config.credentials.clone(),
            username: None,
        };
        Self {
            http: reqwest::Client::new(),
            config,
            session: RwLock::new(Some(session)),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_base)
    }

    fn authorization(
        &self,
        credentials: &Credentials,
        method: &str,
        url: &str,
    ) -> Result<String, PublishError> {
        oauth::authorization_header(
            credentials,
            method,
            url,
            &[],
            &oauth::nonce(),
            jiff::Timestamp::now().as_second(),
        )
    }

    async fn post_tweet(
        &self,
        credentials: &Credentials,
        text: &str,
        in_reply_to: Option<&str>,
    ) -> Result<String, PublishError> {
        let url = self.url("/2/tweets");
        let mut body = json!({ "text": text });
        if let Some(parent) = in_reply_to {
            body["reply"] = json!({ "in_reply_to_tweet_id": parent });
        }

        let response = self
            .http
            .post(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                self.authorization(credentials, "POST", &url)?,
            )
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let created: Envelope<CreatedTweet> = response
            .json()
            .await
            .map_err(|e| PublishError::ResponseParse(e.to_string()))?;
        Ok(created.data.id)
    }

    async fn fetch_username(&self, credentials: &Credentials) -> Result<String, PublishError> {
        let url = self.url("/2/users/me");
        let response = self
            .http
            .get(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                self.authorization(credentials, "GET", &url)?,
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let me: Envelope<Me> = response
            .json()
            .await
            .map_err(|e| PublishError::ResponseParse(e.to_string()))?;
        Ok(me.data.username)
    }

    /// Cached username, fetched and stored on first use.
    async fn username(&self, credentials: &Credentials) -> Result<String, PublishError> {
        if let Some(name) = self
            .session
            .read()
            .await
            .as_ref()
            .and_then(|s| s.username.clone())
        {
            return Ok(name);
        }

        let name = self.fetch_username(credentials).await?;
        if let Some(session) = self.session.write().await.as_mut() {
            session.username = Some(name.clone());
        }
        Ok(name)
    }
}

#[async_trait]
impl Publisher for TwitterPublisher {
    async fn publish(&self, item: &ContentItem) -> Result<PublishReceipt, PublishError> {
        let credentials = self
            .session
            .read()
            .await
            .as_ref()
            .map(|s| s.credentials.clone())
            .ok_or(PublishError::NotConnected)?;

        let parts = match item.content_type {
            ContentType::Thread => split_thread(item.content()),
            _ => vec![item.content().trim()],
        };
        if parts.iter().all(|p| p.is_empty()) {
            return Err(PublishError::EmptyContent);
        }

        let username = self.username(&credentials).await?;

        // Parts that went live on an earlier attempt are not posted again.
        let mut post_ids = item.metadata().posted_parts.clone();
        let resumed = post_ids.len();
        if resumed > 0 {
            info!(item_id = %item.id, resumed, "resuming partially posted thread");
        }
        for part in parts.iter().skip(resumed) {
            match self
                .post_tweet(&credentials, part, post_ids.last().map(String::as_str))
                .await
            {
                Ok(id) => post_ids.push(id),
                Err(e) if post_ids.is_empty() => return Err(e),
                Err(e) => {
                    warn!(item_id = %item.id, posted = post_ids.len(), error = %e, "thread stopped partway");
                    return Err(PublishError::Partial {
                        posted: post_ids,
                        source: Box::new(e),
                    });
                }
            }
        }

        let post_id = post_ids.first().cloned().ok_or(PublishError::EmptyContent)?;
        info!(
            item_id = %item.id,
            post_id = %post_id,
            posts = post_ids.len(),
            username = %username,
            "posted to twitter"
        );

        Ok(PublishReceipt {
            url: format!("https://twitter.com/{username}/status/{post_id}"),
            post_id,
            username,
            post_ids,
        })
    }

    async fn status(&self) -> PublisherStatus {
        let session = self.session.read().await;
        let username = session.as_ref().and_then(|s| s.username.clone());
        let connected = session.is_some();
        let message = match (&username, connected) {
            (Some(name), _) => format!("Connected as @{name}"),
            (None, true) => "Credentials configured".to_string(),
            (None, false) => "Disconnected".to_string(),
        };
        PublisherStatus {
            platform: "twitter".to_string(),
            mode: "live".to_string(),
            connected,
            username,
            message,
        }
    }

    async fn connect(&self) -> Result<PublisherStatus, PublishError> {
        let credentials = self.config.credentials.clone();
        match self.fetch_username(&credentials).await {
            Ok(username) => {
                info!(username = %username, "twitter account connected");
                *self.session.write().await = Some(Session {
                    credentials,
                    username: Some(username),
                });
                Ok(self.status().await)
            }
            Err(e) => {
                warn!(error = %e, "twitter credentials rejected");
                *self.session.write().await = None;
                Err(e)
            }
        }
    }

    async fn disconnect(&self) {
        *self.session.write().await = None;
        info!("twitter account disconnected");
    }
}
