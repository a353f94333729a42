use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Typed extension data carried by a content item.
///
/// Known keys get their own fields; anything else lands in `extra` and is
/// flattened back into the same JSON object on serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<jiff::Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_post_id: Option<String>,
    /// Post ids of thread parts already live from a publish that stopped
    /// partway, in thread order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub posted_parts: Vec<String>,
    /// When a scheduled item becomes due.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_at: Option<jiff::Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ItemMetadata {
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }
}
