use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::annotations::{Annotations, BrandCompliance, QualityScores};
use super::metadata::ItemMetadata;
use super::status::{ContentSource, ContentStatus, ContentType};
use crate::error::LifecycleError;

/// A unit of social-media content moving through the approval pipeline.
///
/// Lifecycle-owned fields are private: they change only through the
/// transition methods in [`crate::lifecycle`], which keep the status
/// invariants (a rejected item has a reason, a published item has a URL,
/// a scheduled item has a due time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: Uuid,
    pub(crate) content: String,
    pub content_type: ContentType,
    pub source: ContentSource,
    pub(crate) status: ContentStatus,
    pub created_at: jiff::Timestamp,
    pub(crate) updated_at: jiff::Timestamp,
    #[serde(default)]
    pub(crate) approval_feedback: Option<String>,
    #[serde(default)]
    pub(crate) rejection_reason: Option<String>,
    #[serde(default)]
    pub(crate) edit_history: Vec<EditEntry>,
    #[serde(default)]
    pub(crate) metadata: ItemMetadata,
    #[serde(default)]
    pub quality_scores: Option<QualityScores>,
    #[serde(default)]
    pub brand_compliance: Option<BrandCompliance>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// One entry of an item's append-only edit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditEntry {
    pub timestamp: jiff::Timestamp,
    pub notes: Option<String>,
    pub previous_content: String,
}

impl ContentItem {
    /// Create a new item in `pending`. Blank content is rejected.
    pub fn new(
        content: &str,
        content_type: ContentType,
        source: ContentSource,
        metadata: ItemMetadata,
        now: jiff::Timestamp,
    ) -> Result<Self, LifecycleError> {
        let content = require_text(content, "content must not be empty")?;
        Ok(Self {
            id: Uuid::new_v4(),
            content,
            content_type,
            source,
            status: ContentStatus::Pending,
            created_at: now,
            updated_at: now,
            approval_feedback: None,
            rejection_reason: None,
            edit_history: Vec::new(),
            metadata,
            quality_scores: None,
            brand_compliance: None,
            suggestions: Vec::new(),
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn status(&self) -> ContentStatus {
        self.status
    }

    pub fn updated_at(&self) -> jiff::Timestamp {
        self.updated_at
    }

    pub fn approval_feedback(&self) -> Option<&str> {
        self.approval_feedback.as_deref()
    }

    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    pub fn edit_history(&self) -> &[EditEntry] {
        &self.edit_history
    }

    pub fn metadata(&self) -> &ItemMetadata {
        &self.metadata
    }

    pub fn published_url(&self) -> Option<&str> {
        self.metadata.published_url.as_deref()
    }

    pub fn publish_at(&self) -> Option<jiff::Timestamp> {
        self.metadata.publish_at
    }

    /// Store an unknown metadata key. Known keys are lifecycle-owned and
    /// cannot be written through here.
    pub fn insert_extra(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.metadata.extra.insert(key.into(), value);
    }

    /// Replace the externally computed annotations. Never touches status.
    pub fn annotate(&mut self, annotations: Annotations) {
        self.quality_scores = annotations.quality_scores;
        self.brand_compliance = annotations.brand_compliance;
        self.suggestions = annotations.suggestions;
    }

    /// True when the sweep should publish this item at `now`.
    pub fn is_due(&self, now: jiff::Timestamp, include_approved: bool) -> bool {
        match self.status {
            ContentStatus::Approved => include_approved,
            ContentStatus::Scheduled => self.metadata.publish_at.is_some_and(|at| at <= now),
            _ => false,
        }
    }
}

/// Trim `text`, failing with `message` if nothing is left.
pub(crate) fn require_text(text: &str, message: &str) -> Result<String, LifecycleError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(LifecycleError::Validation(message.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Trim optional free text, mapping blank input to `None`.
pub(crate) fn optional_text(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
