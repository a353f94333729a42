//! Lifecycle transitions of a [`ContentItem`].
//!
//! Every method validates its input first, then checks the current status
//! against [`ContentStatus::can_transition_to`], and only then mutates. A
//! failed call leaves the item exactly as it was.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LifecycleError;
use crate::models::item::{optional_text, require_text, ContentItem, EditEntry};
use crate::models::status::ContentStatus;

/// A user- or sweep-initiated operation on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Approve,
    Reject,
    Edit,
    Schedule,
    Unschedule,
    Publish,
}

impl Action {
    /// Status the item moves to, or `None` for actions that keep it in place.
    fn target(self) -> Option<ContentStatus> {
        match self {
            Action::Approve => Some(ContentStatus::Approved),
            Action::Reject => Some(ContentStatus::Rejected),
            Action::Edit => None,
            Action::Schedule => Some(ContentStatus::Scheduled),
            Action::Unschedule => Some(ContentStatus::Pending),
            Action::Publish => Some(ContentStatus::Published),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Approve => "approve",
            Action::Reject => "reject",
            Action::Edit => "edit",
            Action::Schedule => "schedule",
            Action::Unschedule => "unschedule",
            Action::Publish => "publish",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the platform reported back after a successful post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedPost {
    pub url: String,
    pub post_id: Option<String>,
}

impl ContentItem {
    /// Fail with `InvalidTransition` unless `action` is legal from the
    /// current status.
    pub fn check(&self, action: Action) -> Result<(), LifecycleError> {
        let allowed = match action.target() {
            Some(next) => self.status.can_transition_to(next),
            // Edits keep the item pending.
            None => self.status == ContentStatus::Pending,
        };
        if allowed {
            Ok(())
        } else {
            Err(LifecycleError::InvalidTransition {
                action,
                from: self.status,
            })
        }
    }

    pub fn approve(
        &mut self,
        feedback: Option<&str>,
        now: jiff::Timestamp,
    ) -> Result<(), LifecycleError> {
        self.check(Action::Approve)?;
        self.status = ContentStatus::Approved;
        self.approval_feedback = optional_text(feedback);
        self.updated_at = now;
        Ok(())
    }

    pub fn reject(&mut self, reason: &str, now: jiff::Timestamp) -> Result<(), LifecycleError> {
        let reason = require_text(reason, "a rejection reason is required")?;
        self.check(Action::Reject)?;
        self.status = ContentStatus::Rejected;
        self.rejection_reason = Some(reason);
        self.updated_at = now;
        Ok(())
    }

    pub fn edit(
        &mut self,
        new_content: &str,
        notes: Option<&str>,
        now: jiff::Timestamp,
    ) -> Result<(), LifecycleError> {
        let new_content = require_text(new_content, "edited content must not be empty")?;
        self.check(Action::Edit)?;
        let previous_content = std::mem::replace(&mut self.content, new_content);
        self.edit_history.push(EditEntry {
            timestamp: now,
            notes: optional_text(notes),
            previous_content,
        });
        self.updated_at = now;
        Ok(())
    }

    /// Schedule an approved item. A `publish_at` in the past is accepted;
    /// the item is simply due on the next sweep.
    pub fn schedule(
        &mut self,
        publish_at: jiff::Timestamp,
        now: jiff::Timestamp,
    ) -> Result<(), LifecycleError> {
        self.check(Action::Schedule)?;
        self.status = ContentStatus::Scheduled;
        self.metadata.publish_at = Some(publish_at);
        self.updated_at = now;
        Ok(())
    }

    /// Return a scheduled item to review.
    pub fn unschedule(&mut self, now: jiff::Timestamp) -> Result<(), LifecycleError> {
        self.check(Action::Unschedule)?;
        self.status = ContentStatus::Pending;
        self.metadata.publish_at = None;
        self.approval_feedback = None;
        self.updated_at = now;
        Ok(())
    }

    /// Record a successful post. Status, URL and post id change together.
    pub fn mark_published(
        &mut self,
        post: PublishedPost,
        now: jiff::Timestamp,
    ) -> Result<(), LifecycleError> {
        let url = require_text(&post.url, "published url must not be empty")?;
        self.check(Action::Publish)?;
        self.status = ContentStatus::Published;
        self.metadata.published_url = Some(url);
        self.metadata.published_at = Some(now);
        self.metadata.platform_post_id = post.post_id;
        self.metadata.posted_parts.clear();
        self.updated_at = now;
        Ok(())
    }

    /// Remember the thread parts that went live before a publish failed.
    /// Status stays as it is; the next publish continues after these posts.
    pub fn record_partial_post(&mut self, post_ids: Vec<String>) -> Result<(), LifecycleError> {
        self.check(Action::Publish)?;
        self.metadata.posted_parts = post_ids;
        Ok(())
    }
}
