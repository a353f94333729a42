use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use freyja_core::models::status::ContentStatus;

/// Who caused a lifecycle change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    Reviewer,
    AutoPublisher,
}

impl Actor {
    pub fn as_str(self) -> &'static str {
        match self {
            Actor::Reviewer => "reviewer",
            Actor::AutoPublisher => "auto_publisher",
        }
    }
}

/// A structured record of one committed change to an item.
///
/// Emitted via `tracing` so it lands in the same log stream as the rest of
/// the service.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: String,
    pub item_id: Uuid,
    pub actor: Actor,
    pub from: Option<ContentStatus>,
    pub to: ContentStatus,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(action: impl Into<String>, item_id: Uuid, actor: Actor, to: ContentStatus) -> Self {
        Self {
            action: action.into(),
            item_id,
            actor,
            from: None,
            to,
            details: None,
        }
    }

    pub fn from_status(mut self, from: ContentStatus) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn emit(&self) {
        let from = self.from.map(ContentStatus::as_str).unwrap_or("none");
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        info!(
            audit.action = %self.action,
            audit.item_id = %self.item_id,
            audit.actor = self.actor.as_str(),
            audit.from = from,
            audit.to = self.to.as_str(),
            audit.details = %details,
            "audit event"
        );
    }
}
