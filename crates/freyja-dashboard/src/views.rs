//! Server-rendered pages.
//!
//! Templates are compiled into the binary and rendered with Tera, which
//! HTML-escapes every value interpolated into an `.html` template. The
//! view structs below flatten a [`ContentItem`] into display strings so
//! templates stay free of formatting logic.

use axum::response::Html;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use jiff::Timestamp;
use serde::Serialize;
use tera::{Context, Tera};

use freyja_core::lifecycle::Action;
use freyja_core::models::item::ContentItem;
use freyja_core::text::truncate_chars;

use crate::error::ApiError;

const PREVIEW_CHARS: usize = 120;
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M %Z";
const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

const TEMPLATES: [(&str, &str); 6] = [
    ("base.html", include_str!("../templates/base.html")),
    ("dashboard.html", include_str!("../templates/dashboard.html")),
    ("queue.html", include_str!("../templates/queue.html")),
    ("review_item.html", include_str!("../templates/review_item.html")),
    ("schedule.html", include_str!("../templates/schedule.html")),
    ("analytics.html", include_str!("../templates/analytics.html")),
];

pub struct Views {
    tera: Tera,
    time_zone: TimeZone,
}

impl Views {
    pub fn new(time_zone: TimeZone) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera, time_zone })
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    pub fn render(&self, name: &str, context: &Context) -> Result<Html<String>, ApiError> {
        Ok(Html(self.tera.render(name, context)?))
    }

    pub fn format_time(&self, at: Timestamp) -> String {
        at.to_zoned(self.time_zone.clone())
            .strftime(DISPLAY_FORMAT)
            .to_string()
    }

    /// Value for an `<input type="datetime-local">` in the display zone.
    pub fn input_time(&self, at: Timestamp) -> String {
        at.to_zoned(self.time_zone.clone())
            .strftime(INPUT_FORMAT)
            .to_string()
    }

    /// Parse a publish time: RFC 3339 with an offset, or a local
    /// `YYYY-MM-DDTHH:MM[:SS]` read in the display zone.
    pub fn parse_time(&self, input: &str) -> Result<Timestamp, ApiError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ApiError::BadRequest("publish_at is required".to_string()));
        }
        if let Ok(at) = input.parse::<Timestamp>() {
            return Ok(at);
        }
        let civil: DateTime = input.parse().map_err(|_| {
            ApiError::BadRequest(format!(
                "publish_at must be RFC 3339 or YYYY-MM-DDTHH:MM, got {input:?}"
            ))
        })?;
        civil
            .to_zoned(self.time_zone.clone())
            .map(|zoned| zoned.timestamp())
            .map_err(|e| ApiError::BadRequest(format!("invalid local time {input:?}: {e}")))
    }

    pub fn item(&self, item: &ContentItem) -> ItemView {
        let metadata = item.metadata();
        ItemView {
            id: item.id.to_string(),
            short_id: item.id.simple().to_string()[..8].to_string(),
            content: item.content().to_string(),
            preview: truncate_chars(item.content(), PREVIEW_CHARS),
            char_count: item.content().chars().count(),
            content_type: item.content_type.as_str(),
            source: item.source.as_str(),
            status: item.status().as_str(),
            created_at: self.format_time(item.created_at),
            updated_at: self.format_time(item.updated_at()),
            approval_feedback: item.approval_feedback().map(str::to_string),
            rejection_reason: item.rejection_reason().map(str::to_string),
            published_url: item.published_url().map(str::to_string),
            published_at: metadata.published_at.map(|at| self.format_time(at)),
            publish_at: item.publish_at().map(|at| self.format_time(at)),
            topic: metadata.topic.clone(),
            tone: metadata.tone.clone(),
            overall_score: item.quality_scores.map(|scores| scores.overall),
            compliance: item
                .brand_compliance
                .as_ref()
                .map(|compliance| compliance.level.as_str()),
            edits: item
                .edit_history()
                .iter()
                .rev()
                .map(|entry| EditView {
                    at: self.format_time(entry.timestamp),
                    notes: entry.notes.clone(),
                    previous_content: entry.previous_content.clone(),
                })
                .collect(),
            actions: ActionsView::for_item(item),
        }
    }

    pub fn items<'a>(&self, items: impl IntoIterator<Item = &'a ContentItem>) -> Vec<ItemView> {
        items.into_iter().map(|item| self.item(item)).collect()
    }
}

#[derive(Debug, Serialize)]
pub struct ItemView {
    pub id: String,
    pub short_id: String,
    pub content: String,
    pub preview: String,
    pub char_count: usize,
    pub content_type: &'static str,
    pub source: &'static str,
    pub status: &'static str,
    pub created_at: String,
    pub updated_at: String,
    pub approval_feedback: Option<String>,
    pub rejection_reason: Option<String>,
    pub published_url: Option<String>,
    pub published_at: Option<String>,
    pub publish_at: Option<String>,
    pub topic: Option<String>,
    pub tone: Option<String>,
    pub overall_score: Option<f64>,
    pub compliance: Option<&'static str>,
    /// Newest first.
    pub edits: Vec<EditView>,
    pub actions: ActionsView,
}

#[derive(Debug, Serialize)]
pub struct EditView {
    pub at: String,
    pub notes: Option<String>,
    pub previous_content: String,
}

/// Which buttons a page may offer for an item.
#[derive(Debug, Serialize)]
pub struct ActionsView {
    pub approve: bool,
    pub reject: bool,
    pub edit: bool,
    pub publish: bool,
    pub schedule: bool,
    pub unschedule: bool,
}

impl ActionsView {
    fn for_item(item: &ContentItem) -> Self {
        let allowed = |action| item.check(action).is_ok();
        Self {
            approve: allowed(Action::Approve),
            reject: allowed(Action::Reject),
            edit: allowed(Action::Edit),
            publish: allowed(Action::Publish),
            schedule: allowed(Action::Schedule),
            unschedule: allowed(Action::Unschedule),
        }
    }
}
