use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use freyja_core::models::analytics::AnalyticsSummary;
use freyja_core::models::item::ContentItem;
use freyja_core::models::metadata::ItemMetadata;
use freyja_core::models::status::{ContentSource, ContentType, StatusFilter};

use crate::error::ApiError;
use crate::extract::ItemId;
use crate::form::JsonOrForm;
use crate::routes::{parse_or_default, status_filter};
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: usize = 50;

#[derive(Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    content: String,
    content_type: Option<String>,
    source: Option<String>,
    topic: Option<String>,
    tone: Option<String>,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    success: bool,
    item_id: Uuid,
    message: &'static str,
}

#[derive(Deserialize)]
pub struct ListParams {
    status: Option<String>,
    limit: Option<usize>,
}

pub async fn submit(
    State(state): State<AppState>,
    JsonOrForm(req): JsonOrForm<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let content_type: ContentType = parse_or_default(req.content_type.as_deref())?;
    let source: ContentSource = parse_or_default(req.source.as_deref())?;

    let mut metadata = ItemMetadata::default();
    if let Some(topic) = non_blank(req.topic) {
        metadata = metadata.with_topic(topic);
    }
    if let Some(tone) = non_blank(req.tone) {
        metadata = metadata.with_tone(tone);
    }

    let item = state
        .queue
        .submit(&req.content, content_type, source, metadata)
        .await?;

    let annotations = state.annotations_for(item.content(), item.content_type);
    if let Err(e) = state.queue.annotate(item.id, annotations).await {
        warn!(item_id = %item.id, error = %e, "annotating new item failed");
    }

    Ok(Json(SubmitResponse {
        success: true,
        item_id: item.id,
        message: "Content submitted successfully",
    }))
}

pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ContentItem>>, ApiError> {
    let filter = status_filter(params.status.as_deref(), StatusFilter::All)?;
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    Ok(Json(state.queue.list(filter, Some(limit)).await?))
}

pub async fn get_item(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<Json<ContentItem>, ApiError> {
    Ok(Json(state.queue.get(id).await?))
}

pub async fn analytics(State(state): State<AppState>) -> Result<Json<AnalyticsSummary>, ApiError> {
    Ok(Json(state.queue.counts().await?.summary()))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
