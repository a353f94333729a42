//! Form actions. Each runs one queue operation and redirects (303) to the
//! page that shows the result; failures render an error page instead.

use axum::extract::{Form, State};
use axum::response::Redirect;
use serde::Deserialize;
use tracing::warn;
use crate::error::PageError;
use crate::extract::PageItemId;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ApproveForm {
    #[serde(default)]
    feedback: Option<String>,
}

#[derive(Deserialize)]
pub struct RejectForm {
    #[serde(default)]
    reason: String,
}

#[derive(Deserialize)]
pub struct EditForm {
    #[serde(default)]
    edited_content: String,
    #[serde(default)]
    edit_notes: Option<String>,
}

#[derive(Deserialize)]
pub struct ScheduleForm {
    #[serde(default)]
    publish_at: String,
}

pub async fn approve(
    State(state): State<AppState>,
    PageItemId(id): PageItemId,
    Form(form): Form<ApproveForm>,
) -> Result<Redirect, PageError> {
    state.queue.approve(id, form.feedback.as_deref()).await?;
    Ok(Redirect::to("/queue"))
}

pub async fn reject(
    State(state): State<AppState>,
    PageItemId(id): PageItemId,
    Form(form): Form<RejectForm>,
) -> Result<Redirect, PageError> {
    state.queue.reject(id, &form.reason).await?;
    Ok(Redirect::to("/queue"))
}

pub async fn edit(
    State(state): State<AppState>,
    PageItemId(id): PageItemId,
    Form(form): Form<EditForm>,
) -> Result<Redirect, PageError> {
    let notes = form.edit_notes.as_deref().filter(|n| !n.trim().is_empty());
    let item = state.queue.edit(id, &form.edited_content, notes).await?;

    // The edit is already committed; a failed re-score keeps the old annotations.
    let annotations = state.annotations_for(item.content(), item.content_type);
    if let Err(e) = state.queue.annotate(id, annotations).await {
        warn!(item_id = %id, error = %e, "re-annotation after edit failed");
    }
    Ok(Redirect::to(&format!("/review/{id}")))
}

pub async fn publish(
    State(state): State<AppState>,
    PageItemId(id): PageItemId,
) -> Result<Redirect, PageError> {
    state.queue.publish(id).await?;
    Ok(Redirect::to("/queue?status=published"))
}

pub async fn schedule(
    State(state): State<AppState>,
    PageItemId(id): PageItemId,
    Form(form): Form<ScheduleForm>,
) -> Result<Redirect, PageError> {
    let publish_at = state.views.parse_time(&form.publish_at)?;
    state.queue.schedule(id, publish_at).await?;
    Ok(Redirect::to("/queue?status=scheduled"))
}

pub async fn unschedule(
    State(state): State<AppState>,
    PageItemId(id): PageItemId,
) -> Result<Redirect, PageError> {
    state.queue.unschedule(id).await?;
    Ok(Redirect::to("/queue?status=pending"))
}
