use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::response::Html;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use tera::Context;

use freyja_core::lifecycle::Action;
use freyja_core::models::analytics::StatusCounts;
use freyja_core::models::annotations::Annotations;
use freyja_core::models::status::{ContentStatus, StatusFilter};
use freyja_queue::error::QueueError;

use crate::error::PageError;
use crate::extract::PageItemId;
use crate::routes::status_filter;
use crate::state::AppState;

const RECENT_ITEMS: usize = 5;

#[derive(Deserialize)]
pub struct QueueParams {
    status: Option<String>,
}

/// A labelled count: queue filter tabs and analytics breakdowns.
#[derive(Serialize)]
struct Tally {
    name: &'static str,
    count: u64,
}

pub async fn dashboard(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let counts = state.queue.counts().await?;
    let recent = state.queue.recent(RECENT_ITEMS).await?;

    let mut ctx = Context::new();
    ctx.insert("summary", &counts.summary());
    ctx.insert("recent", &state.views.items(&recent));
    ctx.insert("publisher", &state.publisher().status().await);
    ctx.insert("generator", &state.generator.status());
    Ok(state.views.render("dashboard.html", &ctx)?)
}

pub async fn queue(
    State(state): State<AppState>,
    Query(params): Query<QueueParams>,
) -> Result<Html<String>, PageError> {
    let filter = status_filter(
        params.status.as_deref(),
        StatusFilter::Only(ContentStatus::Pending),
    )?;
    let items = state.queue.list(filter, None).await?;
    let counts = state.queue.counts().await?;

    let filters: Vec<Tally> = ContentStatus::ALL
        .into_iter()
        .map(|status| Tally {
            name: status.as_str(),
            count: counts.get(status),
        })
        .chain(std::iter::once(Tally {
            name: "all",
            count: counts.total(),
        }))
        .collect();

    let mut ctx = Context::new();
    ctx.insert("filter", filter.as_str());
    ctx.insert("filters", &filters);
    ctx.insert("items", &state.views.items(&items));
    Ok(state.views.render("queue.html", &ctx)?)
}

pub async fn review(
    State(state): State<AppState>,
    PageItemId(id): PageItemId,
) -> Result<Html<String>, PageError> {
    let item = state.queue.get(id).await?;

    let stored = item.quality_scores.is_some() && item.brand_compliance.is_some();
    let annotations = if stored {
        Annotations {
            quality_scores: item.quality_scores,
            brand_compliance: item.brand_compliance.clone(),
            suggestions: item.suggestions.clone(),
        }
    } else {
        state.annotations_for(item.content(), item.content_type)
    };

    let mut ctx = Context::new();
    ctx.insert("item", &state.views.item(&item));
    ctx.insert("stored", &stored);
    ctx.insert("scores", &annotations.quality_scores);
    ctx.insert("compliance", &annotations.brand_compliance);
    ctx.insert("suggestions", &annotations.suggestions);
    Ok(state.views.render("review_item.html", &ctx)?)
}

pub async fn schedule_form(
    State(state): State<AppState>,
    PageItemId(id): PageItemId,
) -> Result<Html<String>, PageError> {
    let item = state.queue.get(id).await?;
    item.check(Action::Schedule).map_err(QueueError::from)?;

    let default_time = Timestamp::now() + SignedDuration::from_hours(1);
    let views = &state.views;

    let mut ctx = Context::new();
    ctx.insert("item", &views.item(&item));
    ctx.insert("time_zone", views.time_zone().iana_name().unwrap_or("UTC"));
    ctx.insert("default_time", &views.input_time(default_time));
    Ok(views.render("schedule.html", &ctx)?)
}

pub async fn analytics(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let items = state.queue.list(StatusFilter::All, None).await?;
    let counts: StatusCounts = items.iter().map(|item| item.status()).collect();

    let mut by_type: BTreeMap<&'static str, u64> = BTreeMap::new();
    let mut by_source: BTreeMap<&'static str, u64> = BTreeMap::new();
    let mut quality = Vec::new();
    for item in &items {
        *by_type.entry(item.content_type.as_str()).or_default() += 1;
        *by_source.entry(item.source.as_str()).or_default() += 1;
        if let Some(scores) = item.quality_scores {
            quality.push(scores.overall);
        }
    }
    let average_quality =
        (!quality.is_empty()).then(|| quality.iter().sum::<f64>() / quality.len() as f64);

    let breakdown = |map: BTreeMap<&'static str, u64>| {
        map.into_iter()
            .map(|(name, count)| Tally { name, count })
            .collect::<Vec<_>>()
    };

    let mut ctx = Context::new();
    ctx.insert("summary", &counts.summary());
    ctx.insert("by_type", &breakdown(by_type));
    ctx.insert("by_source", &breakdown(by_source));
    ctx.insert("average_quality", &average_quality);
    Ok(state.views.render("analytics.html", &ctx)?)
}
