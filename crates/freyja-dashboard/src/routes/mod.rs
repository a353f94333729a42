pub mod actions;
pub mod ai;
pub mod content;
pub mod health;
pub mod pages;
pub mod twitter;

use std::str::FromStr;

use axum::http::{StatusCode, Uri};
use axum::middleware as axum_mw;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use freyja_core::models::status::StatusFilter;

use crate::error::{error_page, ApiError};
use crate::middleware;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Pages
        .route("/", get(pages::dashboard))
        .route("/queue", get(pages::queue))
        .route("/review/{id}", get(pages::review))
        .route("/analytics", get(pages::analytics))
        .route("/schedule/{id}", get(pages::schedule_form).post(actions::schedule))
        // Form actions
        .route("/approve/{id}", post(actions::approve))
        .route("/reject/{id}", post(actions::reject))
        .route("/edit/{id}", post(actions::edit))
        .route("/publish/{id}", post(actions::publish))
        .route("/unschedule/{id}", post(actions::unschedule))
        // Publisher account
        .route("/twitter/login", get(twitter::login))
        .route("/twitter/disconnect", post(twitter::disconnect))
        // JSON API
        .route("/health", get(health::health_check))
        .route("/api/content", get(content::list_items))
        .route("/api/content/submit", post(content::submit))
        .route("/api/content/{id}", get(content::get_item))
        .route("/api/analytics", get(content::analytics))
        .route("/api/ai/generate", post(ai::generate))
        .route("/api/ai/status", get(ai::status))
        .route("/api/twitter/oauth/status", get(twitter::oauth_status))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum_mw::from_fn(middleware::audit::request_log))
                .layer(cors),
        )
        .with_state(state)
}

async fn not_found(uri: Uri) -> Response {
    if uri.path().starts_with("/api/") {
        return ApiError::NotFound(format!("no route for {}", uri.path())).into_response();
    }
    let page = error_page(StatusCode::NOT_FOUND, "The page you requested does not exist.");
    (StatusCode::NOT_FOUND, Html(page)).into_response()
}

/// `?status=` value, falling back to `default` when absent or blank.
pub(crate) fn status_filter(raw: Option<&str>, default: StatusFilter) -> Result<StatusFilter, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|e: freyja_core::error::ParseError| ApiError::BadRequest(e.to_string())),
    }
}

/// Parse an optional enum field, using its default when absent or blank.
pub(crate) fn parse_or_default<T>(raw: Option<&str>) -> Result<T, ApiError>
where
    T: FromStr + Default,
    T::Err: std::fmt::Display,
{
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(T::default()),
        Some(raw) => raw.parse().map_err(|e: T::Err| ApiError::BadRequest(e.to_string())),
    }
}
