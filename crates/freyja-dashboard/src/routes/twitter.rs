use axum::extract::State;
use axum::response::Redirect;
use axum::Json;
use tracing::info;

use freyja_publish::PublisherStatus;

use crate::error::PageError;
use crate::state::AppState;

pub async fn oauth_status(State(state): State<AppState>) -> Json<PublisherStatus> {
    Json(state.publisher().status().await)
}

/// Verify the configured account tokens and open a session.
pub async fn login(State(state): State<AppState>) -> Result<Redirect, PageError> {
    let status = state.publisher().connect().await?;
    info!(platform = %status.platform, username = ?status.username, "publisher connected");
    Ok(Redirect::to("/"))
}

pub async fn disconnect(State(state): State<AppState>) -> Redirect {
    state.publisher().disconnect().await;
    info!("publisher disconnected");
    Redirect::to("/")
}
