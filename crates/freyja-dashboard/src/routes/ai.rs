use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::info;

use freyja_ai::{GenerateRequest, GeneratedContent, GeneratorStatus};

use crate::error::ApiError;
use crate::form::JsonOrForm;
use crate::state::AppState;

#[derive(Serialize)]
pub struct GenerateResponse {
    success: bool,
    #[serde(flatten)]
    generated: GeneratedContent,
}

pub async fn generate(
    State(state): State<AppState>,
    JsonOrForm(req): JsonOrForm<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let generated = state.generator.generate(&req).await?;
    info!(
        provider = %generated.provider,
        content_type = %generated.content_type,
        characters = generated.character_count,
        "draft generated"
    );
    Ok(Json(GenerateResponse {
        success: true,
        generated,
    }))
}

pub async fn status(State(state): State<AppState>) -> Json<GeneratorStatus> {
    Json(state.generator.status())
}
