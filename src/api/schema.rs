//! Schema and preview API endpoints.

use axum::{extract::State, Json};
use serde::Serialize;

use super::{success, ApiResult};
use crate::models::{BlockConfig, TeamMembersReference};
use crate::schema::{all_schemas, prepare_block, prepare_reference, PreviewProjection, SchemaType};
use crate::AppState;

/// Schema registration payload for a host type registry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaRegistry {
    pub types: Vec<SchemaType>,
}

/// GET /api/schema - All schema types this service declares.
pub async fn get_schemas(State(state): State<AppState>) -> ApiResult<SchemaRegistry> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);
    success(
        SchemaRegistry {
            types: all_schemas(),
        },
        revision_id,
    )
}

/// POST /api/preview/block - Authoring preview for a block configuration.
pub async fn preview_block(
    State(state): State<AppState>,
    Json(config): Json<BlockConfig>,
) -> ApiResult<PreviewProjection> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);
    success(prepare_block(&config.into_canonical()), revision_id)
}

/// POST /api/preview/reference - Authoring preview for a reference field.
pub async fn preview_reference(
    State(state): State<AppState>,
    Json(reference): Json<TeamMembersReference>,
) -> ApiResult<PreviewProjection> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);
    success(prepare_reference(&reference), revision_id)
}
