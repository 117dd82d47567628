//! Render API endpoints: resolve a stored configuration's references and
//! produce a display-ready render tree.

use axum::{extract::State, Json};

use super::{error, success, ApiResult};
use crate::models::{BlockConfig, TeamMembersReference};
use crate::render::{render_members, CollectionRender, RenderOptions};
use crate::AppState;

/// POST /api/render/block - Render a rich-text block configuration.
///
/// Accepts both the canonical multi-member shape and the legacy
/// single-member shape. Responds with `data: null` when nothing renders
/// (all references dangling or all members inactive) - that is the silent
/// no-render contract, not an error.
pub async fn render_block(
    State(state): State<AppState>,
    Json(config): Json<BlockConfig>,
) -> ApiResult<Option<CollectionRender>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);
    let block = config.into_canonical();

    if let Err(e) = block.validate() {
        return error(e, revision_id);
    }

    match state.repo.resolve_members(&block.team_members).await {
        Ok(members) => {
            let options = RenderOptions::from(&block);
            let rendered = render_members(&members, &options, &state.config.images);
            success(rendered, revision_id)
        }
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/render/reference - Render a standalone reference field.
pub async fn render_reference(
    State(state): State<AppState>,
    Json(reference): Json<TeamMembersReference>,
) -> ApiResult<Option<CollectionRender>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if let Err(e) = reference.validate() {
        return error(e, revision_id);
    }

    match state.repo.resolve_members(&reference.team_members).await {
        Ok(members) => {
            let options = RenderOptions::from(&reference);
            let rendered = render_members(&members, &options, &state.config.images);
            success(rendered, revision_id)
        }
        Err(e) => error(e, revision_id),
    }
}
