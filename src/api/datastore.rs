//! Full-content export endpoints.
//!
//! The export is the authoring view of the member store: unlike the public
//! listings it carries every stored member, drafts and inactive entries
//! included, alongside the revision the snapshot was taken at.

use axum::extract::State;

use super::{error, success, ApiResult};
use crate::models::{Datastore, RevisionInfo};
use crate::AppState;

/// GET /api/datastore - Export all members with the current revision.
pub async fn get_datastore(State(state): State<AppState>) -> ApiResult<Datastore> {
    match state.repo.get_datastore().await {
        Ok(datastore) => {
            let revision_id = datastore.revision_id;
            success(datastore, revision_id)
        }
        Err(err) => error(err, 0),
    }
}

/// GET /api/datastore/revision - Current revision without the member payload.
pub async fn get_revision(State(state): State<AppState>) -> ApiResult<RevisionInfo> {
    match state.repo.get_revision_info().await {
        Ok(info) => {
            let revision_id = info.revision_id;
            success(info, revision_id)
        }
        Err(err) => error(err, 0),
    }
}
