use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::progress::UserProgressRow;
use crate::progress::tracker::{get_or_create, recompute, StageOutlook};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    #[serde(flatten)]
    pub progress: UserProgressRow,
    #[serde(flatten)]
    pub outlook: StageOutlook,
}

impl From<UserProgressRow> for ProgressResponse {
    fn from(progress: UserProgressRow) -> Self {
        let outlook = StageOutlook::for_progress(&progress);
        Self { progress, outlook }
    }
}

/// GET /progress/:user_id
pub async fn handle_get_progress(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProgressResponse>, AppError> {
    let progress = get_or_create(state.store.as_ref(), &user_id).await?;
    Ok(Json(progress.into()))
}

/// POST /progress/:user_id/update
///
/// Recounts conversations and answered reflections, then advances at most one stage.
pub async fn handle_update_progress(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProgressResponse>, AppError> {
    let progress = recompute(state.store.as_ref(), &user_id).await?;
    Ok(Json(progress.into()))
}
