use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::journal::ReflectionRow;
use crate::reflection::generator::{answer_reflection, generate_reflection};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnswerReflectionRequest {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct ReflectionListResponse {
    pub reflections: Vec<ReflectionRow>,
}

/// POST /conversations/:id/reflections
pub async fn handle_create_reflection(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
) -> Result<Json<ReflectionRow>, AppError> {
    let reflection =
        generate_reflection(state.store.as_ref(), state.llm.as_ref(), conversation_id).await?;
    Ok(Json(reflection))
}

/// GET /conversations/:id/reflections
pub async fn handle_list_reflections(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
) -> Result<Json<ReflectionListResponse>, AppError> {
    state
        .store
        .get_conversation(conversation_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Conversation {conversation_id} not found")))?;
    let reflections = state.store.list_reflections(conversation_id).await?;
    Ok(Json(ReflectionListResponse { reflections }))
}

/// PUT /reflections/:id
pub async fn handle_answer_reflection(
    State(state): State<AppState>,
    Path(reflection_id): Path<Uuid>,
    Json(request): Json<AnswerReflectionRequest>,
) -> Result<Json<ReflectionRow>, AppError> {
    let reflection =
        answer_reflection(state.store.as_ref(), reflection_id, &request.response).await?;
    Ok(Json(reflection))
}
