use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::state::AppState;
use crate::training::evaluator::{evaluate_prompt, EvaluateRequest, EvaluateResponse};
use crate::training::exercises::{PromptExercise, EXERCISE_BANK};
use crate::training::topics::{TrainingTopic, TRAINING_TOPICS};

/// GET /training/topics
pub async fn handle_list_topics() -> Json<&'static [TrainingTopic]> {
    Json(TRAINING_TOPICS)
}

/// GET /training/exercises
pub async fn handle_list_exercises() -> Json<&'static [PromptExercise]> {
    Json(EXERCISE_BANK)
}

/// POST /training/evaluate
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    Ok(Json(evaluate_prompt(state.llm.as_ref(), request).await?))
}
