use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::{CompletionOutcome, TextCompletion};
use crate::training::exercises::{find_exercise, PromptExercise};
use crate::training::prompts::PROMPT_EVALUATION_TEMPLATE;

pub const EVALUATION_MAX_TOKENS: u32 = 600;

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub exercise_id: String,
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub exercise_id: String,
    /// Coach feedback, or the folded error text when the LLM call failed.
    pub feedback: String,
}

/// Asks the LLM to review a user-written prompt against one exercise.
pub async fn evaluate_prompt(
    llm: &dyn TextCompletion,
    request: EvaluateRequest,
) -> Result<EvaluateResponse, AppError> {
    let exercise = find_exercise(&request.exercise_id).ok_or_else(|| {
        AppError::NotFound(format!("Exercise {} not found", request.exercise_id))
    })?;

    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt cannot be empty".to_string()));
    }

    let evaluation_prompt = build_evaluation_prompt(exercise, &request.prompt);
    let result = llm
        .complete(&evaluation_prompt, EVALUATION_MAX_TOKENS)
        .await;
    let outcome = CompletionOutcome::from_result(result);

    Ok(EvaluateResponse {
        exercise_id: request.exercise_id,
        feedback: outcome.into_display_text(),
    })
}

fn build_evaluation_prompt(exercise: &PromptExercise, user_prompt: &str) -> String {
    let criteria = exercise
        .criteria
        .iter()
        .map(|c| format!("- {c}"))
        .collect::<Vec<_>>()
        .join("\n");

    PROMPT_EVALUATION_TEMPLATE
        .replace("{task}", exercise.task)
        .replace("{criteria}", &criteria)
        .replace("{prompt}", user_prompt)
}
