use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::TextCompletion;
use crate::models::journal::{MessageRow, ReflectionRow};
use crate::reflection::prompts::{FALLBACK_REFLECTION, REFLECTION_TEMPLATE};
use crate::store::JournalStore;

pub const REFLECTION_MAX_TOKENS: u32 = 200;
/// Only the most recent messages are sent to the LLM.
const HISTORY_WINDOW: usize = 12;

/// Generates a reflection question for a conversation and stores it unanswered.
pub async fn generate_reflection(
    store: &dyn JournalStore,
    llm: &dyn TextCompletion,
    conversation_id: Uuid,
) -> Result<ReflectionRow, AppError> {
    store
        .get_conversation(conversation_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Conversation {conversation_id} not found")))?;

    let messages = store.list_messages(conversation_id).await?;
    if messages.is_empty() {
        return Err(AppError::Validation(
            "Conversation has no messages to reflect on".to_string(),
        ));
    }

    let prompt = REFLECTION_TEMPLATE.replace("{history}", &format_history(&messages));
    let question = match llm.complete(&prompt, REFLECTION_MAX_TOKENS).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Reflection generation failed for conversation {conversation_id}: {e}");
            FALLBACK_REFLECTION.to_string()
        }
    };

    let reflection = store.insert_reflection(conversation_id, &question).await?;
    info!(
        "Created reflection {} for conversation {conversation_id}",
        reflection.id
    );
    Ok(reflection)
}

/// Records the user's answer to a reflection.
pub async fn answer_reflection(
    store: &dyn JournalStore,
    reflection_id: Uuid,
    response: &str,
) -> Result<ReflectionRow, AppError> {
    if response.trim().is_empty() {
        return Err(AppError::Validation("response cannot be empty".to_string()));
    }

    store
        .answer_reflection(reflection_id, response)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reflection {reflection_id} not found")))
}

fn format_history(messages: &[MessageRow]) -> String {
    let start = messages.len().saturating_sub(HISTORY_WINDOW);
    messages[start..]
        .iter()
        .map(|m| {
            let speaker = if m.is_user() { "ユーザー" } else { "AI" };
            format!("{speaker}: {}", m.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
