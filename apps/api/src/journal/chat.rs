use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::journal::depth::score_depth;
use crate::journal::prompts::build_chat_prompt;
use crate::llm_client::{CompletionOutcome, TextCompletion};
use crate::models::journal::Role;
use crate::progress::tracker::stage_for;
use crate::store::{JournalStore, NewMessage};
use crate::training::topics::find_topic;

pub const CHAT_MAX_TOKENS: u32 = 150;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    pub conversation_id: Option<Uuid>,
    /// Selects the coaching persona; absent means stage 1.
    pub user_id: Option<String>,
    /// Training topic id, see `training::topics`.
    pub topic: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// The coach's question, or the folded error text when the LLM call failed.
    pub reply: String,
    pub conversation_id: Uuid,
    pub depth_score: f64,
}

/// Runs one chat turn: store the scored user message, ask the coach, store the reply.
///
/// An LLM failure still yields `Ok`: the error is rendered into `reply` and no AI
/// message is stored.
pub async fn run_chat_turn(
    store: &dyn JournalStore,
    llm: &dyn TextCompletion,
    request: ChatRequest,
) -> Result<ChatResponse, AppError> {
    let conversation_id = resolve_conversation(store, request.conversation_id).await?;

    let depth_score = score_depth(&request.message);
    store
        .insert_message(NewMessage {
            conversation_id,
            role: Role::User,
            content: &request.message,
            depth_score,
        })
        .await?;

    let stage = stage_for(store, request.user_id.as_deref()).await?;
    let topic = request.topic.as_deref().and_then(find_topic);
    let prompt = build_chat_prompt(stage, topic, &request.message);

    let outcome = CompletionOutcome::from_result(llm.complete(&prompt, CHAT_MAX_TOKENS).await);
    if let CompletionOutcome::Text(reply) = &outcome {
        store
            .insert_message(NewMessage {
                conversation_id,
                role: Role::Ai,
                content: reply,
                depth_score: 0.0,
            })
            .await?;
    }
    store.touch_conversation(conversation_id).await?;

    Ok(ChatResponse {
        reply: outcome.into_display_text(),
        conversation_id,
        depth_score,
    })
}

/// Uses the requested conversation when it exists, otherwise starts a new one.
async fn resolve_conversation(
    store: &dyn JournalStore,
    requested: Option<Uuid>,
) -> Result<Uuid, AppError> {
    if let Some(id) = requested {
        if store.get_conversation(id).await?.is_some() {
            return Ok(id);
        }
        warn!("Conversation {id} not found, starting a new one");
    }

    let conversation = store.create_conversation().await?;
    info!("Started conversation {}", conversation.id);
    Ok(conversation.id)
}
