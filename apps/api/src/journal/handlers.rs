use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::journal::chat::{run_chat_turn, ChatRequest, ChatResponse};
use crate::models::journal::{ConversationSummaryRow, MessageRow};
use crate::state::AppState;
use crate::store::JournalStore;

#[derive(Debug, Serialize)]
pub struct ConversationListResponse {
    pub conversations: Vec<ConversationSummaryRow>,
}

#[derive(Debug, Serialize)]
pub struct CreateConversationResponse {
    pub conversation_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct MessageView {
    pub role: String,
    pub content: String,
    pub depth_score: f64,
    pub created_at: DateTime<Utc>,
}

impl From<MessageRow> for MessageView {
    fn from(row: MessageRow) -> Self {
        Self {
            role: row.role,
            content: row.content,
            depth_score: row.depth_score,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageListResponse {
    pub messages: Vec<MessageView>,
}

#[derive(Debug, Serialize)]
pub struct ConversationDepthResponse {
    pub conversation_id: Uuid,
    pub average_depth: f64,
    pub scored_messages: usize,
}

/// POST /chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let response = run_chat_turn(state.store.as_ref(), state.llm.as_ref(), request).await?;
    Ok(Json(response))
}

/// GET /conversations
///
/// Conversations without messages are left out.
pub async fn handle_list_conversations(
    State(state): State<AppState>,
) -> Result<Json<ConversationListResponse>, AppError> {
    let conversations = state.store.list_active_conversations().await?;
    Ok(Json(ConversationListResponse { conversations }))
}

/// POST /conversations
pub async fn handle_create_conversation(
    State(state): State<AppState>,
) -> Result<Json<CreateConversationResponse>, AppError> {
    let conversation = state.store.create_conversation().await?;
    Ok(Json(CreateConversationResponse {
        conversation_id: conversation.id,
        created_at: conversation.created_at,
    }))
}

/// GET /conversations/:id/messages
pub async fn handle_get_messages(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
) -> Result<Json<MessageListResponse>, AppError> {
    let messages = existing_conversation_messages(state.store.as_ref(), conversation_id).await?;
    Ok(Json(MessageListResponse {
        messages: messages.into_iter().map(MessageView::from).collect(),
    }))
}

/// GET /conversations/:id/depth
///
/// Average depth over the user's messages; AI replies are not scored.
pub async fn handle_conversation_depth(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
) -> Result<Json<ConversationDepthResponse>, AppError> {
    let messages = existing_conversation_messages(state.store.as_ref(), conversation_id).await?;
    let (average_depth, scored_messages) = average_user_depth(&messages);
    Ok(Json(ConversationDepthResponse {
        conversation_id,
        average_depth,
        scored_messages,
    }))
}

async fn existing_conversation_messages(
    store: &dyn JournalStore,
    conversation_id: Uuid,
) -> Result<Vec<MessageRow>, AppError> {
    store
        .get_conversation(conversation_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Conversation {conversation_id} not found")))?;
    Ok(store.list_messages(conversation_id).await?)
}

fn average_user_depth(messages: &[MessageRow]) -> (f64, usize) {
    let scores: Vec<f64> = messages
        .iter()
        .filter(|m| m.is_user())
        .map(|m| m.depth_score)
        .collect();
    if scores.is_empty() {
        return (0.0, 0);
    }
    (scores.iter().sum::<f64>() / scores.len() as f64, scores.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::journal::Role;

    fn message(role: Role, depth_score: f64) -> MessageRow {
        MessageRow {
            id: Uuid::new_v4(),
            conversation_id: Uuid::nil(),
            role: role.as_str().to_string(),
            content: String::new(),
            depth_score,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_average_ignores_ai_replies() {
        let messages = vec![
            message(Role::User, 2.0),
            message(Role::Ai, 0.0),
            message(Role::User, 4.0),
        ];
        let (average, count) = average_user_depth(&messages);
        assert!((average - 3.0).abs() < f64::EPSILON);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_average_of_no_messages_is_zero() {
        assert_eq!(average_user_depth(&[]), (0.0, 0));
    }
}
