//! Record store behind the journaling service.
//!
//! Handlers only see `Arc<dyn JournalStore>`; `PgJournalStore` backs production and
//! `MemoryJournalStore` runs when no database is configured (and in tests).

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::journal::{
    ConversationRow, ConversationSummaryRow, MessageRow, ReflectionRow, Role,
};
use crate::models::progress::UserProgressRow;

pub mod memory;
pub mod postgres;

pub use memory::MemoryJournalStore;
pub use postgres::PgJournalStore;

/// Parameters for appending a message to a conversation.
pub struct NewMessage<'a> {
    pub conversation_id: Uuid,
    pub role: Role,
    pub content: &'a str,
    pub depth_score: f64,
}

#[async_trait]
pub trait JournalStore: Send + Sync {
    async fn create_conversation(&self) -> Result<ConversationRow>;

    async fn get_conversation(&self, id: Uuid) -> Result<Option<ConversationRow>>;

    /// Bumps `updated_at` so the conversation sorts first in listings.
    async fn touch_conversation(&self, id: Uuid) -> Result<()>;

    /// Conversations holding at least one message, most recently updated first.
    async fn list_active_conversations(&self) -> Result<Vec<ConversationSummaryRow>>;

    /// Counts every conversation in the store, empty ones included.
    async fn count_conversations(&self) -> Result<i64>;

    async fn insert_message(&self, message: NewMessage<'_>) -> Result<MessageRow>;

    /// Messages of one conversation in creation order.
    async fn list_messages(&self, conversation_id: Uuid) -> Result<Vec<MessageRow>>;

    async fn insert_reflection(&self, conversation_id: Uuid, prompt: &str)
        -> Result<ReflectionRow>;

    async fn list_reflections(&self, conversation_id: Uuid) -> Result<Vec<ReflectionRow>>;

    /// Records the user's answer. Returns `None` when the reflection does not exist.
    async fn answer_reflection(&self, id: Uuid, response: &str)
        -> Result<Option<ReflectionRow>>;

    /// Counts reflections across the whole store that carry a response.
    async fn count_answered_reflections(&self) -> Result<i64>;

    async fn get_progress(&self, user_id: &str) -> Result<Option<UserProgressRow>>;

    /// Inserts unless a record for the user already exists; returns the stored record.
    async fn insert_progress(&self, progress: &UserProgressRow) -> Result<UserProgressRow>;

    async fn save_progress(&self, progress: &UserProgressRow) -> Result<()>;
}
