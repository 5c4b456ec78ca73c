use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::journal::{ConversationRow, ConversationSummaryRow, MessageRow, ReflectionRow};
use crate::models::progress::UserProgressRow;
use crate::store::{JournalStore, NewMessage};

#[derive(Default)]
struct Tables {
    conversations: Vec<ConversationRow>,
    messages: Vec<MessageRow>,
    reflections: Vec<ReflectionRow>,
    progress: HashMap<String, UserProgressRow>,
}

/// In-process store. Rows live in insertion order, which doubles as creation order.
#[derive(Default)]
pub struct MemoryJournalStore {
    tables: Mutex<Tables>,
}

impl MemoryJournalStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl JournalStore for MemoryJournalStore {
    async fn create_conversation(&self) -> Result<ConversationRow> {
        let now = Utc::now();
        let conversation = ConversationRow {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        };
        self.tables()?.conversations.push(conversation.clone());
        Ok(conversation)
    }

    async fn get_conversation(&self, id: Uuid) -> Result<Option<ConversationRow>> {
        Ok(self
            .tables()?
            .conversations
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn touch_conversation(&self, id: Uuid) -> Result<()> {
        let mut tables = self.tables()?;
        if let Some(conversation) = tables.conversations.iter_mut().find(|c| c.id == id) {
            conversation.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn list_active_conversations(&self) -> Result<Vec<ConversationSummaryRow>> {
        let tables = self.tables()?;
        let mut summaries: Vec<ConversationSummaryRow> = tables
            .conversations
            .iter()
            .filter_map(|c| {
                let message_count = tables
                    .messages
                    .iter()
                    .filter(|m| m.conversation_id == c.id)
                    .count() as i64;
                (message_count > 0).then(|| ConversationSummaryRow {
                    id: c.id,
                    created_at: c.created_at,
                    updated_at: c.updated_at,
                    message_count,
                })
            })
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    async fn count_conversations(&self) -> Result<i64> {
        Ok(self.tables()?.conversations.len() as i64)
    }

    async fn insert_message(&self, message: NewMessage<'_>) -> Result<MessageRow> {
        let row = MessageRow {
            id: Uuid::new_v4(),
            conversation_id: message.conversation_id,
            role: message.role.as_str().to_string(),
            content: message.content.to_string(),
            depth_score: message.depth_score,
            created_at: Utc::now(),
        };
        self.tables()?.messages.push(row.clone());
        Ok(row)
    }

    async fn list_messages(&self, conversation_id: Uuid) -> Result<Vec<MessageRow>> {
        Ok(self
            .tables()?
            .messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect())
    }

    async fn insert_reflection(
        &self,
        conversation_id: Uuid,
        prompt: &str,
    ) -> Result<ReflectionRow> {
        let row = ReflectionRow {
            id: Uuid::new_v4(),
            conversation_id,
            prompt: prompt.to_string(),
            user_response: None,
            created_at: Utc::now(),
            answered_at: None,
        };
        self.tables()?.reflections.push(row.clone());
        Ok(row)
    }

    async fn list_reflections(&self, conversation_id: Uuid) -> Result<Vec<ReflectionRow>> {
        Ok(self
            .tables()?
            .reflections
            .iter()
            .filter(|r| r.conversation_id == conversation_id)
            .cloned()
            .collect())
    }

    async fn answer_reflection(
        &self,
        id: Uuid,
        response: &str,
    ) -> Result<Option<ReflectionRow>> {
        let mut tables = self.tables()?;
        Ok(tables.reflections.iter_mut().find(|r| r.id == id).map(|r| {
            r.user_response = Some(response.to_string());
            r.answered_at = Some(Utc::now());
            r.clone()
        }))
    }

    async fn count_answered_reflections(&self) -> Result<i64> {
        Ok(self
            .tables()?
            .reflections
            .iter()
            .filter(|r| r.user_response.is_some())
            .count() as i64)
    }

    async fn get_progress(&self, user_id: &str) -> Result<Option<UserProgressRow>> {
        Ok(self.tables()?.progress.get(user_id).cloned())
    }

    async fn insert_progress(&self, progress: &UserProgressRow) -> Result<UserProgressRow> {
        Ok(self
            .tables()?
            .progress
            .entry(progress.user_id.clone())
            .or_insert_with(|| progress.clone())
            .clone())
    }

    async fn save_progress(&self, progress: &UserProgressRow) -> Result<()> {
        let mut tables = self.tables()?;
        if let Some(existing) = tables.progress.get_mut(&progress.user_id) {
            *existing = progress.clone();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::journal::Role;

    async fn add_message(store: &MemoryJournalStore, conversation_id: Uuid, content: &str) {
        store
            .insert_message(NewMessage {
                conversation_id,
                role: Role::User,
                content,
                depth_score: 1.0,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_listing_skips_empty_conversations() {
        let store = MemoryJournalStore::new();
        let empty = store.create_conversation().await.unwrap();
        let used = store.create_conversation().await.unwrap();
        add_message(&store, used.id, "hello").await;
        add_message(&store, used.id, "again").await;

        let listed = store.list_active_conversations().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, used.id);
        assert_eq!(listed[0].message_count, 2);
        assert!(listed.iter().all(|c| c.id != empty.id));

        // Empty conversations still count toward the global total
        assert_eq!(store.count_conversations().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_messages_keep_creation_order() {
        let store = MemoryJournalStore::new();
        let conversation = store.create_conversation().await.unwrap();
        add_message(&store, conversation.id, "first").await;
        add_message(&store, conversation.id, "second").await;

        let messages = store.list_messages(conversation.id).await.unwrap();
        let contents: Vec<_> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_only_answered_reflections_are_counted() {
        let store = MemoryJournalStore::new();
        let conversation = store.create_conversation().await.unwrap();
        let first = store
            .insert_reflection(conversation.id, "What stood out?")
            .await
            .unwrap();
        store
            .insert_reflection(conversation.id, "What would you change?")
            .await
            .unwrap();
        assert_eq!(store.count_answered_reflections().await.unwrap(), 0);

        let answered = store
            .answer_reflection(first.id, "The pace of the week")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(answered.user_response.as_deref(), Some("The pace of the week"));
        assert!(answered.answered_at.is_some());
        assert_eq!(store.count_answered_reflections().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_answering_unknown_reflection_returns_none() {
        let store = MemoryJournalStore::new();
        let result = store.answer_reflection(Uuid::new_v4(), "text").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_insert_progress_keeps_existing_record() {
        let store = MemoryJournalStore::new();
        let mut progress = UserProgressRow::new("user-1");
        progress.current_stage = 2;
        store.insert_progress(&progress).await.unwrap();

        let stored = store
            .insert_progress(&UserProgressRow::new("user-1"))
            .await
            .unwrap();
        assert_eq!(stored.current_stage, 2);
    }
}
