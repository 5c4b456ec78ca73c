use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::journal::{ConversationRow, ConversationSummaryRow, MessageRow, ReflectionRow};
use crate::models::progress::UserProgressRow;
use crate::store::{JournalStore, NewMessage};

const MESSAGE_COLUMNS: &str = "id, conversation_id, role, content, depth_score, created_at";
const REFLECTION_COLUMNS: &str =
    "id, conversation_id, prompt, user_response, created_at, answered_at";
const PROGRESS_COLUMNS: &str = "user_id, current_stage, total_conversations, total_reflections, \
     prompt_skill_score, created_at, updated_at";

/// PostgreSQL-backed store. Tables are created by `db::run_migrations`.
#[derive(Clone)]
pub struct PgJournalStore {
    pool: PgPool,
}

impl PgJournalStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JournalStore for PgJournalStore {
    async fn create_conversation(&self) -> Result<ConversationRow> {
        let now = Utc::now();
        Ok(sqlx::query_as::<_, ConversationRow>(
            r#"
            INSERT INTO conversations (id, created_at, updated_at)
            VALUES ($1, $2, $2)
            RETURNING id, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(now)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn get_conversation(&self, id: Uuid) -> Result<Option<ConversationRow>> {
        Ok(sqlx::query_as::<_, ConversationRow>(
            "SELECT id, created_at, updated_at FROM conversations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn touch_conversation(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE conversations SET updated_at = $1 WHERE id = $2")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_active_conversations(&self) -> Result<Vec<ConversationSummaryRow>> {
        Ok(sqlx::query_as::<_, ConversationSummaryRow>(
            r#"
            SELECT c.id, c.created_at, c.updated_at, COUNT(m.id) AS message_count
            FROM conversations c
            JOIN messages m ON m.conversation_id = c.id
            GROUP BY c.id, c.created_at, c.updated_at
            ORDER BY c.updated_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn count_conversations(&self) -> Result<i64> {
        Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM conversations")
            .fetch_one(&self.pool)
            .await?)
    }

    async fn insert_message(&self, message: NewMessage<'_>) -> Result<MessageRow> {
        let NewMessage {
            conversation_id,
            role,
            content,
            depth_score,
        } = message;

        Ok(sqlx::query_as::<_, MessageRow>(&format!(
            r#"
            INSERT INTO messages (id, conversation_id, role, content, depth_score, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(conversation_id)
        .bind(role.as_str())
        .bind(content)
        .bind(depth_score)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list_messages(&self, conversation_id: Uuid) -> Result<Vec<MessageRow>> {
        // seq breaks created_at ties so a user message always precedes its reply
        Ok(sqlx::query_as::<_, MessageRow>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE conversation_id = $1 \
             ORDER BY created_at, seq"
        ))
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn insert_reflection(
        &self,
        conversation_id: Uuid,
        prompt: &str,
    ) -> Result<ReflectionRow> {
        Ok(sqlx::query_as::<_, ReflectionRow>(&format!(
            r#"
            INSERT INTO reflections (id, conversation_id, prompt, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING {REFLECTION_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(conversation_id)
        .bind(prompt)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list_reflections(&self, conversation_id: Uuid) -> Result<Vec<ReflectionRow>> {
        Ok(sqlx::query_as::<_, ReflectionRow>(&format!(
            "SELECT {REFLECTION_COLUMNS} FROM reflections WHERE conversation_id = $1 \
             ORDER BY created_at"
        ))
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn answer_reflection(
        &self,
        id: Uuid,
        response: &str,
    ) -> Result<Option<ReflectionRow>> {
        Ok(sqlx::query_as::<_, ReflectionRow>(&format!(
            r#"
            UPDATE reflections SET user_response = $1, answered_at = $2
            WHERE id = $3
            RETURNING {REFLECTION_COLUMNS}
            "#
        ))
        .bind(response)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn count_answered_reflections(&self) -> Result<i64> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM reflections WHERE user_response IS NOT NULL",
        )
        .fetch_one(&self.pool)
        .await?)
    }

    async fn get_progress(&self, user_id: &str) -> Result<Option<UserProgressRow>> {
        Ok(sqlx::query_as::<_, UserProgressRow>(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM user_progress WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn insert_progress(&self, progress: &UserProgressRow) -> Result<UserProgressRow> {
        sqlx::query(
            r#"
            INSERT INTO user_progress
                (user_id, current_stage, total_conversations, total_reflections,
                 prompt_skill_score, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(&progress.user_id)
        .bind(progress.current_stage)
        .bind(progress.total_conversations)
        .bind(progress.total_reflections)
        .bind(progress.prompt_skill_score)
        .bind(progress.created_at)
        .bind(progress.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(sqlx::query_as::<_, UserProgressRow>(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM user_progress WHERE user_id = $1"
        ))
        .bind(&progress.user_id)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn save_progress(&self, progress: &UserProgressRow) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE user_progress
            SET current_stage = $1,
                total_conversations = $2,
                total_reflections = $3,
                prompt_skill_score = $4,
                updated_at = $5
            WHERE user_id = $6
            "#,
        )
        .bind(progress.current_stage)
        .bind(progress.total_conversations)
        .bind(progress.total_reflections)
        .bind(progress.prompt_skill_score)
        .bind(progress.updated_at)
        .bind(&progress.user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
