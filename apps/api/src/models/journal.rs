use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Ai,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Ai => "ai",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConversationRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A conversation as it appears in listings: only ones holding at least one message.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConversationSummaryRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub message_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MessageRow {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub role: String,
    pub content: String,
    /// 0.0 for AI replies and for messages stored before scoring existed.
    pub depth_score: f64,
    pub created_at: DateTime<Utc>,
}

impl MessageRow {
    pub fn is_user(&self) -> bool {
        self.role == Role::User.as_str()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReflectionRow {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub prompt: String,
    /// `None` until the user answers.
    pub user_response: Option<String>,
    pub created_at: DateTime<Utc>,
    pub answered_at: Option<DateTime<Utc>>,
}
