use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The three coaching phases. Stored as an integer level 1–3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Open questioning.
    Awakening = 1,
    /// Reflecting on recurring thought patterns.
    Refinement = 2,
    /// Co-creative partnership.
    CoCreation = 3,
}

impl Stage {
    /// Out-of-range levels clamp to the nearest stage.
    pub fn from_level(level: i32) -> Self {
        match level {
            i32::MIN..=1 => Stage::Awakening,
            2 => Stage::Refinement,
            _ => Stage::CoCreation,
        }
    }

    pub fn level(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct UserProgressRow {
    pub user_id: String,
    pub current_stage: i32,
    pub total_conversations: i64,
    pub total_reflections: i64,
    /// Carried for the dashboard; nothing computes it yet.
    pub prompt_skill_score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProgressRow {
    pub fn new(user_id: &str) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.to_string(),
            current_stage: Stage::Awakening.level(),
            total_conversations: 0,
            total_reflections: 0,
            prompt_skill_score: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn stage(&self) -> Stage {
        Stage::from_level(self.current_stage)
    }
}
