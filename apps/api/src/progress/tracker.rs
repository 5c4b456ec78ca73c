//! Progress tracking — recomputes a user's counters from the record store and
//! advances their coaching stage.
//!
//! The counters are recomputed from ground truth on every update, never
//! incremented. They are GLOBAL: conversations carry no owner, so every
//! conversation and every answered reflection in the store counts for every user.
//!
//! The stage machine moves at most one step per `recompute` call. A user who
//! already qualifies for stage 3 while still at stage 1 reaches stage 2 on this
//! call and stage 3 on the next one.

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::models::progress::{Stage, UserProgressRow};
use crate::store::JournalStore;

/// Conversations needed to leave stage 1.
pub const CONVERSATIONS_FOR_REFINEMENT: i64 = 10;
/// Answered reflections needed to leave stage 2.
pub const REFLECTIONS_FOR_CO_CREATION: i64 = 3;

/// Single-step transition evaluated against the current stage only.
pub fn next_stage(current: Stage, total_conversations: i64, total_reflections: i64) -> Stage {
    match current {
        Stage::Awakening if total_conversations >= CONVERSATIONS_FOR_REFINEMENT => {
            Stage::Refinement
        }
        Stage::Refinement if total_reflections >= REFLECTIONS_FOR_CO_CREATION => {
            Stage::CoCreation
        }
        other => other,
    }
}

/// Returns the user's progress record, creating a stage-1 record on first access.
pub async fn get_or_create(store: &dyn JournalStore, user_id: &str) -> Result<UserProgressRow> {
    if let Some(progress) = store.get_progress(user_id).await? {
        return Ok(progress);
    }

    let progress = store.insert_progress(&UserProgressRow::new(user_id)).await?;
    info!("Created progress record for user {user_id}");
    Ok(progress)
}

/// Re-derives the counters from the store and applies one stage transition.
pub async fn recompute(store: &dyn JournalStore, user_id: &str) -> Result<UserProgressRow> {
    let mut progress = get_or_create(store, user_id).await?;

    progress.total_conversations = store.count_conversations().await?;
    progress.total_reflections = store.count_answered_reflections().await?;

    let current = progress.stage();
    let next = next_stage(
        current,
        progress.total_conversations,
        progress.total_reflections,
    );
    if next != current {
        info!(
            "User {user_id} advanced from stage {} to stage {}",
            current.level(),
            next.level()
        );
    }

    progress.current_stage = next.level();
    progress.updated_at = Utc::now();
    store.save_progress(&progress).await?;

    Ok(progress)
}

/// Stage used to pick the coaching persona. No user id, or no record yet, means stage 1.
/// Never creates a record.
pub async fn stage_for(store: &dyn JournalStore, user_id: Option<&str>) -> Result<Stage> {
    let Some(user_id) = user_id else {
        return Ok(Stage::Awakening);
    };
    Ok(store
        .get_progress(user_id)
        .await?
        .map(|p| p.stage())
        .unwrap_or(Stage::Awakening))
}

/// How far the user is from the next stage, as shown on the progress dashboard.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StageOutlook {
    /// Count required to leave the current stage; 0 at the final stage.
    pub next_stage_target: i64,
    /// Conversations (stage 1) or answered reflections (stage 2) still needed.
    pub remaining: i64,
}

impl StageOutlook {
    pub fn for_progress(progress: &UserProgressRow) -> Self {
        let (target, current) = match progress.stage() {
            Stage::Awakening => (CONVERSATIONS_FOR_REFINEMENT, progress.total_conversations),
            Stage::Refinement => (REFLECTIONS_FOR_CO_CREATION, progress.total_reflections),
            Stage::CoCreation => (0, 0),
        };
        Self {
            next_stage_target: target,
            remaining: (target - current).max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryJournalStore;

    async fn seed_conversations(store: &MemoryJournalStore, count: usize) {
        for _ in 0..count {
            store.create_conversation().await.unwrap();
        }
    }

    async fn seed_answered_reflections(store: &MemoryJournalStore, count: usize) {
        let conversation = store.create_conversation().await.unwrap();
        for i in 0..count {
            let reflection = store
                .insert_reflection(conversation.id, "What did you notice?")
                .await
                .unwrap();
            store
                .answer_reflection(reflection.id, &format!("answer {i}"))
                .await
                .unwrap();
        }
    }

    #[test]
    fn test_transition_table() {
        assert_eq!(next_stage(Stage::Awakening, 9, 100), Stage::Awakening);
        assert_eq!(next_stage(Stage::Awakening, 10, 0), Stage::Refinement);
        // Qualifying for both still only moves one step
        assert_eq!(next_stage(Stage::Awakening, 50, 50), Stage::Refinement);
        assert_eq!(next_stage(Stage::Refinement, 0, 2), Stage::Refinement);
        assert_eq!(next_stage(Stage::Refinement, 0, 3), Stage::CoCreation);
        assert_eq!(next_stage(Stage::CoCreation, 0, 0), Stage::CoCreation);
    }

    #[tokio::test]
    async fn test_get_or_create_persists_stage_one() {
        let store = MemoryJournalStore::new();
        let created = get_or_create(&store, "user-1").await.unwrap();
        assert_eq!(created.current_stage, 1);

        let stored = store.get_progress("user-1").await.unwrap().unwrap();
        assert_eq!(stored, created);
        assert_eq!(get_or_create(&store, "user-1").await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_recompute_new_user_empty_store_stays_at_stage_one() {
        let store = MemoryJournalStore::new();
        let progress = recompute(&store, "fresh-user").await.unwrap();
        assert_eq!(progress.current_stage, 1);
        assert_eq!(progress.total_conversations, 0);
        assert_eq!(progress.total_reflections, 0);
    }

    #[tokio::test]
    async fn test_ten_conversations_advance_to_stage_two() {
        let store = MemoryJournalStore::new();
        seed_conversations(&store, 10).await;
        get_or_create(&store, "user-1").await.unwrap();

        let progress = recompute(&store, "user-1").await.unwrap();
        assert_eq!(progress.current_stage, 2);
        assert_eq!(progress.total_conversations, 10);
        assert_eq!(progress.total_reflections, 0);
    }

    #[tokio::test]
    async fn test_stage_three_needs_a_second_recompute() {
        let store = MemoryJournalStore::new();
        seed_conversations(&store, 10).await;
        seed_answered_reflections(&store, 3).await;

        let first = recompute(&store, "user-1").await.unwrap();
        assert_eq!(first.current_stage, 2);
        assert_eq!(first.total_reflections, 3);

        let second = recompute(&store, "user-1").await.unwrap();
        assert_eq!(second.current_stage, 3);
    }

    #[tokio::test]
    async fn test_reflections_added_after_reaching_stage_two() {
        let store = MemoryJournalStore::new();
        seed_conversations(&store, 10).await;
        assert_eq!(recompute(&store, "user-1").await.unwrap().current_stage, 2);

        seed_answered_reflections(&store, 3).await;
        let progress = recompute(&store, "user-1").await.unwrap();
        assert_eq!(progress.current_stage, 3);
        // The reflections' conversation counts too
        assert_eq!(progress.total_conversations, 11);
    }

    #[tokio::test]
    async fn test_unanswered_reflections_do_not_count() {
        let store = MemoryJournalStore::new();
        seed_conversations(&store, 10).await;
        let conversation = store.create_conversation().await.unwrap();
        for _ in 0..5 {
            store
                .insert_reflection(conversation.id, "Still open?")
                .await
                .unwrap();
        }

        recompute(&store, "user-1").await.unwrap();
        let progress = recompute(&store, "user-1").await.unwrap();
        assert_eq!(progress.current_stage, 2);
        assert_eq!(progress.total_reflections, 0);
    }

    #[tokio::test]
    async fn test_recompute_is_idempotent_without_new_data() {
        let store = MemoryJournalStore::new();
        seed_conversations(&store, 10).await;
        recompute(&store, "user-1").await.unwrap();

        let first = recompute(&store, "user-1").await.unwrap();
        let second = recompute(&store, "user-1").await.unwrap();
        assert_eq!(first.current_stage, second.current_stage);
        assert_eq!(first.total_conversations, second.total_conversations);
        assert_eq!(first.total_reflections, second.total_reflections);
        assert_eq!(second.current_stage, 2);
    }

    #[tokio::test]
    async fn test_counts_are_global_across_users() {
        let store = MemoryJournalStore::new();
        seed_conversations(&store, 4).await;
        let a = recompute(&store, "user-a").await.unwrap();
        let b = recompute(&store, "user-b").await.unwrap();
        assert_eq!(a.total_conversations, 4);
        assert_eq!(b.total_conversations, 4);
    }

    #[tokio::test]
    async fn test_stage_for_defaults_without_record() {
        let store = MemoryJournalStore::new();
        assert_eq!(stage_for(&store, None).await.unwrap(), Stage::Awakening);
        assert_eq!(
            stage_for(&store, Some("nobody")).await.unwrap(),
            Stage::Awakening
        );
        // Looking up the stage must not create a record
        assert!(store.get_progress("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_stage_for_reads_stored_stage() {
        let store = MemoryJournalStore::new();
        let mut progress = UserProgressRow::new("user-1");
        progress.current_stage = 3;
        store.insert_progress(&progress).await.unwrap();
        assert_eq!(
            stage_for(&store, Some("user-1")).await.unwrap(),
            Stage::CoCreation
        );
    }

    #[test]
    fn test_stage_outlook() {
        let mut progress = UserProgressRow::new("user-1");
        progress.total_conversations = 4;
        assert_eq!(
            StageOutlook::for_progress(&progress),
            StageOutlook {
                next_stage_target: 10,
                remaining: 6
            }
        );

        progress.current_stage = 2;
        progress.total_reflections = 5;
        assert_eq!(StageOutlook::for_progress(&progress).remaining, 0);

        progress.current_stage = 3;
        assert_eq!(
            StageOutlook::for_progress(&progress),
            StageOutlook {
                next_stage_target: 0,
                remaining: 0
            }
        );
    }
}
