pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::journal::handlers as journal;
use crate::progress::handlers as progress;
use crate::reflection::handlers as reflection;
use crate::state::AppState;
use crate::training::handlers as training;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Journal
        .route("/chat", post(journal::handle_chat))
        .route(
            "/conversations",
            get(journal::handle_list_conversations).post(journal::handle_create_conversation),
        )
        .route(
            "/conversations/:id/messages",
            get(journal::handle_get_messages),
        )
        .route(
            "/conversations/:id/depth",
            get(journal::handle_conversation_depth),
        )
        // Reflections
        .route(
            "/conversations/:id/reflections",
            get(reflection::handle_list_reflections).post(reflection::handle_create_reflection),
        )
        .route("/reflections/:id", put(reflection::handle_answer_reflection))
        // Progress
        .route("/progress/:user_id", get(progress::handle_get_progress))
        .route(
            "/progress/:user_id/update",
            post(progress::handle_update_progress),
        )
        // Training
        .route("/training/topics", get(training::handle_list_topics))
        .route("/training/exercises", get(training::handle_list_exercises))
        .route("/training/evaluate", post(training::handle_evaluate))
        .with_state(state)
}
