use std::sync::Arc;

use crate::llm_client::TextCompletion;
use crate::store::JournalStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Postgres in production, in-memory when `DATABASE_URL` is unset.
    pub store: Arc<dyn JournalStore>,
    pub llm: Arc<dyn TextCompletion>,
}
