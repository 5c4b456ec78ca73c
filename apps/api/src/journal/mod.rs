// Journal: chat turns, conversation history, and depth scoring.
// Coaching replies go through llm_client; failures become reply text.

pub mod chat;
pub mod depth;
pub mod handlers;
pub mod prompts;
