// Reflections: follow-up questions generated from a conversation, answered later.

pub mod generator;
pub mod handlers;
pub mod prompts;
