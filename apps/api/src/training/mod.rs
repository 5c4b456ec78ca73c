// Training: conversation topics and the prompt-writing exercise bank.
// Evaluation calls go through llm_client like every other LLM call.

pub mod evaluator;
pub mod exercises;
pub mod handlers;
pub mod prompts;
pub mod topics;
