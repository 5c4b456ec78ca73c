use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{LlmError, TextCompletion};

/// Completion double for tests: answers every prompt with the same reply (or
/// the same failure) and records the prompts it received.
pub struct FakeCompletion {
    reply: Result<String, String>,
    prompts: Mutex<Vec<(String, u32)>>,
}

impl FakeCompletion {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<(String, u32)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextCompletion for FakeCompletion {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), max_tokens));
        self.reply.clone().map_err(|message| LlmError::Api {
            status: 401,
            message,
        })
    }
}
