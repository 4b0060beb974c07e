// Chat service - Use case for turning a user message into a dashboard reply
use crate::application::prompt::chat_prompt;
use crate::application::response_interpreter::interpret;
use crate::application::text_generator::{GenerationError, GenerationParams, TextGenerator};
use crate::domain::dashboard::DashboardResponse;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct ChatService {
    generator: Arc<dyn TextGenerator>,
    params: GenerationParams,
}

impl ChatService {
    pub fn new(generator: Arc<dyn TextGenerator>, params: GenerationParams) -> Self {
        Self { generator, params }
    }

    /// Only the current message reaches the model; earlier turns are accepted but not replayed.
    pub async fn chat(
        &self,
        message: &str,
        history: &[Value],
    ) -> Result<DashboardResponse, GenerationError> {
        tracing::debug!(
            "Chat request: {} chars, {} prior turns",
            message.len(),
            history.len()
        );

        let prompt = chat_prompt(message);
        let reply = self.generator.generate(&prompt, &self.params).await?;

        Ok(interpret(&reply).into_response())
    }
}
