// Trends service - Use case for free-text industry benchmarks
use crate::application::prompt::trends_prompt;
use crate::application::text_generator::{GenerationError, GenerationParams, TextGenerator};
use std::sync::Arc;

pub const DEFAULT_INDUSTRY: &str = "general";

#[derive(Clone)]
pub struct TrendsService {
    generator: Arc<dyn TextGenerator>,
}

impl TrendsService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Benchmarks text straight from the model, using its default sampling
    pub async fn search_trends(
        &self,
        topic: &str,
        industry: &str,
    ) -> Result<String, GenerationError> {
        let prompt = trends_prompt(topic, industry);
        self.generator
            .generate(&prompt, &GenerationParams::default())
            .await
    }
}
