// Seam for the hosted text-generation model
use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

/// Sampling parameters passed along with a prompt. `None` leaves the model default in place.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationParams {
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not obtain access token: {0}")]
    Auth(String),

    #[error("model endpoint returned {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    #[error("prompt was blocked: {0}")]
    Blocked(String),

    #[error("model returned no text")]
    EmptyResponse,

    #[error("could not decode model response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send a single prompt and return the model's text reply
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError>;
}
