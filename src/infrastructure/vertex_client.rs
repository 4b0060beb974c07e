// Vertex AI generateContent client
use crate::application::text_generator::{GenerationError, GenerationParams, TextGenerator};
use crate::infrastructure::config::VertexSettings;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GCLOUD_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the bearer token for each call comes from
#[derive(Debug, Clone)]
pub enum TokenSource {
    Static(String),
    /// Shell out to `gcloud auth print-access-token`
    Gcloud,
}

#[derive(Debug, Clone)]
pub struct VertexGenerator {
    client: reqwest::Client,
    url: String,
    token: TokenSource,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl VertexGenerator {
    pub fn new(settings: &VertexSettings) -> Result<Self, GenerationError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let token = match &settings.access_token {
            Some(token) if !token.trim().is_empty() => TokenSource::Static(token.trim().to_string()),
            _ => TokenSource::Gcloud,
        };

        Ok(Self {
            client: builder.build()?,
            url: generate_content_url(settings),
            token,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn access_token(&self) -> Result<String, GenerationError> {
        match &self.token {
            TokenSource::Static(token) => Ok(token.clone()),
            TokenSource::Gcloud => {
                run_token_command("gcloud", &["auth", "print-access-token"], GCLOUD_TIMEOUT).await
            }
        }
    }
}

/// Run a token-printing command, killing it if it outlives `limit`
async fn run_token_command(
    program: &str,
    args: &[&str],
    limit: Duration,
) -> Result<String, GenerationError> {
    let child = tokio::process::Command::new(program)
        .args(args)
        .kill_on_drop(true)
        .output();

    let output = tokio::time::timeout(limit, child)
        .await
        .map_err(|_| GenerationError::Auth(format!("{} timed out after {:?}", program, limit)))?
        .map_err(|e| GenerationError::Auth(format!("failed to run {}: {}", program, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GenerationError::Auth(stderr.trim().to_string()));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(GenerationError::Auth(format!("{} printed an empty token", program)));
    }
    Ok(token)
}

#[async_trait]
impl TextGenerator for VertexGenerator {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        let token = self.access_token().await?;
        let body = build_request(prompt, params);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Vertex AI returned {}: {}", status, body);
            return Err(GenerationError::HttpStatus { status, body });
        }

        let data = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GenerationError::Decode(e.to_string()))?;

        extract_text(data)
    }
}

pub fn generate_content_url(settings: &VertexSettings) -> String {
    let base = match &settings.endpoint {
        Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
        None if settings.location == "global" => "https://aiplatform.googleapis.com".to_string(),
        None => format!("https://{}-aiplatform.googleapis.com", settings.location),
    };

    format!(
        "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
        base, settings.project_id, settings.location, settings.model
    )
}

fn build_request<'a>(prompt: &'a str, params: &GenerationParams) -> GenerateContentRequest<'a> {
    let generation_config = (*params != GenerationParams::default()).then(|| GenerationConfig {
        max_output_tokens: params.max_output_tokens,
        temperature: params.temperature,
        top_p: params.top_p,
    });

    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![RequestPart { text: prompt }],
        }],
        generation_config,
    }
}

/// Concatenated text parts of the first candidate
fn extract_text(data: GenerateContentResponse) -> Result<String, GenerationError> {
    let Some(candidate) = data.candidates.into_iter().next() else {
        let reason = data
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        return Err(GenerationError::Blocked(reason));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        tracing::warn!(
            "Candidate carried no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        );
        return Err(GenerationError::EmptyResponse);
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(location: &str, endpoint: Option<&str>) -> VertexSettings {
        VertexSettings {
            project_id: "hr-project".to_string(),
            location: location.to_string(),
            model: "gemini-2.5-pro".to_string(),
            endpoint: endpoint.map(str::to_string),
            access_token: Some("token".to_string()),
            timeout_secs: None,
        }
    }

    #[test]
    fn test_regional_url() {
        assert_eq!(
            generate_content_url(&settings("us-central1", None)),
            "https://us-central1-aiplatform.googleapis.com/v1/projects/hr-project/locations/us-central1/publishers/google/models/gemini-2.5-pro:generateContent"
        );
    }

    #[test]
    fn test_global_and_custom_endpoint_urls() {
        assert!(
            generate_content_url(&settings("global", None))
                .starts_with("https://aiplatform.googleapis.com/v1/projects/hr-project/locations/global/")
        );
        assert!(
            generate_content_url(&settings("us-central1", Some("http://localhost:9090/")))
                .starts_with("http://localhost:9090/v1/projects/")
        );
    }

    #[test]
    fn test_request_body_omits_unset_params() {
        let params = GenerationParams {
            max_output_tokens: Some(2048),
            temperature: Some(0.5),
            top_p: None,
        };
        let body = serde_json::to_value(build_request("hello", &params)).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{"role": "user", "parts": [{"text": "hello"}]}],
                "generationConfig": {"maxOutputTokens": 2048, "temperature": 0.5}
            })
        );

        let body = serde_json::to_value(build_request("hello", &GenerationParams::default())).unwrap();
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_extract_text_joins_parts_of_first_candidate() {
        let data: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "```json\n"}, {"text": "{}\n```"}]}, "finishReason": "STOP"},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();

        assert_eq!(extract_text(data).unwrap(), "```json\n{}\n```");
    }

    #[test]
    fn test_extract_text_reports_block_reason() {
        let data: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();

        match extract_text(data) {
            Err(GenerationError::Blocked(reason)) => assert_eq!(reason, "SAFETY"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_extract_text_rejects_empty_candidate() {
        let data: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"finishReason": "MAX_TOKENS"}]
        }))
        .unwrap();

        assert!(matches!(extract_text(data), Err(GenerationError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_token_command_output_is_trimmed() {
        let token = run_token_command("echo", &["  ya29.token  "], Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(token, "ya29.token");
    }

    #[tokio::test]
    async fn test_wedged_token_command_times_out() {
        let result = run_token_command("sleep", &["5"], Duration::from_millis(50)).await;
        match result {
            Err(GenerationError::Auth(msg)) => assert!(msg.contains("timed out"), "{}", msg),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_token_command_is_auth_error() {
        let result = run_token_command("agent-dash-no-such-binary", &[], Duration::from_secs(5)).await;
        assert!(matches!(result, Err(GenerationError::Auth(_))));
    }

    #[test]
    fn test_static_token_is_used_when_configured() {
        let generator = VertexGenerator::new(&settings("us-central1", None)).unwrap();
        assert!(matches!(generator.token, TokenSource::Static(ref t) if t == "token"));
        assert!(generator.url().contains("hr-project"));
    }
}
